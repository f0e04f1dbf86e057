//! Pipeline configuration.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Default user agent sent with fetch requests. Some list hosts refuse
/// requests with obvious non-browser agents.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Immutable configuration for one pipeline run.
///
/// Threaded explicitly through the fetcher and pipeline instead of living
/// in process-wide state.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory holding source descriptor files (`*.txt`)
    pub source_dir: PathBuf,
    /// Directory receiving the merged output documents
    pub output_dir: PathBuf,
    /// Size of the fetch worker pool shared across all in-flight URLs
    pub workers: usize,
    /// Attempts per URL before giving up
    pub retries: u32,
    /// Timeout per fetch attempt
    pub timeout: Duration,
    /// Fixed delay between retry attempts
    pub retry_delay: Duration,
    /// User agent for fetch requests
    pub user_agent: String,
    /// Descriptor identifiers parsed as ASN-annotated lists
    pub asn_sources: Vec<String>,
    /// Legacy filter: drop literal lines containing neither `.` nor `:`.
    /// Off by default; over-filtering has silently dropped valid rules.
    pub filter_bare_literals: bool,
    /// Author identity written into output headers
    pub author: String,
    /// Repository identity written into output headers
    pub repo: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("sources"),
            output_dir: PathBuf::from("output"),
            workers: 10,
            retries: 3,
            timeout: Duration::from_secs(15),
            retry_delay: Duration::from_secs(2),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            asn_sources: Vec::new(),
            filter_bare_literals: false,
            author: "rulemerge".to_string(),
            repo: "https://github.com/rulemerge/rulemerge".to_string(),
        }
    }
}

/// On-disk YAML form of [`MergeConfig`]; every field optional, missing
/// fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    workers: Option<usize>,
    retries: Option<u32>,
    timeout_secs: Option<u64>,
    retry_delay_secs: Option<u64>,
    user_agent: Option<String>,
    #[serde(default)]
    asn_sources: Vec<String>,
    filter_bare_literals: Option<bool>,
    author: Option<String>,
    repo: Option<String>,
}

impl MergeConfig {
    /// Load configuration from a YAML file, overlaying the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let file: FileConfig = serde_yaml::from_str(&text)?;
        let mut config = Self::default();
        if let Some(dir) = file.source_dir {
            config.source_dir = dir;
        }
        if let Some(dir) = file.output_dir {
            config.output_dir = dir;
        }
        if let Some(workers) = file.workers {
            config.workers = workers.max(1);
        }
        if let Some(retries) = file.retries {
            config.retries = retries.max(1);
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.retry_delay_secs {
            config.retry_delay = Duration::from_secs(secs);
        }
        if let Some(agent) = file.user_agent {
            config.user_agent = agent;
        }
        config.asn_sources = file.asn_sources;
        if let Some(filter) = file.filter_bare_literals {
            config.filter_bare_literals = filter;
        }
        if let Some(author) = file.author {
            config.author = author;
        }
        if let Some(repo) = file.repo {
            config.repo = repo;
        }
        Ok(config)
    }

    /// Set the source directory.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the fetch worker pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the per-URL attempt budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.max(1);
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between retry attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Mark descriptor identifiers as ASN-annotated sources.
    pub fn with_asn_sources(mut self, names: Vec<String>) -> Self {
        self.asn_sources = names;
        self
    }

    /// Enable or disable the legacy literal-line validity filter.
    pub fn with_filter_bare_literals(mut self, filter: bool) -> Self {
        self.filter_bare_literals = filter;
        self
    }

    /// Whether the named descriptor is an ASN source.
    pub fn is_asn_source(&self, name: &str) -> bool {
        self.asn_sources.iter().any(|n| n == name)
    }
}
