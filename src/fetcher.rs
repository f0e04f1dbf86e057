//! Bounded-concurrency retrieval of rule list content.

use flate2::read::GzDecoder;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::Read;
use std::thread;

use crate::config::MergeConfig;
use crate::error::Error;

/// Maximum accepted body size per URL (10 MB); real lists are well under
/// 2 MB, so this is ample margin.
const MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;

/// Result of fetching one URL through the full attempt cycle.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Raw content of the response body
    Success(String),
    /// Terminal failure after `attempts` attempts
    Failure { error: Error, attempts: u32 },
}

impl FetchOutcome {
    /// The fetched content, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            FetchOutcome::Success(content) => Some(content),
            FetchOutcome::Failure { .. } => None,
        }
    }
}

/// HTTP fetcher with retry policy and a bounded worker pool.
pub struct Fetcher {
    agent: ureq::Agent,
    config: MergeConfig,
}

impl Fetcher {
    /// Create a fetcher for the given configuration.
    pub fn new(config: &MergeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            config: config.clone(),
        }
    }

    /// Fetch one URL, retrying transient failures up to the attempt budget.
    ///
    /// A 4xx response is a permanent client error and terminates the loop
    /// immediately, as does any unexpected error; only transient failures
    /// (timeout, 5xx, transport) consume the retry budget. Each attempt is
    /// self-contained: no shared state is touched, so concurrent fetches
    /// need no locking.
    pub fn fetch(&self, url: &str) -> FetchOutcome {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.fetch_once(url) {
                Ok(content) => return FetchOutcome::Success(content),
                Err(error) => {
                    if !error.is_retriable() || attempts >= self.config.retries {
                        return FetchOutcome::Failure { error, attempts };
                    }
                    log::warn!(
                        "fetch {} failed (attempt {}/{}): {}; retrying in {:?}",
                        url,
                        attempts,
                        self.config.retries,
                        error,
                        self.config.retry_delay
                    );
                    thread::sleep(self.config.retry_delay);
                }
            }
        }
    }

    /// Fetch all URLs through a worker pool of the configured size.
    ///
    /// Results are index-aligned with the input. Completion order is not
    /// guaranteed; one URL's failure never affects the others.
    pub fn fetch_all(&self, urls: &[String]) -> Vec<FetchOutcome> {
        if urls.is_empty() {
            return Vec::new();
        }

        let queue: Mutex<VecDeque<(usize, &String)>> =
            Mutex::new(urls.iter().enumerate().collect());
        let results: Mutex<Vec<Option<FetchOutcome>>> =
            Mutex::new((0..urls.len()).map(|_| None).collect());
        let workers = self.config.workers.min(urls.len()).max(1);

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let job = queue.lock().pop_front();
                    let Some((idx, url)) = job else {
                        break;
                    };
                    let outcome = self.fetch(url);
                    results.lock()[idx] = Some(outcome);
                });
            }
        });

        results
            .into_inner()
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| FetchOutcome::Failure {
                    error: Error::UnexpectedFetch("fetch worker panicked".to_string()),
                    attempts: 0,
                })
            })
            .collect()
    }

    /// One self-contained fetch attempt.
    fn fetch_once(&self, url: &str) -> Result<String, Error> {
        let response = self.agent.get(url).call().map_err(map_ureq_error)?;

        let mut raw = Vec::new();
        response
            .into_reader()
            .take(MAX_BODY_SIZE)
            .read_to_end(&mut raw)
            .map_err(|e| Error::UnexpectedFetch(format!("failed to read body: {}", e)))?;

        // Raw .gz payloads arrive without a Content-Encoding header;
        // sniff the magic and decompress.
        let body = if is_gzip(&raw) {
            let mut decoder = GzDecoder::new(&raw[..]);
            let mut data = Vec::new();
            decoder
                .read_to_end(&mut data)
                .map_err(|e| Error::UnexpectedFetch(format!("gzip decompression failed: {}", e)))?;
            data
        } else {
            raw
        };

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Map a ureq error into the retry taxonomy.
fn map_ureq_error(err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(code, _) if (400..500).contains(&code) => {
            Error::PermanentFetch { status: code }
        }
        ureq::Error::Status(code, _) => Error::TransientFetch(format!("HTTP {}", code)),
        ureq::Error::Transport(transport) => Error::TransientFetch(transport.to_string()),
    }
}

/// Check for the gzip magic bytes.
fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}
