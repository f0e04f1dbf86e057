//! The aggregation pipeline: sources in, merged documents out.

use std::fs;
use std::time::{Instant, SystemTime};

use crate::aggregator::RuleSet;
use crate::classifier::classify;
use crate::config::MergeConfig;
use crate::error::{Error, Result};
use crate::fetcher::{FetchOutcome, Fetcher};
use crate::metadata::RunMetadata;
use crate::parser;
use crate::source::{self, SourceDescriptor};
use crate::writer::{self, OutputDocument};

/// Outcome summary of one pipeline run.
///
/// The run is partial-failure-tolerant: a populated report means the pass
/// completed, not that every source succeeded.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Descriptors processed to completion
    pub sources_processed: usize,
    /// Descriptors skipped (unreadable) or whose output could not be written
    pub sources_skipped: usize,
    /// Output documents written
    pub outputs_written: usize,
    /// URLs that exhausted their attempt budget
    pub failed_urls: usize,
    /// Unique rules across all outputs
    pub total_rules: usize,
}

/// The aggregation pipeline.
pub struct Pipeline {
    config: MergeConfig,
    fetcher: Fetcher,
}

impl Pipeline {
    /// Create a pipeline for the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        let fetcher = Fetcher::new(&config);
        Self { config, fetcher }
    }

    /// Run one full pass: discover descriptors, clean stale outputs, then
    /// fetch, parse, classify, merge and write each source's document.
    ///
    /// Only a missing source directory (or an unusable output directory)
    /// is fatal; every other failure is logged and the pass continues.
    pub fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        let mut report = RunReport::default();

        let paths = source::discover(&self.config.source_dir)?;
        if paths.is_empty() {
            log::warn!(
                "no source descriptors (*.txt) in {}",
                self.config.source_dir.display()
            );
        }

        let mut descriptors = Vec::new();
        for path in &paths {
            match SourceDescriptor::load(path) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => {
                    log::error!("skipping source: {}", e);
                    report.sources_skipped += 1;
                }
            }
        }

        fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            Error::Config(format!(
                "output directory {}: {}",
                self.config.output_dir.display(),
                e
            ))
        })?;

        let expected: Vec<String> = descriptors.iter().map(|d| d.name.clone()).collect();
        writer::clean_stale(&self.config.output_dir, &expected)?;

        let mut metadata = RunMetadata::now();
        for descriptor in &descriptors {
            let (rules, failed) = self.collect_rules(descriptor);
            report.failed_urls += failed;

            let path = self
                .config
                .output_dir
                .join(format!("{}.list", descriptor.name));
            let document = OutputDocument {
                name: &descriptor.name,
                author: &self.config.author,
                repo: &self.config.repo,
                generated: SystemTime::now(),
                rules: &rules,
            };
            match writer::write_atomic(&path, &document.render()) {
                Ok(()) => {
                    log::info!(
                        "wrote {} rules to {}",
                        rules.len(),
                        path.display()
                    );
                    report.outputs_written += 1;
                    report.total_rules += rules.len();
                    metadata
                        .source_counts
                        .insert(descriptor.name.clone(), rules.len());
                }
                Err(e) => {
                    log::error!("{}", e);
                    report.sources_skipped += 1;
                    continue;
                }
            }
            report.sources_processed += 1;
        }

        metadata.total_rules = report.total_rules;
        metadata.failed_urls = report.failed_urls;
        let meta_path = self.config.output_dir.join("run.meta.json");
        if let Err(e) = metadata.save(&meta_path) {
            log::warn!("could not save run metadata: {}", e);
        }

        log::info!(
            "pass complete: {} output(s), {} unique rules, {} failed URL(s), {:.2}s",
            report.outputs_written,
            report.total_rules,
            report.failed_urls,
            start.elapsed().as_secs_f64()
        );
        Ok(report)
    }

    /// Fetch everything one descriptor names and merge it into a rule set.
    ///
    /// Fetches run concurrently; merging happens here, on one thread, after
    /// the results are collected.
    fn collect_rules(&self, descriptor: &SourceDescriptor) -> (RuleSet, usize) {
        let urls: Vec<String> = descriptor.urls().iter().map(|u| u.to_string()).collect();
        let outcomes = self.fetcher.fetch_all(&urls);
        let fetched: Vec<(String, FetchOutcome)> = urls.into_iter().zip(outcomes).collect();
        self.merge_fetched(descriptor, fetched)
    }

    /// Merge a descriptor's literal rules and already-fetched URL outcomes.
    ///
    /// Split out from the fetch so the merge path can be driven with held
    /// responses. Returns the merged set and the number of failed URLs.
    pub fn merge_fetched(
        &self,
        descriptor: &SourceDescriptor,
        fetched: Vec<(String, FetchOutcome)>,
    ) -> (RuleSet, usize) {
        let asn = self.config.is_asn_source(&descriptor.name);
        let mut rules = RuleSet::new();
        let mut failed = 0;

        let literals = descriptor.literals();
        if !literals.is_empty() {
            let tokens: Vec<String> = if asn {
                parser::parse_asn(&literals.join("\n"))
            } else {
                literals
                    .iter()
                    .filter(|line| {
                        !self.config.filter_bare_literals
                            || line.contains('.')
                            || line.contains(':')
                    })
                    .map(|line| line.to_string())
                    .collect()
            };
            rules.extend(tokens.iter().map(|t| classify(t)));
        }

        for (url, outcome) in fetched {
            match outcome {
                FetchOutcome::Success(content) => {
                    let format = parser::select_format(&url, &content, asn);
                    let tokens = parser::parse(&content, format);
                    log::info!(
                        "{}: extracted {} rules from {}",
                        descriptor.name,
                        tokens.len(),
                        url
                    );
                    rules.extend(tokens.iter().map(|t| classify(t)));
                }
                FetchOutcome::Failure { error, attempts } => {
                    log::error!(
                        "{}: giving up on {} after {} attempt(s): {}",
                        descriptor.name,
                        url,
                        attempts,
                        error
                    );
                    failed += 1;
                }
            }
        }

        (rules, failed)
    }
}
