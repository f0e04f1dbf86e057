//! rulemerge - aggregation of routing/filtering rule lists.
//!
//! This crate collects matcher rules (domains, IP ranges, process names,
//! user agents, ASNs) from many remote and local sources and merges them
//! into deduplicated, type-categorized output documents for a
//! policy-routing engine.
//!
//! # Features
//!
//! - **Concurrent fetching**: a bounded worker pool with per-URL retry,
//!   timeout and backoff policy
//! - **Multi-format extraction**: plain lists, dash-list "payload"
//!   documents, and comment-annotated ASN lists
//! - **Classification**: untyped tokens are mapped to typed rules;
//!   already-typed rules pass through unchanged
//! - **Deterministic output**: deduplicated, sorted documents with header
//!   statistics, replaced atomically
//! - **Partial-failure tolerance**: no URL or source failure aborts the run
//!
//! # Quick Start
//!
//! ```ignore
//! use rulemerge::{MergeConfig, Pipeline};
//!
//! let config = MergeConfig::default()
//!     .with_source_dir("sources")
//!     .with_output_dir("output");
//!
//! let report = Pipeline::new(config).run()?;
//! println!("{} rules written", report.total_rules);
//! ```
//!
//! Source descriptors are plain text files, one entry per line: lines
//! starting with `http://` or `https://` are fetched, everything else is
//! an inline rule. Each descriptor becomes one output document named after
//! its file stem.

mod error;
mod rule;
mod rule_type;

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod fetcher;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod writer;

// Re-export core types
pub use error::{Error, Result};
pub use rule::Rule;
pub use rule_type::RuleType;

// Re-export the pipeline surface
pub use aggregator::RuleSet;
pub use classifier::classify;
pub use config::MergeConfig;
pub use fetcher::{FetchOutcome, Fetcher};
pub use metadata::RunMetadata;
pub use pipeline::{Pipeline, RunReport};
pub use source::{SourceDescriptor, SourceEntry};
pub use writer::OutputDocument;
