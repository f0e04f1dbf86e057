//! rulemerge-gen: CLI tool for merging rule sources into output documents.

use clap::{Parser, Subcommand};
use rulemerge::parser::parse_payload;
use rulemerge::{MergeConfig, Pipeline};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rulemerge-gen")]
#[command(version = "0.1.0")]
#[command(about = "Merge rule list sources into deduplicated output documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the aggregation pipeline over a source directory
    Merge {
        /// Optional YAML config file; CLI flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory containing source descriptor files
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Directory receiving the merged output documents
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Fetch worker pool size
        #[arg(short, long)]
        workers: Option<usize>,

        /// Attempts per URL
        #[arg(short, long)]
        retries: Option<u32>,

        /// Timeout per fetch attempt, in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Descriptor identifiers to parse as ASN-annotated lists
        #[arg(long = "asn-source")]
        asn_sources: Vec<String>,
    },

    /// Convert a payload YAML file to plain list format
    Convert {
        /// Input payload YAML file
        #[arg(short, long)]
        input: PathBuf,

        /// Output list file; prints to stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge {
            config,
            source_dir,
            output_dir,
            workers,
            retries,
            timeout,
            asn_sources,
        } => merge(
            config,
            source_dir,
            output_dir,
            workers,
            retries,
            timeout,
            asn_sources,
        ),
        Commands::Convert { input, output } => convert(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn merge(
    config_path: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    workers: Option<usize>,
    retries: Option<u32>,
    timeout: Option<u64>,
    asn_sources: Vec<String>,
) -> rulemerge::Result<()> {
    let mut config = match config_path {
        Some(path) => MergeConfig::load(&path)?,
        None => MergeConfig::default(),
    };
    if let Some(dir) = source_dir {
        config = config.with_source_dir(dir);
    }
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(workers) = workers {
        config = config.with_workers(workers);
    }
    if let Some(retries) = retries {
        config = config.with_retries(retries);
    }
    if let Some(secs) = timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if !asn_sources.is_empty() {
        config = config.with_asn_sources(asn_sources);
    }

    let report = Pipeline::new(config).run()?;
    println!(
        "Done: {} output(s), {} unique rules, {} failed URL(s)",
        report.outputs_written, report.total_rules, report.failed_urls
    );
    Ok(())
}

fn convert(input: &std::path::Path, output: Option<&std::path::Path>) -> rulemerge::Result<()> {
    let content = fs::read_to_string(input)?;
    let tokens = parse_payload(&content);
    log::info!("extracted {} rules from {}", tokens.len(), input.display());

    let mut rendered = tokens.join("\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("Converted {} -> {}", input.display(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
