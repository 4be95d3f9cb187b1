//! blockdup - find duplicate and near-duplicate text blocks across notes
//!
//! Scans a directory (or git work tree) of Markdown notes and reports
//! passages that appear, verbatim or nearly so, in more than one file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use blockdup::{BlockdupConfig, CorpusSource, ReportFormat, ScanConfig, scan_corpus};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for the report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable listing (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Where the document list comes from.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    /// git when ROOT is a git work tree, walk otherwise
    Auto,
    /// Files tracked by git
    Git,
    /// Recursive directory walk
    Walk,
}

impl From<SourceArg> for CorpusSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Auto => CorpusSource::Auto,
            SourceArg::Git => CorpusSource::Git,
            SourceArg::Walk => CorpusSource::Walk,
        }
    }
}

/// Find duplicate and near-duplicate blocks of lines across Markdown notes.
#[derive(Parser, Debug)]
#[command(name = "blockdup")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Corpus root directory
    #[arg(default_value = ".")]
    root: PathBuf,

    /// YAML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Consecutive cleaned lines per block
    #[arg(short = 'n', long)]
    block_size: Option<usize>,

    /// Minimum Jaccard similarity for a near-duplicate, in (0, 1]
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Maximum relative length difference before comparing tokens, in [0, 1]
    #[arg(long)]
    length_tolerance: Option<f64>,

    /// Smallest tokens used as the candidate index key
    #[arg(long)]
    signature_size: Option<usize>,

    /// Drop cleaned lines shorter than this many characters
    #[arg(long)]
    min_line_chars: Option<usize>,

    /// Document source
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads for reading and block extraction (default: all CPUs)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn scan_config(&self) -> Result<ScanConfig> {
        let mut cfg = match &self.config {
            Some(path) => BlockdupConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?
                .to_scan_config()?,
            None => ScanConfig::default(),
        };

        if let Some(block_size) = self.block_size {
            cfg.detect.block.block_size = block_size;
        }
        if let Some(signature_size) = self.signature_size {
            cfg.detect.block.signature_size = signature_size;
        }
        if let Some(threshold) = self.threshold {
            cfg.detect.matcher.similarity_threshold = threshold;
        }
        if let Some(tolerance) = self.length_tolerance {
            cfg.detect.matcher.length_ratio_tolerance = tolerance;
        }
        if let Some(min) = self.min_line_chars {
            cfg.normalize.min_line_chars = min;
        }
        if let Some(source) = self.source {
            cfg.corpus.source = source.into();
        }
        if self.threads.is_some() {
            cfg.detect.threads = self.threads;
        }

        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let cfg = args.scan_config()?;
    let report = scan_corpus(&args.root, &cfg)
        .with_context(|| format!("scanning {}", args.root.display()))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            report.render(args.format.into(), &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report.render(args.format.into(), &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
