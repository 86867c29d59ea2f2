//! feedcheck: Validate real-time entity analytics feeds
//!
//! Runs the document, completeness and entity id checks over a
//! newline-delimited JSON feed and reports every violation found.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedcheck::validation::{
    open_feed, scan_lines, FeedLines, RecordCheck, UniqueDocuments, DOCUMENT_ID_FIELD,
    ENTITY_ID_FIELD, RECORD_COUNT_FIELD, RECORD_INDEX_FIELD,
};
use feedcheck::{profile_feed, validate_feed, FieldNames, ValidationConfig};

/// Exit status when at least one check failed.
const EXIT_CHECK_FAILED: u8 = 1;
/// Exit status when the feed could not be read.
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "feedcheck")]
#[command(about = "Validate newline-delimited JSON entity analytics feeds")]
#[command(version)]
struct Cli {
    /// Print per-check diagnostics and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    fields: FieldArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FieldArgs {
    /// Key holding the document id
    #[arg(long, global = true, default_value = DOCUMENT_ID_FIELD)]
    document_id_field: String,

    /// Key holding the entity id
    #[arg(long, global = true, default_value = ENTITY_ID_FIELD)]
    entity_id_field: String,

    /// Key holding the declared record count of the document
    #[arg(long, global = true, default_value = RECORD_COUNT_FIELD)]
    record_count_field: String,

    /// Key holding the record's 1-based index within the document
    #[arg(long, global = true, default_value = RECORD_INDEX_FIELD)]
    record_index_field: String,
}

impl From<FieldArgs> for FieldNames {
    fn from(args: FieldArgs) -> Self {
        FieldNames {
            document_id: args.document_id_field,
            entity_id: args.entity_id_field,
            record_count: args.record_count_field,
            record_index: args.record_index_field,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks against a feed; exits non-zero if any check fails
    Validate {
        /// Feed file (`.gz` is decompressed, `-` reads stdin)
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Count and list the distinct document ids of a feed
    Count {
        /// Feed file (`.gz` is decompressed, `-` reads stdin)
        path: PathBuf,
    },
    /// Summarise fields, entity ids and documents of a feed
    Describe {
        /// Feed file (`.gz` is decompressed, `-` reads stdin)
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the validate command, returning whether every check passed.
fn run_validate(
    path: &Path,
    format: OutputFormat,
    verbose: bool,
    config: &ValidationConfig,
) -> Result<bool> {
    let report = validate_feed(path, config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", report.render_text(verbose)),
    }

    Ok(report.passed())
}

/// Run the count command, returning whether any document was found.
fn run_count(path: &Path, config: &ValidationConfig) -> Result<bool> {
    let reader = open_feed(path)?;
    let mut unique = UniqueDocuments::new(config.fields.clone());
    let mut checks: [&mut dyn RecordCheck; 1] = [&mut unique];
    scan_lines(FeedLines::new(reader), &mut checks, config)?;

    println!("unique documents: {}", unique.count());
    for (i, id) in unique.document_ids().enumerate() {
        println!("{:>3}. {id}", i + 1);
    }

    Ok(unique.report().passed)
}

fn run_describe(path: &Path, format: OutputFormat, config: &ValidationConfig) -> Result<bool> {
    let profile = profile_feed(path, config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
        OutputFormat::Text => print!("{}", profile.render_text()),
    }

    Ok(true)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "feedcheck=debug"
    } else {
        "feedcheck=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ValidationConfig {
        fields: cli.fields.into(),
        ..ValidationConfig::default()
    };

    let outcome = match cli.command {
        Commands::Validate { path, format } => run_validate(&path, format, cli.verbose, &config),
        Commands::Count { path } => run_count(&path, &config),
        Commands::Describe { path, format } => run_describe(&path, format, &config),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_CHECK_FAILED),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
