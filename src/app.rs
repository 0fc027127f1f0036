//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging for the non-interactive commands
//! - loads the dataset (or the sample) and runs the pipeline
//! - prints the dashboard or writes the export

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::picker::validate_csv_path;
use crate::cli::{Command, ExportArgs, FilterArgs, SummaryArgs, TuiArgs};
use crate::error::AppError;
use crate::io::ingest::{LoadOutcome, load_path};

pub mod pipeline;

/// Entry point for the `chdash` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // We want `chdash` and `chdash -f data.csv` to behave like `chdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Summary(args) => {
            init_logging();
            handle_summary(args)
        }
        Command::Export(args) => {
            init_logging();
            handle_export(args)
        }
        Command::Tui(args) => handle_tui(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// Not used by the TUI: it owns the terminal and shows warnings in its status bar.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Validate `--file` and load it, or the sample when absent.
pub fn load_from_args(args: &FilterArgs) -> Result<LoadOutcome, AppError> {
    let path = args.file.as_deref().map(validate_csv_path).transpose()?;
    Ok(load_path(path.as_deref()))
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let loaded = load_from_args(&args.filter)?;
    if let Some(warning) = &loaded.warning {
        eprintln!("warning: {warning}; showing sample data");
    }

    let config = args.to_config();
    let run = pipeline::run_dashboard(&loaded, &config);
    println!("{}", crate::report::format_dashboard(&run, &config, &args.layout()));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let loaded = load_from_args(&args.filter)?;
    if let Some(warning) = &loaded.warning {
        eprintln!("warning: {warning}; exporting sample data");
    }

    let config = args.to_config();
    let run = pipeline::run_dashboard(&loaded, &config);
    let out = args.out_path();
    crate::io::export::write_export(&out, &run.resampled, config.export_format)?;

    println!(
        "Wrote {} rows ({}, {}) to {}",
        run.resampled.len(),
        config.export_format.display_name(),
        config.export_format.mime_type(),
        out.display()
    );
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Rewrite argv so `chdash` defaults to `chdash tui`.
///
/// Rules:
/// - `chdash`                      -> `chdash tui`
/// - `chdash -f data.csv ...`      -> `chdash tui -f data.csv ...`
/// - `chdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
