use anyhow::Result;
use clap::Parser;
use img_date_renamer_core::{
    rename_pairs, run_with_progress, ExifBackend, FileOutcome, RenameConfig, RunMode, RunOptions,
    RunReport,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "img-date-renamer-cli")]
#[command(about = "Renames img_NNNN photos (and .xmp sidecars) to YYYYMMDD_img_NNNN")]
struct Cli {
    /// Directory to work on.
    directory: PathBuf,
    /// Print the renames without touching any file.
    #[arg(short = 'n', long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let options = RunOptions {
        directory: cli.directory,
        mode: if cli.dry_run {
            RunMode::Preview
        } else {
            RunMode::Apply
        },
    };

    let config = RenameConfig::default();
    let report = run_with_progress(&options, &config, &ExifBackend, |_, outcome| {
        print_outcome(outcome)
    })?;
    print_summary(&report);
    Ok(())
}

fn print_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Previewed(plan) => {
            for (from, to) in rename_pairs(plan) {
                println!("Rename: {} -> {}", from.display(), to.display());
            }
        }
        FileOutcome::Failed { error, .. } => eprintln!("Error! {}", error),
        FileOutcome::Renamed(_) | FileOutcome::Skipped(_) => {}
    }
}

fn print_summary(report: &RunReport) {
    let stats = &report.stats;
    match report.mode {
        RunMode::Preview => eprintln!(
            "dry-run: {} to rename, {} failed, {} skipped. Nothing was changed.",
            stats.previewed, stats.failed, stats.skipped
        ),
        RunMode::Apply => eprintln!(
            "done: {} renamed, {} failed, {} skipped",
            stats.renamed, stats.failed, stats.skipped
        ),
    }
}
