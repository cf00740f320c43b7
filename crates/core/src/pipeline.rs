use crate::apply::{execute, FileOutcome};
use crate::config::{RenameConfig, RunMode, RunOptions};
use crate::error::{FileError, SkipReason};
use crate::matcher::{NameMatch, NameMatcher};
use crate::metadata::{MetadataBackend, MetadataResolver};
use crate::planner::{plan_rename, Candidate};
use crate::sidecar::find_companion;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Serialize, Default)]
pub struct RunStats {
    pub scanned: usize,
    pub skipped: usize,
    pub previewed: usize,
    pub renamed: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub directory: PathBuf,
    pub mode: RunMode,
    pub entries: Vec<(PathBuf, FileOutcome)>,
    pub stats: RunStats,
}

impl RunReport {
    fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Skipped(_) => self.stats.skipped += 1,
            FileOutcome::Previewed(_) => self.stats.previewed += 1,
            FileOutcome::Renamed(_) => self.stats.renamed += 1,
            FileOutcome::Failed { .. } => self.stats.failed += 1,
        }
        self.entries.push((path, outcome));
    }
}

/// Processes every regular file in `options.directory`, one at a time.
/// Only a missing or unreadable directory is an error; per-file problems land in the report.
pub fn run(
    options: &RunOptions,
    config: &RenameConfig,
    backend: &dyn MetadataBackend,
) -> Result<RunReport> {
    run_with_progress(options, config, backend, |_, _| {})
}

/// Same as [`run`], calling `on_outcome` as soon as each file is finished.
pub fn run_with_progress<F>(
    options: &RunOptions,
    config: &RenameConfig,
    backend: &dyn MetadataBackend,
    mut on_outcome: F,
) -> Result<RunReport>
where
    F: FnMut(&Path, &FileOutcome),
{
    let directory = fs::canonicalize(&options.directory)
        .with_context(|| format!("Directory does not exist: {}", options.directory.display()))?;
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let files = collect_files(&directory)?;
    let mut report = RunReport {
        directory,
        mode: options.mode,
        entries: Vec::with_capacity(files.len()),
        stats: RunStats::default(),
    };

    for path in files {
        // A companion moved by an earlier candidate in this run is gone by now.
        if !path.is_file() {
            debug!(path = %path.display(), "entry disappeared during run");
            continue;
        }
        report.stats.scanned += 1;
        let outcome = process_file(&path, config, backend, options.mode);
        on_outcome(&path, &outcome);
        report.record(path, outcome);
    }

    Ok(report)
}

fn collect_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("Could not read directory: {}", directory.display()))?
    {
        let entry =
            entry.with_context(|| format!("Could not read entry in: {}", directory.display()))?;
        let path = entry.path();
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

pub fn process_file(
    path: &Path,
    config: &RenameConfig,
    backend: &dyn MetadataBackend,
    mode: RunMode,
) -> FileOutcome {
    match try_process_file(path, config, backend, mode) {
        Ok(outcome) => outcome,
        Err(error) => {
            debug!(path = %path.display(), error = %error, "file failed");
            FileOutcome::Failed {
                path: path.to_path_buf(),
                error,
            }
        }
    }
}

fn try_process_file(
    path: &Path,
    config: &RenameConfig,
    backend: &dyn MetadataBackend,
    mode: RunMode,
) -> Result<FileOutcome, FileError> {
    if !path.is_file() {
        return Err(FileError::PathNotAFile(path.to_path_buf()));
    }

    let is_photo = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| config.is_photo_extension(ext))
        .unwrap_or(false);
    if !is_photo {
        debug!(path = %path.display(), "not a photo");
        return Ok(FileOutcome::Skipped(SkipReason::NotAPhoto));
    }

    // The name pattern is ASCII, so a name that is not UTF-8 can never match it.
    let Some(candidate) = Candidate::from_path(path) else {
        debug!(path = %path.display(), "name is not valid UTF-8");
        return Ok(FileOutcome::Skipped(SkipReason::PatternMismatch));
    };

    let sequence = match NameMatcher::new(config).match_name(&candidate.file_name) {
        NameMatch::Matched(sequence) => sequence,
        NameMatch::NotApplicable => {
            debug!(path = %path.display(), "name does not match source pattern");
            return Ok(FileOutcome::Skipped(SkipReason::PatternMismatch));
        }
    };

    let timestamp = MetadataResolver::new(config, backend).resolve(path)?;
    let companion = find_companion(path, config);
    let plan = plan_rename(&sequence, &timestamp, &candidate, companion, config);
    debug!(
        from = %plan.source.display(),
        to = %plan.target.display(),
        companion = plan.companion_source.is_some(),
        "planned rename"
    );

    execute(plan, mode)
}
