use crate::config::RenameConfig;
use crate::matcher::SequenceNumber;
use crate::metadata::CaptureTimestamp;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub file_name: String,
    /// Lower-cased, without the leading dot.
    pub extension: String,
}

impl Candidate {
    /// `None` when the name or extension is not valid UTF-8.
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Some(Self {
            path: path.to_path_buf(),
            file_name,
            extension,
        })
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub source: PathBuf,
    pub target: PathBuf,
    pub companion_source: Option<PathBuf>,
    pub companion_target: Option<PathBuf>,
}

impl RenamePlan {
    pub fn source_name(&self) -> String {
        file_name_of(&self.source)
    }

    pub fn target_name(&self) -> String {
        file_name_of(&self.target)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|v| v.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn canonical_base_name(
    sequence: &SequenceNumber,
    timestamp: &CaptureTimestamp,
    config: &RenameConfig,
) -> String {
    format!(
        "{}_{}{}",
        timestamp.format(&config.date_format),
        config.name_prefix.to_ascii_lowercase(),
        sequence
    )
}

pub fn plan_rename(
    sequence: &SequenceNumber,
    timestamp: &CaptureTimestamp,
    candidate: &Candidate,
    companion: Option<PathBuf>,
    config: &RenameConfig,
) -> RenamePlan {
    let base = canonical_base_name(sequence, timestamp, config);
    let dir = candidate.directory();
    let target = dir.join(format!("{}.{}", base, candidate.extension));
    let companion_target = companion.as_ref().map(|_| {
        dir.join(format!(
            "{}.{}",
            base,
            config.sidecar_extension.to_ascii_lowercase()
        ))
    });

    RenamePlan {
        source: candidate.path.clone(),
        target,
        companion_source: companion,
        companion_target,
    }
}
