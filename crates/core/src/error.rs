use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file failures. None of these stop the scan of a directory.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Provided path ({}) is not a file!", .0.display())]
    PathNotAFile(PathBuf),
    #[error("No image number found on {0}!")]
    SequenceNumberUnresolvable(String),
    #[error("No capture date/time ({tag}) in {}", .path.display())]
    MetadataMissing { path: PathBuf, tag: String },
    #[error("Capture date/time {value:?} in {} is not YYYY:MM:DD HH:MM:SS", .path.display())]
    MetadataMalformed { path: PathBuf, value: String },
    #[error("Target already exists, refusing to overwrite: {}", .0.display())]
    RenameCollision(PathBuf),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Expected non-matches. These are skipped without telling the user.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SkipReason {
    NotAPhoto,
    PatternMismatch,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("could not open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no readable metadata in {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}
