mod apply;
mod config;
mod error;
mod exif_reader;
mod matcher;
mod metadata;
mod pipeline;
mod planner;
mod sidecar;

pub use apply::{execute, rename_pairs, FileOutcome};
pub use config::{RenameConfig, RunMode, RunOptions};
pub use error::{FileError, MetadataError, SkipReason};
pub use exif_reader::ExifBackend;
pub use matcher::{NameMatch, NameMatcher, SequenceNumber};
pub use metadata::{CaptureTimestamp, MetadataBackend, MetadataResolver};
pub use pipeline::{process_file, run, run_with_progress, RunReport, RunStats};
pub use planner::{canonical_base_name, plan_rename, Candidate, RenamePlan};
pub use sidecar::{find_companion, rewrite_companion};
