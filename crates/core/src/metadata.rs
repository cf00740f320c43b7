use crate::config::RenameConfig;
use crate::error::{FileError, MetadataError};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const CAPTURE_TIME_LAYOUT: &str = "%Y:%m:%d %H:%M:%S";

/// Source of tag-name -> text mappings for a photo file.
pub trait MetadataBackend {
    fn read_tags(&self, path: &Path) -> Result<BTreeMap<String, String>, MetadataError>;
}

/// Wall-clock capture time exactly as the camera recorded it, no zone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureTimestamp(NaiveDateTime);

impl CaptureTimestamp {
    /// Accepts only `YYYY:MM:DD HH:MM:SS`; trailing NUL padding and whitespace are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
        if !has_capture_layout(text) {
            return None;
        }
        NaiveDateTime::parse_from_str(text, CAPTURE_TIME_LAYOUT)
            .ok()
            .map(Self)
    }

    pub fn format(&self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

fn has_capture_layout(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b':',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

pub struct MetadataResolver<'a> {
    config: &'a RenameConfig,
    backend: &'a dyn MetadataBackend,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(config: &'a RenameConfig, backend: &'a dyn MetadataBackend) -> Self {
        Self { config, backend }
    }

    pub fn resolve(&self, path: &Path) -> Result<CaptureTimestamp, FileError> {
        let missing = || FileError::MetadataMissing {
            path: path.to_path_buf(),
            tag: self.config.capture_time_tag.clone(),
        };

        let tags = match self.backend.read_tags(path) {
            Ok(tags) => tags,
            Err(err) => {
                debug!(error = %err, "metadata backend failed");
                return Err(missing());
            }
        };

        let raw = tags.get(&self.config.capture_time_tag).ok_or_else(missing)?;
        CaptureTimestamp::parse(raw).ok_or_else(|| FileError::MetadataMalformed {
            path: path.to_path_buf(),
            value: raw.clone(),
        })
    }
}
