use crate::config::RenameConfig;
use serde::Serialize;
use std::fmt;

/// In-camera shot counter, kept as text so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceNumber(String);

impl SequenceNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Matched(SequenceNumber),
    NotApplicable,
}

#[derive(Debug, Clone, Copy)]
pub struct NameMatcher<'a> {
    config: &'a RenameConfig,
}

impl<'a> NameMatcher<'a> {
    pub fn new(config: &'a RenameConfig) -> Self {
        Self { config }
    }

    /// Matches `<prefix><digits>.<photo ext>` against a bare file name.
    pub fn match_name(&self, file_name: &str) -> NameMatch {
        self.sequence_number(file_name)
            .map(NameMatch::Matched)
            .unwrap_or(NameMatch::NotApplicable)
    }

    fn sequence_number(&self, file_name: &str) -> Option<SequenceNumber> {
        let prefix = &self.config.name_prefix;
        let head = file_name.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }

        let rest = &file_name[prefix.len()..];
        let digits = self.config.sequence_digits;
        let number = rest.get(..digits)?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let ext = rest[digits..].strip_prefix('.')?;
        if !self.config.is_photo_extension(ext) {
            return None;
        }

        Some(SequenceNumber(number.to_string()))
    }
}
