use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct RenameConfig {
    pub photo_extensions: Vec<String>,
    pub name_prefix: String,
    pub sequence_digits: usize,
    pub sidecar_extension: String,
    pub date_format: String,
    pub capture_time_tag: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            photo_extensions: vec!["cr2".to_string(), "jpg".to_string(), "jpeg".to_string()],
            name_prefix: "img_".to_string(),
            sequence_digits: 4,
            sidecar_extension: "xmp".to_string(),
            date_format: "%Y%m%d".to_string(),
            capture_time_tag: "Image DateTime".to_string(),
        }
    }
}

impl RenameConfig {
    /// `ext` is compared without its leading dot, ignoring ASCII case.
    pub fn is_photo_extension(&self, ext: &str) -> bool {
        self.photo_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RunMode {
    Preview,
    Apply,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub directory: PathBuf,
    pub mode: RunMode,
}
