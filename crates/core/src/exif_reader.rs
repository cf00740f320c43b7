use crate::error::MetadataError;
use crate::metadata::MetadataBackend;
use exif::{Context, Field, In, Reader, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads EXIF from JPEG, TIFF and TIFF-based RAW containers such as CR2.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifBackend;

impl MetadataBackend for ExifBackend {
    fn read_tags(&self, path: &Path) -> Result<BTreeMap<String, String>, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut buf = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut buf)
            .map_err(|err| MetadataError::Unreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let mut tags = BTreeMap::new();
        for field in exif.fields() {
            tags.entry(tag_key(field))
                .or_insert_with(|| field_text(field, &exif));
        }
        Ok(tags)
    }
}

fn tag_key(field: &Field) -> String {
    let group = match field.tag.context() {
        Context::Tiff if field.ifd_num == In::THUMBNAIL => "Thumbnail",
        Context::Tiff => "Image",
        Context::Exif => "EXIF",
        Context::Gps => "GPS",
        Context::Interop => "Interoperability",
        _ => "Unknown",
    };
    format!("{} {}", group, field.tag)
}

// The display form rewrites DateTime as "YYYY-MM-DD", so ASCII stays raw.
fn field_text(field: &Field, exif: &exif::Exif) -> String {
    match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .unwrap_or_default(),
        _ => field.display_value().with_unit(exif).to_string(),
    }
}
