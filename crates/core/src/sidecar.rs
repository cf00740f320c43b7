use crate::config::RenameConfig;
use crate::error::FileError;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Probes `<stem>.<ext>` then `<stem>.<EXT>` next to `photo`. Other casings are not searched.
pub fn find_companion(photo: &Path, config: &RenameConfig) -> Option<PathBuf> {
    let dir = photo.parent()?;
    let stem = photo.file_stem()?.to_string_lossy();
    let ext = &config.sidecar_extension;

    [ext.to_ascii_lowercase(), ext.to_ascii_uppercase()]
        .into_iter()
        .map(|variant| dir.join(format!("{}.{}", stem, variant)))
        .find(|candidate| candidate.is_file())
}

/// Copies the companion to `target` with every literal `old_name` replaced by `new_name`,
/// then removes `source`. `source` is left alone unless the new file was fully written.
pub fn rewrite_companion(
    source: &Path,
    target: &Path,
    old_name: &str,
    new_name: &str,
) -> Result<(), FileError> {
    let text = fs::read_to_string(source).map_err(|err| {
        FileError::io(format!("could not read companion {}", source.display()), err)
    })?;
    let rewritten = text.replace(old_name, new_name);
    debug!(
        source = %source.display(),
        replaced = text.matches(old_name).count(),
        "rewriting companion"
    );

    write_new_file(target, rewritten.as_bytes())?;

    fs::remove_file(source).map_err(|err| {
        FileError::io(
            format!("could not remove old companion {}", source.display()),
            err,
        )
    })
}

fn write_new_file(target: &Path, body: &[u8]) -> Result<(), FileError> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Err(FileError::RenameCollision(target.to_path_buf()));
        }
        Err(err) => {
            return Err(FileError::io(
                format!("could not create companion {}", target.display()),
                err,
            ));
        }
    };

    let written = file.write_all(body).and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        let _ = fs::remove_file(target);
        return Err(FileError::io(
            format!("could not write companion {}", target.display()),
            err,
        ));
    }
    Ok(())
}
