//! Replace-on-success writes.
//!
//! Output is written to a temporary file next to the destination and renamed
//! over it only once it is complete, so readers never observe a half-written
//! table.

use std::fs::{self, Permissions};
use std::path::Path;

use scansheet_common::error::{Error, Result};
use tempfile::NamedTempFile;
use tracing::debug;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Runs `write` against a scratch file and moves it to `path` if it succeeds.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> std::result::Result<(), BoxError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::sink_write(path, e))?;
    write(&mut file).map_err(|e| Error::sink_write(path, e))?;
    if let Some(permissions) = target_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::sink_write(path, e))?;
    }
    file.as_file()
        .sync_all()
        .map_err(|e| Error::sink_write(path, e))?;

    debug!(from = %file.path().display(), to = %path.display(), "replacing output");
    file.persist(path)
        .map_err(|e| Error::sink_write(path, e.error))?;
    Ok(())
}

/// Mode the finished file should carry: the one of the file it replaces, or
/// the usual mode of a newly created file. Scratch files start owner-only.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
