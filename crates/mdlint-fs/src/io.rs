//! Create-only writes with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write `content` to a file that must not exist yet.
///
/// The file is opened with `create_new`, so an existing file (including one
/// created concurrently between a caller's existence check and this call)
/// is reported as [`Error::AlreadyExists`] and left untouched.
pub fn write_new(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&native_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => Error::AlreadyExists {
                path: native_path.clone(),
            },
            _ => Error::io(&native_path, e),
        })?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    file.write_all(content)
        .map_err(|e| Error::io(&native_path, e))?;

    file.sync_all().map_err(|e| Error::io(&native_path, e))?;

    file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    tracing::debug!(path = %path, bytes = content.len(), "Created file");
    Ok(())
}

/// Write text content to a file that must not exist yet.
pub fn write_new_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_new(path, content.as_bytes())
}
