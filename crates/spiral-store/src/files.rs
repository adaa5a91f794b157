//! Whole-file JSON read/write helpers shared by every flat-file store.
//!
//! Writes go to a sibling temp file that is then renamed over the target,
//! so a crash mid-write leaves the previous contents intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Outcome of reading a JSON file that may be missing or damaged.
#[derive(Debug)]
pub enum Loaded<T> {
    Found(T),
    Missing,
    Malformed(serde_json::Error),
}

/// Read and parse `path`. Only I/O failures other than not-found are errors.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            // Not UTF-8: damaged content, not an I/O fault
            return Ok(Loaded::Malformed(serde_json::Error::io(e)));
        }
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str(&content) {
        Ok(value) => Ok(Loaded::Found(value)),
        Err(e) => Ok(Loaded::Malformed(e)),
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path`.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

/// Move a damaged file aside so a fresh file can replace it.
///
/// The first copy goes to `<name>.corrupt`, later ones to `<name>.corrupt.1`,
/// `<name>.corrupt.2`, ... so earlier quarantined files are never replaced.
pub fn quarantine(path: &Path) -> Result<PathBuf> {
    let dest = free_corrupt_path(path);
    fs::rename(path, &dest)?;
    tracing::warn!("moved malformed {} to {}", path.display(), dest.display());
    Ok(dest)
}

fn free_corrupt_path(path: &Path) -> PathBuf {
    let mut base = path.file_name().unwrap_or_default().to_os_string();
    base.push(".corrupt");
    let mut dest = path.with_file_name(&base);
    let mut n = 1u32;
    while dest.exists() {
        let mut name = base.clone();
        name.push(format!(".{n}"));
        dest = path.with_file_name(name);
        n += 1;
    }
    dest
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
