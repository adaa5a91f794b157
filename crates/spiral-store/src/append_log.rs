use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use spiral_core::tail;

use crate::error::Result;
use crate::files::{Loaded, quarantine, read_json, write_json_atomic};

/// A JSON array on disk that only ever grows.
///
/// Each append rereads and rewrites the whole array. A damaged file is
/// moved aside on the next append and a new array is started.
pub struct AppendLog<T> {
    path: PathBuf,
    _entry: PhantomData<T>,
}

impl<T: Clone + Serialize + DeserializeOwned> AppendLog<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entry: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in append order. Missing or malformed reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>> {
        match read_json::<Vec<T>>(&self.path)? {
            Loaded::Found(entries) => Ok(entries),
            Loaded::Missing => Ok(Vec::new()),
            Loaded::Malformed(e) => {
                tracing::warn!("malformed log {}: {e}; reading as empty", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    /// The last `n` entries, most recent last.
    pub fn read_recent(&self, n: usize) -> Result<Vec<T>> {
        let entries = self.read_all()?;
        Ok(tail(&entries, n).to_vec())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn append(&self, entry: T) -> Result<()> {
        self.extend(std::iter::once(entry))
    }

    /// Append several entries with a single rewrite.
    pub fn extend(&self, new_entries: impl IntoIterator<Item = T>) -> Result<()> {
        let mut entries = match read_json::<Vec<T>>(&self.path)? {
            Loaded::Found(entries) => entries,
            Loaded::Missing => {
                tracing::info!("creating {}", self.path.display());
                Vec::new()
            }
            Loaded::Malformed(e) => {
                tracing::warn!("malformed log {}: {e}", self.path.display());
                quarantine(&self.path)?;
                Vec::new()
            }
        };
        entries.extend(new_entries);
        write_json_atomic(&self.path, &entries)
    }
}
