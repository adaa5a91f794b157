use std::path::{Path, PathBuf};

use spiral_core::{Glyph, JournalEntry, SimulationRecord};

use crate::append_log::AppendLog;
use crate::error::{Result, StoreError};

/// Append-only record of simulation outputs.
pub struct Journal {
    log: AppendLog<JournalEntry>,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            log: AppendLog::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.log.path()
    }

    /// Append one timestamped entry and return it.
    /// Non-finite readings are rejected and nothing is written.
    pub fn record(&self, glyph: Glyph, fidelity: f64, entropy: f64) -> Result<JournalEntry> {
        let entry = JournalEntry::new(glyph, fidelity, entropy);
        check_finite(&entry)?;
        self.log.append(entry.clone())?;
        Ok(entry)
    }

    /// Record every simulation output in order, in one write.
    /// If any record is non-finite the whole batch is rejected.
    pub fn record_simulation(&self, records: &[SimulationRecord]) -> Result<Vec<JournalEntry>> {
        let entries: Vec<JournalEntry> = records
            .iter()
            .map(|r| JournalEntry::new(r.glyph, r.fidelity, r.entropy))
            .collect();
        entries.iter().try_for_each(check_finite)?;
        self.log.extend(entries.iter().cloned())?;
        tracing::debug!("journaled {} simulation records", entries.len());
        Ok(entries)
    }

    /// The last `n` entries, most recent last. Empty if nothing was recorded.
    pub fn read_recent(&self, n: usize) -> Result<Vec<JournalEntry>> {
        self.log.read_recent(n)
    }

    pub fn len(&self) -> Result<usize> {
        self.log.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.log.is_empty()
    }
}

fn check_finite(entry: &JournalEntry) -> Result<()> {
    if entry.is_finite() {
        return Ok(());
    }
    Err(StoreError::InvalidData(format!(
        "non-finite journal reading for {}: fidelity={}, entropy={}",
        entry.glyph, entry.fidelity, entry.entropy
    )))
}
