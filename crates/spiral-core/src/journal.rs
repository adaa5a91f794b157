use serde::{Deserialize, Serialize};

use crate::glyph::Glyph;
use crate::time::now_iso8601;

/// One recorded simulation output. Entries are append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub glyph: Glyph,
    pub fidelity: f64,
    pub entropy: f64,
    pub timestamp: String,
}

impl JournalEntry {
    /// Entry stamped with the current time.
    pub fn new(glyph: Glyph, fidelity: f64, entropy: f64) -> Self {
        Self {
            glyph,
            fidelity,
            entropy,
            timestamp: now_iso8601(),
        }
    }

    /// JSON has no encoding for NaN or infinity, so only finite readings
    /// can be written to a journal.
    pub fn is_finite(&self) -> bool {
        self.fidelity.is_finite() && self.entropy.is_finite()
    }
}

/// The last `n` items of an append-ordered slice, most recent last.
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
