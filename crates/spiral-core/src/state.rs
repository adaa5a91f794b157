use serde::{Deserialize, Serialize};

use crate::constants::SCORE_DECIMALS;
use crate::glyph::Glyph;
use crate::time::now_iso8601;

/// Current glyph plus the full, append-only history of glyphs visited.
///
/// Invariant: `current_glyph` equals the last element of `history`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphState {
    pub current_glyph: Glyph,
    pub history: Vec<Glyph>,
    /// Time of the last mutation. Advisory only.
    #[serde(default)]
    pub timestamp: String,
}

impl GlyphState {
    /// Fresh state: `∅` with history `[∅]`.
    pub fn new() -> Self {
        Self {
            current_glyph: Glyph::Void,
            history: vec![Glyph::Void],
            timestamp: now_iso8601(),
        }
    }

    /// Whether the history is non-empty and ends in the current glyph.
    pub fn is_consistent(&self) -> bool {
        self.history.last() == Some(&self.current_glyph)
    }

    /// Step to the next glyph in the cycle and append it to history.
    /// Returns the new current glyph.
    pub fn advance(&mut self) -> Glyph {
        let next = self.current_glyph.next();
        self.current_glyph = next;
        self.history.push(next);
        self.timestamp = now_iso8601();
        next
    }

    /// Number of times `glyph` appears in history.
    pub fn occurrences(&self, glyph: Glyph) -> usize {
        self.history.iter().filter(|&&g| g == glyph).count()
    }

    /// History rendered as `∅ → ⧖ → ⟲`.
    pub fn history_line(&self) -> String {
        self.history
            .iter()
            .map(|g| g.symbol())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl Default for GlyphState {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency of the current glyph within history, rounded to 3 decimals.
/// Range: [0, 1].
pub fn stability_score(state: &GlyphState) -> f64 {
    let total = state.history.len().max(1);
    round_to(state.occurrences(state.current_glyph) as f64 / total as f64)
}

/// Round to the score precision used across derived metrics.
pub fn round_to(value: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (value * scale).round() / scale
}
