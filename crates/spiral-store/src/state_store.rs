use std::path::{Path, PathBuf};

use spiral_core::{Glyph, GlyphState};

use crate::error::Result;
use crate::files::{Loaded, read_json, write_json_atomic};

/// Glyph state persisted as a single JSON document, overwritten on every save.
pub struct GlyphStore {
    path: PathBuf,
}

impl GlyphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state.
    ///
    /// A missing file, unparseable JSON, an unknown glyph symbol, or a history
    /// that does not end in the current glyph all yield the fresh default
    /// state. Only I/O failures other than not-found are errors.
    pub fn load(&self) -> Result<GlyphState> {
        match read_json::<GlyphState>(&self.path)? {
            Loaded::Found(state) if state.is_consistent() => Ok(state),
            Loaded::Found(state) => {
                tracing::warn!(
                    "state in {} is inconsistent (current {} vs history tail {:?}); reinitializing",
                    self.path.display(),
                    state.current_glyph,
                    state.history.last().map(|g| g.symbol()),
                );
                Ok(GlyphState::new())
            }
            Loaded::Missing => {
                tracing::info!("no state at {}; starting fresh", self.path.display());
                Ok(GlyphState::new())
            }
            Loaded::Malformed(e) => {
                tracing::warn!(
                    "malformed state in {}: {e}; reinitializing",
                    self.path.display()
                );
                Ok(GlyphState::new())
            }
        }
    }

    /// Overwrite the file with the full state.
    pub fn save(&self, state: &GlyphState) -> Result<()> {
        write_json_atomic(&self.path, state)
    }

    /// Advance `state` one step through the cycle and persist it.
    /// Returns the new current glyph. `state` is left untouched if the
    /// save fails.
    pub fn advance(&self, state: &mut GlyphState) -> Result<Glyph> {
        let mut advanced = state.clone();
        let next = advanced.advance();
        self.save(&advanced)?;
        *state = advanced;
        tracing::debug!("advanced to {next} (history length {})", state.history.len());
        Ok(next)
    }

    /// Load, advance once, persist, and return the updated state.
    pub fn advance_stored(&self) -> Result<GlyphState> {
        let mut state = self.load()?;
        self.advance(&mut state)?;
        Ok(state)
    }
}
