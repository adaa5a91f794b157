use std::path::{Path, PathBuf};
use std::{env, fs};

use spiral_core::{GlyphState, TransmissionState};

use crate::config::SpiralConfig;
use crate::error::Result;
use crate::journal::Journal;
use crate::state_store::GlyphStore;
use crate::transmission::TransmissionLog;

/// Default base directory for all SpiralOS files.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".spiralos")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Relative names live under `base`; absolute paths are used as given.
fn resolve_file(base: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// The data directory and every flat file inside it.
///
/// Layout:
/// ```text
/// ~/.spiralos/
/// ├── spiral.toml                (optional)
/// ├── spiral_memory.json         glyph state
/// ├── spiral_journal.json        simulation journal
/// └── spiral_transmissions.json  transmitted packets
/// ```
pub struct SpiralHome {
    base: PathBuf,
    config: SpiralConfig,
    glyphs: GlyphStore,
    journal: Journal,
    transmissions: TransmissionLog,
}

impl SpiralHome {
    /// Open the data directory, creating it as needed, and read `spiral.toml`.
    /// `base_dir`: override the base directory (for testing).
    pub fn open(base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        fs::create_dir_all(&base)?;
        let config = SpiralConfig::load(&base)?;
        Ok(Self::with_config(base, config))
    }

    /// Use an already-built config; nothing is read from disk.
    pub fn with_config(base: PathBuf, config: SpiralConfig) -> Self {
        let glyphs = GlyphStore::new(resolve_file(&base, &config.files.state));
        let journal = Journal::new(resolve_file(&base, &config.files.journal));
        let transmissions = TransmissionLog::new(resolve_file(&base, &config.files.transmissions));
        Self {
            base,
            config,
            glyphs,
            journal,
            transmissions,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config(&self) -> &SpiralConfig {
        &self.config
    }

    pub fn glyphs(&self) -> &GlyphStore {
        &self.glyphs
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn transmissions(&self) -> &TransmissionLog {
        &self.transmissions
    }

    pub fn load_state(&self) -> Result<GlyphState> {
        self.glyphs.load()
    }

    /// Fresh transmission toggles seeded from the config.
    pub fn transmission_state(&self) -> TransmissionState {
        TransmissionState::new(
            self.config.transmission.auto_transmit,
            self.config.transmission.auto_respond,
        )
    }
}
