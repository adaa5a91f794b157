//! `spiral.toml`: file names, simulation defaults and transmission toggles.
//! Every field is optional; a missing file means all defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spiral_core::DepthRange;
use spiral_core::constants::{
    DEFAULT_DEPTH_END, DEFAULT_DEPTH_START, DEFAULT_DEPTH_STEP, DEFAULT_MASS0,
};

use crate::error::Result;

pub const CONFIG_FILE: &str = "spiral.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub files: FilesConfig,
    pub simulation: SimulationConfig,
    pub transmission: TransmissionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub state: String,
    pub journal: String,
    pub transmissions: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            state: "spiral_memory.json".to_string(),
            journal: "spiral_journal.json".to_string(),
            transmissions: "spiral_transmissions.json".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub mass0: f64,
    pub depth_start: u32,
    pub depth_end: u32,
    pub depth_step: u32,
}

impl SimulationConfig {
    pub fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.depth_start, self.depth_end, self.depth_step)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mass0: DEFAULT_MASS0,
            depth_start: DEFAULT_DEPTH_START,
            depth_end: DEFAULT_DEPTH_END,
            depth_step: DEFAULT_DEPTH_STEP,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionConfig {
    pub auto_transmit: bool,
    pub auto_respond: bool,
}

impl SpiralConfig {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `spiral.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse(&content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = SpiralConfig::load(dir.path()).unwrap();
        assert_eq!(config, SpiralConfig::default());
        assert_eq!(config.files.state, "spiral_memory.json");
        assert_eq!(config.simulation.depth_range(), DepthRange::default());
    }

    #[test]
    fn test_partial_config() {
        let config = SpiralConfig::parse(
            r#"
[simulation]
mass0 = 2e30
depth_step = 25

[transmission]
auto_respond = true
"#,
        )
        .unwrap();
        assert_eq!(config.simulation.mass0, 2e30);
        assert_eq!(config.simulation.depth_start, DEFAULT_DEPTH_START);
        assert_eq!(config.simulation.depth_step, 25);
        assert!(config.transmission.auto_respond);
        assert!(!config.transmission.auto_transmit);
        assert_eq!(config.files, FilesConfig::default());
    }

    #[test]
    fn test_file_names_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[files]\njournal = \"log.json\"\n",
        )
        .unwrap();
        let config = SpiralConfig::load(dir.path()).unwrap();
        assert_eq!(config.files.journal, "log.json");
        assert_eq!(config.files.state, "spiral_memory.json");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = SpiralConfig::parse("[simulation]\nmass0 = \"heavy\"\n").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
