pub mod append_log;
pub mod config;
pub mod error;
pub mod files;
pub mod home;
pub mod journal;
pub mod state_store;
pub mod transmission;

pub use append_log::AppendLog;
pub use config::SpiralConfig;
pub use error::{Result, StoreError};
pub use home::{SpiralHome, default_base_dir};
pub use journal::Journal;
pub use state_store::GlyphStore;
pub use transmission::TransmissionLog;
