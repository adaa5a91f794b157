//! SpiralOS symbolic runtime core.
//!
//! A glyph state cycling through the fixed alphabet ∅ → ⧖ → ⟲ → Ψ, the
//! derived stability score, journal and transmission record types, and the
//! closed-form quantum glyph simulator.
//!
//! Zero I/O: persistence lives in `spiral-store`.

pub mod constants;
pub mod glyph;
pub mod journal;
pub mod simulation;
pub mod state;
pub mod time;
pub mod transmission;

pub use constants::DEFAULT_MASS0;
pub use glyph::{Glyph, UnknownGlyph};
pub use journal::{JournalEntry, tail};
pub use simulation::{DepthRange, SimulationRecord, evaporation_time, is_valid_mass, simulate};
pub use state::{GlyphState, round_to, stability_score};
pub use time::now_iso8601;
pub use transmission::{TransmissionPacket, TransmissionState, encode_packet};
