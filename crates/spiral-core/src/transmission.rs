//! Fabricated "transmission" packets and the toggles that drive them.
//!
//! Nothing is sent anywhere: packets are remembered in a caller-owned
//! [`TransmissionState`] and, by the store, appended to a local log.

use serde::{Deserialize, Serialize};

use crate::glyph::Glyph;
use crate::state::round_to;
use crate::time::now_iso8601;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransmissionPacket {
    pub glyph: Glyph,
    pub entropy: f64,
    pub fidelity: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub time: String,
}

/// Build a packet stamped with the current time.
pub fn encode_packet(glyph: Glyph, entropy: f64, fidelity: f64, message: &str) -> TransmissionPacket {
    TransmissionPacket {
        glyph,
        entropy,
        fidelity,
        message: message.to_string(),
        time: now_iso8601(),
    }
}

impl TransmissionPacket {
    /// One-line log rendering: `⇄ TX ⟲ | Y=0.05 | F=0.98`.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "⇄ TX {} | Y={:.4} | F={:.4}",
            self.glyph, self.entropy, self.fidelity
        );
        if !self.message.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.message);
        }
        line
    }
}

/// Toggles plus the last packet sent. Owned by whoever drives the session.
#[derive(Clone, Debug, Default)]
pub struct TransmissionState {
    pub auto_transmit: bool,
    pub auto_respond: bool,
    pub last_packet: Option<TransmissionPacket>,
}

impl TransmissionState {
    pub fn new(auto_transmit: bool, auto_respond: bool) -> Self {
        Self {
            auto_transmit,
            auto_respond,
            last_packet: None,
        }
    }

    pub fn transmit(&mut self, packet: TransmissionPacket) {
        self.last_packet = Some(packet);
    }

    /// Response text for the last packet, if any was sent.
    pub fn respond_to_last(&self) -> Option<String> {
        self.last_packet
            .as_ref()
            .map(|p| format!("Response to {}", p.glyph))
    }

    /// `1 - |entropy - fidelity|` of the last packet, 3 decimals; 0 when none.
    pub fn packet_stability(&self) -> f64 {
        match &self.last_packet {
            Some(p) => round_to(1.0 - (p.entropy - p.fidelity).abs()),
            None => 0.0,
        }
    }

    pub fn toggle_auto_transmit(&mut self) -> bool {
        self.auto_transmit = !self.auto_transmit;
        self.auto_transmit
    }

    pub fn toggle_auto_respond(&mut self) -> bool {
        self.auto_respond = !self.auto_respond;
        self.auto_respond
    }
}
