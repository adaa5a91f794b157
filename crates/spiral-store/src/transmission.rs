use std::path::{Path, PathBuf};

use spiral_core::{TransmissionPacket, TransmissionState, encode_packet};

use crate::append_log::AppendLog;
use crate::error::Result;

/// Local append-only file standing in for a transmission channel.
pub struct TransmissionLog {
    log: AppendLog<TransmissionPacket>,
}

impl TransmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            log: AppendLog::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.log.path()
    }

    /// Send `packet`: remember it in `state` and append it to the log.
    /// With auto-respond on, a response packet is logged right after it.
    /// Returns every packet written, in order.
    pub fn transmit(
        &self,
        state: &mut TransmissionState,
        packet: TransmissionPacket,
    ) -> Result<Vec<TransmissionPacket>> {
        tracing::info!("{}", packet.summary());
        state.transmit(packet.clone());

        let mut written = vec![packet];
        if state.auto_respond
            && let Some(reply) = state.respond_to_last()
        {
            tracing::info!("↺ RX {reply}");
            let response = {
                let sent = &written[0];
                encode_packet(sent.glyph, sent.entropy, sent.fidelity, &reply)
            };
            written.push(response);
        }

        self.log.extend(written.iter().cloned())?;
        Ok(written)
    }

    pub fn read_recent(&self, n: usize) -> Result<Vec<TransmissionPacket>> {
        self.log.read_recent(n)
    }
}
