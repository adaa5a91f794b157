//! Operations shared by the one-shot subcommands and the interactive shell.
//! Everything writes to a caller-supplied `Write` so the shell can be tested.

use std::io::Write;

use anyhow::{Context, Result};
use spiral_core::{
    Glyph, GlyphState, JournalEntry, TransmissionPacket, TransmissionState, encode_packet,
    evaporation_time, is_valid_mass, simulate, stability_score,
};
use spiral_store::SpiralHome;

#[derive(Clone, Debug, Default)]
pub struct SimulateOptions {
    /// Glyph to simulate; the current state glyph when unset.
    pub glyph: Option<Glyph>,
    /// Initial mass; the configured mass when unset.
    pub mass0: Option<f64>,
    /// Transmit every record even when auto-transmit is off.
    pub transmit: bool,
}

/// One user's view of the data directory: loaded glyph state plus the
/// transmission toggles for this run.
pub struct Session {
    home: SpiralHome,
    state: GlyphState,
    tx: TransmissionState,
}

impl Session {
    pub fn open(home: SpiralHome) -> Result<Self> {
        let state = home.load_state().context("failed to load glyph state")?;
        let tx = home.transmission_state();
        Ok(Self { home, state, tx })
    }

    pub fn state(&self) -> &GlyphState {
        &self.state
    }

    pub fn transmission(&self) -> &TransmissionState {
        &self.tx
    }

    pub fn expand(&mut self, out: &mut impl Write) -> Result<()> {
        let next = self
            .home
            .glyphs()
            .advance(&mut self.state)
            .context("failed to save glyph state")?;
        writeln!(out, "[⟲] spiral expands → {next}")?;
        writeln!(out, "history:   {}", self.state.history_line())?;
        Ok(())
    }

    pub fn simulate(&mut self, opts: &SimulateOptions, out: &mut impl Write) -> Result<()> {
        let sim = &self.home.config().simulation;
        let glyph = opts.glyph.unwrap_or(self.state.current_glyph);
        let mass0 = opts.mass0.unwrap_or(sim.mass0);
        anyhow::ensure!(
            is_valid_mass(mass0),
            "mass must be a positive finite number, got {mass0}"
        );
        let depths = sim.depth_range().depths();

        writeln!(
            out,
            "[Ψ] simulating {glyph}: mass0={mass0:.3e} kg, τ_evap={:.3e} s, {} depths",
            evaporation_time(mass0),
            depths.len()
        )?;
        let records = simulate(mass0, &depths, glyph);
        for r in &records {
            writeln!(
                out,
                "  ψ={:<5} mass={:.3e} T={:.3e} γ={:+.5} F={:.5} S={:.5}",
                r.depth, r.mass, r.temperature, r.gamma, r.fidelity, r.entropy
            )?;
        }

        let entries = self
            .home
            .journal()
            .record_simulation(&records)
            .context("failed to write journal")?;
        writeln!(out, "journaled {} entries", entries.len())?;

        if opts.transmit || self.tx.auto_transmit {
            for r in &records {
                let packet = encode_packet(r.glyph, r.entropy, r.fidelity, &format!("ψ={}", r.depth));
                self.send(packet, out)?;
            }
        }
        Ok(())
    }

    pub fn memory(&self, recent: usize, out: &mut impl Write) -> Result<()> {
        let journal = self.home.journal();
        let total = journal.len().context("failed to read journal")?;

        writeln!(out, "glyph:     {}", self.state.current_glyph)?;
        writeln!(out, "history:   {}", self.state.history_line())?;
        writeln!(out, "stability: {:.3}", stability_score(&self.state))?;
        writeln!(out, "journal:   {total} entries")?;

        let entries = journal
            .read_recent(recent)
            .context("failed to read journal")?;
        write_entries(&entries, out)
    }

    pub fn journal(&self, last: usize, out: &mut impl Write) -> Result<()> {
        let entries = self
            .home
            .journal()
            .read_recent(last)
            .context("failed to read journal")?;
        if entries.is_empty() {
            writeln!(out, "(journal is empty)")?;
            return Ok(());
        }
        write_entries(&entries, out)
    }

    /// Transmit the latest journal reading (zeros when nothing is journaled)
    /// for the current glyph.
    pub fn transmit(&mut self, message: &str, out: &mut impl Write) -> Result<()> {
        let latest = self
            .home
            .journal()
            .read_recent(1)
            .context("failed to read journal")?;
        let (fidelity, entropy) = latest
            .first()
            .map(|e| (e.fidelity, e.entropy))
            .unwrap_or((0.0, 0.0));

        let packet = encode_packet(self.state.current_glyph, entropy, fidelity, message);
        self.send(packet, out)?;
        writeln!(out, "packet stability: {:.3}", self.tx.packet_stability())?;
        Ok(())
    }

    pub fn respond(&self, out: &mut impl Write) -> Result<()> {
        match self.tx.respond_to_last() {
            Some(reply) => writeln!(out, "↺ RX {reply}")?,
            None => writeln!(out, "nothing transmitted yet")?,
        }
        Ok(())
    }

    pub fn toggle_auto_transmit(&mut self, out: &mut impl Write) -> Result<()> {
        let on = self.tx.toggle_auto_transmit();
        writeln!(out, "auto-transmit: {}", on_off(on))?;
        Ok(())
    }

    pub fn toggle_auto_respond(&mut self, out: &mut impl Write) -> Result<()> {
        let on = self.tx.toggle_auto_respond();
        writeln!(out, "auto-respond: {}", on_off(on))?;
        Ok(())
    }

    fn send(&mut self, packet: TransmissionPacket, out: &mut impl Write) -> Result<()> {
        let written = self
            .home
            .transmissions()
            .transmit(&mut self.tx, packet)
            .context("failed to write transmission log")?;
        for p in &written {
            writeln!(out, "{}", p.summary())?;
        }
        Ok(())
    }
}

fn write_entries(entries: &[JournalEntry], out: &mut impl Write) -> Result<()> {
    for e in entries {
        writeln!(
            out,
            "  {} {} F={:.5} S={:.5}",
            e.timestamp, e.glyph, e.fidelity, e.entropy
        )?;
    }
    Ok(())
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
