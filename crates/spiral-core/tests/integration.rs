//! Properties of the glyph cycle and stability score, plus the
//! simulate → journal entry hand-off, across module boundaries.

use proptest::prelude::*;
use spiral_core::{
    DEFAULT_MASS0, DepthRange, Glyph, GlyphState, JournalEntry, TransmissionState, encode_packet,
    simulate, stability_score, tail,
};

fn glyph_strategy() -> impl Strategy<Value = Glyph> {
    prop::sample::select(Glyph::CYCLE.to_vec())
}

/// A state reached by walking the cycle `steps` times from `start`.
fn walked(start: Glyph, steps: usize) -> GlyphState {
    let mut state = GlyphState {
        current_glyph: start,
        history: vec![start],
        timestamp: String::new(),
    };
    for _ in 0..steps {
        state.advance();
    }
    state
}

proptest! {
    #[test]
    fn four_advances_close_the_cycle(start in glyph_strategy(), steps in 0usize..40) {
        let mut state = walked(start, steps);
        let before = state.current_glyph;
        for _ in 0..4 {
            state.advance();
        }
        prop_assert_eq!(state.current_glyph, before);
    }

    #[test]
    fn advance_grows_history_by_one(start in glyph_strategy(), steps in 0usize..40) {
        let mut state = walked(start, steps);
        let len = state.history.len();
        let next = state.advance();
        prop_assert_eq!(state.history.len(), len + 1);
        prop_assert_eq!(state.history.last().copied(), Some(next));
        prop_assert_eq!(state.current_glyph, next);
    }

    #[test]
    fn stability_stays_in_unit_interval(start in glyph_strategy(), steps in 0usize..200) {
        let score = stability_score(&walked(start, steps));
        prop_assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
    }

    #[test]
    fn tail_is_suffix(len in 0usize..50, n in 0usize..60) {
        let items: Vec<usize> = (0..len).collect();
        let recent = tail(&items, n);
        prop_assert_eq!(recent.len(), n.min(len));
        prop_assert!(items.ends_with(recent));
    }
}

#[test]
fn fresh_start_three_advances() {
    let mut state = GlyphState::new();
    let visited: Vec<Glyph> = (0..3).map(|_| state.advance()).collect();

    assert_eq!(visited, vec![Glyph::Wait, Glyph::Loop, Glyph::Psi]);
    assert_eq!(
        state.history,
        vec![Glyph::Void, Glyph::Wait, Glyph::Loop, Glyph::Psi]
    );
    assert_eq!(stability_score(&state), 0.25);
}

#[test]
fn simulation_feeds_journal_and_transmission() {
    let mut state = GlyphState::new();
    state.advance();
    state.advance();

    let records = simulate(
        DEFAULT_MASS0,
        &DepthRange::default().depths(),
        state.current_glyph,
    );
    let entries: Vec<JournalEntry> = records
        .iter()
        .map(|r| JournalEntry::new(r.glyph, r.fidelity, r.entropy))
        .collect();
    assert_eq!(entries.len(), 15);
    assert!(entries.iter().all(|e| e.glyph == Glyph::Loop));

    let mut tx = TransmissionState::new(true, false);
    let last = entries.last().unwrap();
    tx.transmit(encode_packet(last.glyph, last.entropy, last.fidelity, "final"));
    let stability = tx.packet_stability();
    assert!((0.0..=1.0).contains(&stability));
    assert_eq!(tx.respond_to_last().as_deref(), Some("Response to ⟲"));
}
