//! Quantum glyph behavior: a closed-form evaporation/decoherence toy.
//!
//! Each depth is evaluated independently: the mass evaporates over a time
//! proportional to `(depth / max_depth)²` of the full evaporation time, and
//! the damping `gamma` drives cosmetic fidelity and entropy numbers.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{
    C, DEFAULT_DEPTH_END, DEFAULT_DEPTH_START, DEFAULT_DEPTH_STEP, ENTROPY_EPSILON, G, HBAR, K_B,
    MASS_FLOOR,
};
use crate::glyph::Glyph;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub depth: f64,
    pub glyph: Glyph,
    pub mass: f64,
    pub temperature: f64,
    pub gamma: f64,
    pub fidelity: f64,
    pub entropy: f64,
}

/// Half-open depth range `start..end` walked in `step` increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl DepthRange {
    pub fn new(start: u32, end: u32, step: u32) -> Self {
        Self { start, end, step }
    }

    /// Depth values in order. A zero step yields just `start` (if below `end`).
    pub fn depths(&self) -> Vec<f64> {
        if self.start >= self.end {
            return Vec::new();
        }
        if self.step == 0 {
            return vec![self.start as f64];
        }
        (self.start..self.end)
            .step_by(self.step as usize)
            .map(f64::from)
            .collect()
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_START, DEFAULT_DEPTH_END, DEFAULT_DEPTH_STEP)
    }
}

/// Evaporation constant `ħc⁴ / (5120 π G²)`.
pub fn evaporation_constant() -> f64 {
    HBAR * C.powi(4) / (5120.0 * PI * G.powi(2))
}

/// Time for `mass0` to evaporate completely: `mass0³ / k`.
pub fn evaporation_time(mass0: f64) -> f64 {
    mass0.powi(3) / evaporation_constant()
}

/// Whether `mass0` is usable as an initial mass. Zero, negative or
/// non-finite masses make gamma and fidelity infinite or NaN.
pub fn is_valid_mass(mass0: f64) -> bool {
    mass0.is_finite() && mass0 > 0.0
}

/// Evaluate the formula at every depth. Empty input gives empty output.
/// `mass0` should satisfy [`is_valid_mass`].
pub fn simulate(mass0: f64, depths: &[f64], glyph: Glyph) -> Vec<SimulationRecord> {
    let Some(max_depth) = depths.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };

    depths
        .iter()
        .map(|&depth| {
            let ratio = if max_depth > 0.0 { depth / max_depth } else { 0.0 };
            // k·t = mass0³·ratio², so the remaining mass is mass0·∛(1 - ratio²)
            let remaining = (1.0 - ratio.powi(2)).max(0.0);
            let mass = (mass0 * remaining.cbrt()).max(MASS_FLOOR);
            let temperature = (HBAR * C.powi(3)) / (8.0 * PI * G * mass * K_B);
            let gamma = 0.02 * (1.0 - mass / mass0) * (depth / 20.0).sin() + 0.01;
            let fidelity = 1.0 - gamma * 1.2;

            SimulationRecord {
                depth,
                glyph,
                mass,
                temperature,
                gamma,
                fidelity,
                entropy: entropy_of(gamma),
            }
        })
        .collect()
}

/// `-g log2(g + ε)` with negative damping clamped to zero.
fn entropy_of(gamma: f64) -> f64 {
    let g = gamma.max(0.0);
    -g * (g + ENTROPY_EPSILON).log2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::constants::DEFAULT_MASS0;

    #[test]
    fn test_default_depths() {
        let depths = DepthRange::default().depths();
        assert_eq!(depths.len(), 15);
        assert_eq!(depths[0], 50.0);
        assert_eq!(depths[14], 190.0);
    }

    #[test]
    fn test_depth_range_edges() {
        assert!(DepthRange::new(10, 10, 1).depths().is_empty());
        assert!(DepthRange::new(20, 10, 1).depths().is_empty());
        assert_eq!(DepthRange::new(5, 10, 0).depths(), vec![5.0]);
    }

    #[test]
    fn test_evaporation_time_scales_with_cube() {
        let t1 = evaporation_time(1.0);
        let t2 = evaporation_time(2.0);
        assert_relative_eq!(t2 / t1, 8.0, epsilon = 1e-9);
        assert_relative_eq!(t1 * evaporation_constant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_depths() {
        assert!(simulate(DEFAULT_MASS0, &[], Glyph::Loop).is_empty());
    }

    #[test]
    fn test_max_depth_fully_evaporates() {
        let records = simulate(DEFAULT_MASS0, &[50.0, 100.0], Glyph::Loop);
        assert_eq!(records.len(), 2);
        let last = &records[1];
        assert_relative_eq!(last.mass, MASS_FLOOR);
        // 1 - mass/mass0 ≈ 1
        let expected_gamma = 0.02 * (100.0f64 / 20.0).sin() + 0.01;
        assert_relative_eq!(last.gamma, expected_gamma, epsilon = 1e-12);
    }

    #[test]
    fn test_fidelity_and_entropy_follow_gamma() {
        for r in simulate(DEFAULT_MASS0, &DepthRange::default().depths(), Glyph::Psi) {
            assert_eq!(r.glyph, Glyph::Psi);
            assert_relative_eq!(r.fidelity, 1.0 - 1.2 * r.gamma, epsilon = 1e-12);
            if r.gamma > 0.0 {
                let expected = -r.gamma * (r.gamma + ENTROPY_EPSILON).log2();
                assert_relative_eq!(r.entropy, expected, epsilon = 1e-12);
            }
            assert!(r.mass > 0.0 && r.mass <= DEFAULT_MASS0);
            assert!(r.temperature.is_finite());
        }
    }

    #[test]
    fn test_mass_decreases_with_depth() {
        let records = simulate(DEFAULT_MASS0, &DepthRange::default().depths(), Glyph::Loop);
        for pair in records.windows(2) {
            assert!(pair[1].mass <= pair[0].mass);
        }
    }

    #[test]
    fn test_negative_gamma_has_zero_entropy() {
        // sin(220/20) ≈ -1 at full evaporation drives gamma below zero
        let records = simulate(DEFAULT_MASS0, &[220.0], Glyph::Loop);
        assert!(records[0].gamma < 0.0);
        assert_eq!(records[0].entropy, 0.0);
        assert!(!records[0].entropy.is_nan());
    }

    #[test]
    fn test_zero_max_depth() {
        let records = simulate(DEFAULT_MASS0, &[0.0], Glyph::Void);
        assert_relative_eq!(records[0].mass, DEFAULT_MASS0);
        assert_relative_eq!(records[0].gamma, 0.01);
    }

    #[test]
    fn test_is_valid_mass() {
        assert!(is_valid_mass(DEFAULT_MASS0));
        assert!(is_valid_mass(1e-3));
        assert!(!is_valid_mass(0.0));
        assert!(!is_valid_mass(-1e31));
        assert!(!is_valid_mass(f64::NAN));
        assert!(!is_valid_mass(f64::INFINITY));
    }

    #[test]
    fn test_valid_mass_gives_finite_records() {
        let records = simulate(1.0, &DepthRange::default().depths(), Glyph::Wait);
        assert!(records.iter().all(|r| r.fidelity.is_finite() && r.entropy.is_finite()));
    }
}
