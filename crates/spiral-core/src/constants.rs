/// Reduced Planck constant (J·s)
pub const HBAR: f64 = 1.054_571_8e-34;

/// Speed of light (m/s)
pub const C: f64 = 3e8;

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.6743e-11;

/// Boltzmann constant (J/K)
pub const K_B: f64 = 1.380_649e-23;

/// Floor for evaporating mass so the temperature term stays finite.
pub const MASS_FLOOR: f64 = 1e-15;

/// Offset inside the entropy logarithm.
pub const ENTROPY_EPSILON: f64 = 1e-12;

/// Default initial mass for a simulation run (kg).
pub const DEFAULT_MASS0: f64 = 1e31;

/// Default recursion depths: 50..200 step 10.
pub const DEFAULT_DEPTH_START: u32 = 50;
pub const DEFAULT_DEPTH_END: u32 = 200;
pub const DEFAULT_DEPTH_STEP: u32 = 10;

/// Decimal places kept by derived scores.
pub const SCORE_DECIMALS: i32 = 3;
