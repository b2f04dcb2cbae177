/// Speed of light in vacuum [m/s]
pub const C: f64 = 299_792_458.0;

/// Newtonian gravitational constant [m³/(kg·s²)]
pub const G: f64 = 6.674_30e-11;

/// Earth mass [kg], the default reference body
pub const M_EARTH: f64 = 5.972e24;

/// Earth mean radius [m]
pub const R_EARTH: f64 = 6.371e6;

/// Golden ratio: (1 + √5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// Auto regime selection picks the weak-field form when r / r_s exceeds this.
/// Hand-tuned cutover; the two forms do not agree here.
pub const REGIME_CUTOVER: f64 = 100.0;

/// r / r_s above which the GR comparison reports a weak field.
pub const GR_WEAK_FIELD_RATIO: f64 = 1000.0;

/// Typical superconducting qubit transition frequency [Hz]
pub const DEFAULT_QUBIT_FREQUENCY_HZ: f64 = 5e9;

/// Typical T2 coherence time [s]
pub const DEFAULT_T2: f64 = 100e-6;

/// Typical single gate duration [s]
pub const DEFAULT_GATE_TIME: f64 = 50e-9;

/// Lower bound for Ξ when inverting the weak-field formula.
/// Keeps the coherent-zone upper bound finite for very loose tolerances.
pub const XI_FLOOR: f64 = 1e-20;
