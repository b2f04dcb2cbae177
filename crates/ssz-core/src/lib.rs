//! Segmented-spacetime (SSZ) time-dilation engine for qubit arrays.
//!
//! Models gravity as a segment density Ξ(r) around a central mass, with a
//! weak-field form Ξ = r_s/(2r) and a saturating strong-field form
//! Ξ = 1 − exp(−φ·r/r_s). Local clocks tick at D = 1/(1 + Ξ). On top of
//! that sit the qubit-level metrics: pair mismatch and phase drift, gate
//! timing, decoherence inflation, coherent zones, array layout and
//! entangled-pair drift.
//!
//! Differences of nearly equal Ξ and D are computed in closed form, never by
//! subtracting the two values, so millimetre height offsets at planetary
//! radii stay resolvable.
//!
//! Zero I/O: a pure math engine with no opinions about transport or presentation.

pub mod analysis;
pub mod array;
pub mod config;
pub mod consistency;
pub mod constants;
pub mod decoherence;
pub mod dilation;
pub mod entanglement;
pub mod error;
pub mod heuristics;
pub mod model;
pub mod qec;
pub mod qubit;
pub mod segment;
pub mod timing;
pub mod zone;

pub use analysis::{PairMismatch, SegmentAnalysis};
pub use array::{ArrayUniformity, optimize_qubit_array};
pub use config::{PhysicalConstants, SszConfig};
pub use consistency::{
    DEFAULT_LINEARITY_HEIGHTS, DEFAULT_STABILITY_HEIGHTS, GateFidelity, GrComparison,
    LinearScaling, StabilityReport, ZoneAnalysis, fidelity_reduction_small_angle,
};
pub use constants::{C, G, M_EARTH, PHI, R_EARTH};
pub use entanglement::{
    CorrectionGate, EntangledPairAnalysis, EntangledPhaseDrift, PairMember, bell_state_fidelity,
    bell_state_fidelity_approx, chsh_parameter, correction_gate, correction_interval,
};
pub use error::{Result, SszError};
pub use heuristics::Heuristics;
pub use model::SszModel;
pub use qec::Syndrome;
pub use qubit::{Qubit, QubitPair};
pub use segment::Regime;
pub use timing::TwoQubitTiming;
pub use zone::CoherentZone;
