use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GATE_TIME, DEFAULT_T2};
use crate::error::{Result, ensure_finite, ensure_positive};

/// A single qubit: position plus the two timescales the metrics need.
///
/// `z` is the height above the reference body's surface; `x`/`y` only matter
/// for pair separation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Qubit {
    pub id: String,
    /// [m]
    pub x: f64,
    /// [m]
    pub y: f64,
    /// Height above the reference surface [m]
    pub z: f64,
    /// T2 coherence time [s]
    pub coherence_time_t2: f64,
    /// Nominal gate duration [s]
    pub gate_time: f64,
}

impl Qubit {
    /// Qubit with typical superconducting timescales (T2 = 100 µs, 50 ns gates).
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z,
            coherence_time_t2: DEFAULT_T2,
            gate_time: DEFAULT_GATE_TIME,
        }
    }

    /// Qubit at the origin of the horizontal plane, `height` above the surface.
    pub fn at_height(id: impl Into<String>, height: f64) -> Self {
        Self::new(id, 0.0, 0.0, height)
    }

    pub fn with_coherence_time(mut self, t2: f64) -> Self {
        self.coherence_time_t2 = t2;
        self
    }

    pub fn with_gate_time(mut self, gate_time: f64) -> Self {
        self.gate_time = gate_time;
        self
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Distance from the centre of the reference body.
    pub fn radius_from_center(&self, reference_radius: f64) -> f64 {
        reference_radius + self.z
    }

    pub(crate) fn validate_position(&self) -> Result<()> {
        ensure_finite("qubit x", self.x)?;
        ensure_finite("qubit y", self.y)?;
        ensure_finite("qubit z", self.z)
    }

    pub(crate) fn validate_coherence_time(&self) -> Result<()> {
        ensure_positive(&format!("T2 of qubit {}", self.id), self.coherence_time_t2)
    }

    pub(crate) fn validate_gate_time(&self) -> Result<()> {
        ensure_positive(&format!("gate time of qubit {}", self.id), self.gate_time)
    }
}

/// Two qubits taking part in one two-qubit operation.
///
/// Borrows both qubits; derived geometry is recomputed on every access.
#[derive(Clone, Copy, Debug)]
pub struct QubitPair<'a> {
    pub qubit_a: &'a Qubit,
    pub qubit_b: &'a Qubit,
}

impl<'a> QubitPair<'a> {
    pub fn new(qubit_a: &'a Qubit, qubit_b: &'a Qubit) -> Self {
        Self { qubit_a, qubit_b }
    }

    /// Euclidean distance between the two qubits [m].
    pub fn separation(&self) -> f64 {
        let a = self.qubit_a.position();
        let b = self.qubit_b.position();
        a.iter()
            .zip(b.iter())
            .map(|(p, q)| (p - q) * (p - q))
            .sum::<f64>()
            .sqrt()
    }

    /// |z_a − z_b| [m].
    pub fn height_difference(&self) -> f64 {
        (self.qubit_a.z - self.qubit_b.z).abs()
    }

    /// Mean of the two nominal gate times [s].
    pub fn mean_gate_time(&self) -> f64 {
        (self.qubit_a.gate_time + self.qubit_b.gate_time) / 2.0
    }

    pub(crate) fn validate_positions(&self) -> Result<()> {
        self.qubit_a.validate_position()?;
        self.qubit_b.validate_position()
    }

    pub(crate) fn validate_gate_times(&self) -> Result<()> {
        self.qubit_a.validate_gate_time()?;
        self.qubit_b.validate_gate_time()
    }
}
