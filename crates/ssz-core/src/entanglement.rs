//! Deterministic phase drift between entangled qubits at different heights.
//!
//! The drift ΔΦ(t) = ω·ΔD·t is geometry-locked: it does not decohere the
//! pair, it rotates the Bell state and can be undone by a single-qubit Rz
//! on the faster qubit.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_finite, ensure_non_negative, invalid};
use crate::model::SszModel;
use crate::qubit::QubitPair;

/// Phase drift between the two members of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntangledPhaseDrift {
    /// D(r_a) − D(r_b); positive when qubit A is higher
    pub delta_d: f64,
    pub delta_d_magnitude: f64,
    /// |ω·ΔD·t̄_gate| [rad]
    pub phase_drift_per_gate: f64,
    /// |ω·ΔD| [rad/s]
    pub phase_drift_per_second: f64,
    /// 2π·f [rad/s]
    pub omega: f64,
    /// Mean gate time of the pair [s]
    pub gate_time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairMember {
    A,
    B,
}

impl fmt::Display for PairMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Single-qubit Rz that cancels an accumulated drift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionGate {
    pub target: PairMember,
    /// Rz angle [rad]
    pub rotation_angle: f64,
}

impl fmt::Display for CorrectionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rz({:.6e}) on {}", self.rotation_angle, self.target)
    }
}

/// Everything [`SszModel::analyze_entangled_pair`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntangledPairAnalysis {
    /// z_a − z_b [m]
    pub height_difference: f64,
    pub delta_d: f64,
    pub phase_drift_per_gate: f64,
    pub phase_drift_per_second: f64,
    /// Time to accumulate π of relative phase; `None` without drift
    pub characteristic_time: Option<f64>,
    pub fidelity_after_n_gates: f64,
    pub chsh_parameter: f64,
    pub in_coherent_zone: bool,
}

/// Bell-state fidelity cos²(Δφ/2) after a relative phase Δφ.
pub fn bell_state_fidelity(delta_phi: f64) -> f64 {
    (delta_phi / 2.0).cos().powi(2)
}

/// Small-angle form 1 − Δφ²/4 of [`bell_state_fidelity`].
pub fn bell_state_fidelity_approx(delta_phi: f64) -> f64 {
    1.0 - delta_phi * delta_phi / 4.0
}

/// CHSH value 2√2·cos Δφ. Violates the classical bound 2 while |Δφ| < π/4.
pub fn chsh_parameter(delta_phi: f64) -> f64 {
    2.0 * SQRT_2 * delta_phi.cos()
}

/// Gates that fit before the accumulated drift reaches `phase_tolerance`.
pub fn correction_interval(phase_tolerance: f64, phase_drift_per_gate: f64) -> Result<f64> {
    ensure_non_negative("phase tolerance", phase_tolerance)?;
    ensure_finite("phase drift per gate", phase_drift_per_gate)?;
    if phase_drift_per_gate == 0.0 {
        return Err(invalid("phase drift per gate is zero; no correction is ever needed"));
    }
    Ok(phase_tolerance / phase_drift_per_gate.abs())
}

/// Rz that undoes `delta_phi` of drift: −Δφ on A when A is higher,
/// otherwise +Δφ on B.
pub fn correction_gate(delta_phi: f64, higher: PairMember) -> CorrectionGate {
    match higher {
        PairMember::A => CorrectionGate {
            target: PairMember::A,
            rotation_angle: -delta_phi,
        },
        PairMember::B => CorrectionGate {
            target: PairMember::B,
            rotation_angle: delta_phi,
        },
    }
}

impl SszModel {
    /// Signed ΔD and the resulting per-gate and per-second phase drift.
    pub fn entangled_pair_phase_drift(
        &self,
        pair: &QubitPair<'_>,
        mass: f64,
    ) -> Result<EntangledPhaseDrift> {
        pair.validate_positions()?;
        pair.validate_gate_times()?;
        let r_a = self.radius_of(pair.qubit_a);
        let r_b = self.radius_of(pair.qubit_b);

        let delta_d = self.time_dilation_difference(r_a, r_b, mass)?;
        let omega = self.omega();
        let gate_time = pair.mean_gate_time();
        let phase_drift_per_second = (omega * delta_d).abs();

        Ok(EntangledPhaseDrift {
            delta_d,
            delta_d_magnitude: delta_d.abs(),
            phase_drift_per_gate: phase_drift_per_second * gate_time,
            phase_drift_per_second,
            omega,
            gate_time,
        })
    }

    /// π / (ω·|ΔD|) for two heights `height_difference` apart starting at the
    /// surface. Not a decoherence time: the Bell state has rotated into its
    /// orthogonal partner, not lost coherence.
    pub fn characteristic_time(&self, height_difference: f64, mass: f64) -> Result<f64> {
        ensure_finite("height difference", height_difference)?;
        let r1 = self.reference_radius();
        let r2 = self.radius_at_height(height_difference.abs());
        let delta_d = self.time_dilation_difference(r1, r2, mass)?.abs();
        if delta_d == 0.0 {
            return Err(invalid("no time-dilation difference; characteristic time is unbounded"));
        }
        Ok(PI / (self.omega() * delta_d))
    }

    /// True when both qubits lie in the coherent zone centred at the lower one.
    pub fn is_in_coherent_zone(
        &self,
        pair: &QubitPair<'_>,
        tolerance: f64,
        mass: f64,
    ) -> Result<bool> {
        pair.validate_positions()?;
        let h_a = pair.qubit_a.z;
        let h_b = pair.qubit_b.z;
        let zone = self.segment_coherent_zone(h_a.min(h_b), tolerance, mass)?;
        Ok(zone.contains(h_a) && zone.contains(h_b))
    }

    /// Drift, Bell fidelity and CHSH value after `n_gates`, characteristic
    /// time and coherent-zone membership for one pair.
    pub fn analyze_entangled_pair(
        &self,
        pair: &QubitPair<'_>,
        n_gates: u64,
        zone_tolerance: f64,
        mass: f64,
    ) -> Result<EntangledPairAnalysis> {
        let drift = self.entangled_pair_phase_drift(pair, mass)?;
        let delta_phi_total = n_gates as f64 * drift.phase_drift_per_gate;
        let height_difference = pair.qubit_a.z - pair.qubit_b.z;

        let characteristic_time =
            (drift.phase_drift_per_second > 0.0).then(|| PI / drift.phase_drift_per_second);

        Ok(EntangledPairAnalysis {
            height_difference,
            delta_d: drift.delta_d,
            phase_drift_per_gate: drift.phase_drift_per_gate,
            phase_drift_per_second: drift.phase_drift_per_second,
            characteristic_time,
            fidelity_after_n_gates: bell_state_fidelity(delta_phi_total),
            chsh_parameter: chsh_parameter(delta_phi_total),
            in_coherent_zone: self.is_in_coherent_zone(pair, zone_tolerance, mass)?,
        })
    }
}
