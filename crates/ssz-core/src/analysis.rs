use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::SszModel;
use crate::qubit::{Qubit, QubitPair};

/// Segment properties at one qubit's location.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    /// Ξ(r)
    pub xi: f64,
    /// D = 1 / (1 + Ξ)
    pub time_dilation: f64,
    /// τ_local / τ_∞, identical to `time_dilation`
    pub local_time_rate: f64,
    /// dΞ/dr [1/m]
    pub segment_gradient: f64,
    /// Heuristic in (0, 1]; see [`crate::Heuristics::coherence_factor`]
    pub coherence_factor: f64,
}

/// Segment mismatch between the two members of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairMismatch {
    /// |Ξ_a − Ξ_b|
    pub delta_xi: f64,
    /// |D_a − D_b|
    pub delta_time_dilation: f64,
    /// ω·|ΔD|·t̄_gate [rad]
    pub phase_drift_per_gate: f64,
    /// Heuristic exp(ΔΞ·scale); not a validated decoherence law
    pub decoherence_enhancement: f64,
    /// Proper-time disagreement accumulated per microsecond [s]
    pub time_diff_per_microsecond: f64,
}

impl SszModel {
    /// Ξ, D, gradient and coherence factor at the qubit's radius (auto regime).
    pub fn analyze_qubit_segment(&self, qubit: &Qubit, mass: f64) -> Result<SegmentAnalysis> {
        qubit.validate_position()?;
        let r = self.radius_of(qubit);
        let regime = self.select_regime(r, mass)?;

        let xi = self.segment_density(r, mass, regime)?;
        let time_dilation = 1.0 / (1.0 + xi);
        let segment_gradient = self.segment_gradient(r, mass, regime)?;

        Ok(SegmentAnalysis {
            xi,
            time_dilation,
            local_time_rate: time_dilation,
            segment_gradient,
            coherence_factor: self.heuristics().coherence_factor(segment_gradient),
        })
    }

    /// Mismatch metrics for a two-qubit operation.
    ///
    /// Both ΔΞ and ΔD use the cancellation-safe differences, so qubits a
    /// micrometre apart still report a non-zero drift.
    pub fn pair_segment_mismatch(&self, pair: &QubitPair<'_>, mass: f64) -> Result<PairMismatch> {
        pair.validate_positions()?;
        pair.validate_gate_times()?;
        let r_a = self.radius_of(pair.qubit_a);
        let r_b = self.radius_of(pair.qubit_b);

        let delta_xi = self.segment_density_difference_auto(r_a, r_b, mass)?.abs();
        let delta_d = self.time_dilation_difference(r_a, r_b, mass)?.abs();

        Ok(PairMismatch {
            delta_xi,
            delta_time_dilation: delta_d,
            phase_drift_per_gate: self.omega() * delta_d * pair.mean_gate_time(),
            decoherence_enhancement: self.heuristics().mismatch_enhancement(delta_xi),
            time_diff_per_microsecond: delta_d * 1e-6,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::M_EARTH;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_qubit_analysis() {
        let model = SszModel::earth();
        let q = Qubit::at_height("Q0", 0.0);
        let a = model.analyze_qubit_segment(&q, M_EARTH).unwrap();
        assert_relative_eq!(a.xi, 6.961e-10, max_relative = 1e-3);
        assert_eq!(a.time_dilation, a.local_time_rate);
        assert!(a.segment_gradient < 0.0);
        assert!(a.coherence_factor > 0.0 && a.coherence_factor <= 1.0);
        assert_relative_eq!(a.time_dilation * (1.0 + a.xi), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_identical_positions_have_no_mismatch() {
        let model = SszModel::earth();
        let a = Qubit::new("a", 1e-3, 0.0, 0.25);
        let b = Qubit::new("b", 1e-3, 0.0, 0.25);
        let m = model
            .pair_segment_mismatch(&QubitPair::new(&a, &b), M_EARTH)
            .unwrap();
        assert_eq!(m.delta_xi, 0.0);
        assert_eq!(m.delta_time_dilation, 0.0);
        assert_eq!(m.phase_drift_per_gate, 0.0);
        assert_eq!(m.decoherence_enhancement, 1.0);
    }

    #[test]
    fn test_one_millimetre_phase_drift() {
        let model = SszModel::earth();
        let a = Qubit::at_height("a", 0.0);
        let b = Qubit::at_height("b", 1e-3);
        let m = model
            .pair_segment_mismatch(&QubitPair::new(&a, &b), M_EARTH)
            .unwrap();
        assert_relative_eq!(m.phase_drift_per_gate, 1.72e-16, max_relative = 1e-2);
        assert_relative_eq!(m.time_diff_per_microsecond, m.delta_time_dilation * 1e-6);
        assert!(m.decoherence_enhancement >= 1.0);
    }

    #[test]
    fn test_mismatch_is_order_independent() {
        let model = SszModel::earth();
        let a = Qubit::at_height("a", 0.0);
        let b = Qubit::at_height("b", 0.37);
        let ab = model.pair_segment_mismatch(&QubitPair::new(&a, &b), M_EARTH).unwrap();
        let ba = model.pair_segment_mismatch(&QubitPair::new(&b, &a), M_EARTH).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_mismatch_rejects_zero_gate_time() {
        let model = SszModel::earth();
        let a = Qubit::at_height("a", 0.0).with_gate_time(0.0);
        let b = Qubit::at_height("b", 1e-3);
        assert!(model.pair_segment_mismatch(&QubitPair::new(&a, &b), M_EARTH).is_err());
    }
}
