//! Segment-aware weighting for surface-code error correction.
//!
//! Both functions ride on [`crate::Heuristics`]: the syndrome weights reuse the
//! coherence factor and the logical error estimate inflates the physical
//! error rate by the array's Ξ spread.

use serde::{Deserialize, Serialize};

use crate::error::{Result, invalid};
use crate::model::SszModel;
use crate::qubit::Qubit;
use crate::segment::Regime;

/// Pauli syndrome channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Syndrome {
    /// Bit-flip; weighted by local time dilation
    X,
    /// Phase-flip; weighted by the coherence factor
    Z,
}

impl SszModel {
    /// Weight in [0, 1] for a syndrome measured on `qubit`.
    pub fn segment_aware_syndrome_weight(
        &self,
        qubit: &Qubit,
        syndrome: Syndrome,
        mass: f64,
    ) -> Result<f64> {
        let analysis = self.analyze_qubit_segment(qubit, mass)?;
        let weight = match syndrome {
            Syndrome::X => analysis.time_dilation,
            Syndrome::Z => analysis.coherence_factor,
        };
        Ok(weight.clamp(0.0, 1.0))
    }

    /// Surface-code logical error estimate (p_eff / p_th)^((d+1)/2).
    ///
    /// p_eff is `physical_error_rate` inflated by the array's Ξ range. At or
    /// above the threshold the code no longer suppresses errors and 1.0 is
    /// returned.
    pub fn logical_error_rate(
        &self,
        qubits: &[Qubit],
        code_distance: u32,
        physical_error_rate: f64,
        mass: f64,
        regime: Regime,
    ) -> Result<f64> {
        if code_distance == 0 {
            return Err(invalid("code distance must be at least 1"));
        }
        if !(0.0..=1.0).contains(&physical_error_rate) {
            return Err(invalid(format!(
                "physical error rate must lie in [0, 1], got {physical_error_rate}"
            )));
        }
        let uniformity = self.array_segment_uniformity(qubits, mass, regime)?;
        let h = self.heuristics();

        let p_eff = physical_error_rate * (1.0 + uniformity.xi_range * h.logical_error_range_scale);
        if p_eff >= h.surface_code_threshold {
            tracing::debug!(p_eff, threshold = h.surface_code_threshold, "above surface-code threshold");
            return Ok(1.0);
        }
        let exponent = (f64::from(code_distance) + 1.0) / 2.0;
        Ok((p_eff / h.surface_code_threshold).powf(exponent))
    }
}
