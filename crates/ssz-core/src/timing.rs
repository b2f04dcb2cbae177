use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_finite};
use crate::model::SszModel;
use crate::qubit::{Qubit, QubitPair};

/// Timing recommendation for a two-qubit gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoQubitTiming {
    /// √(t_a·t_b) / D̄ [s]
    pub optimal_gate_time: f64,
    /// |D_a − D_b| / D̄
    pub timing_asymmetry: f64,
    /// 1 − cos²(π·asymmetry)
    pub max_fidelity_loss: f64,
    pub d_qubit_a: f64,
    pub d_qubit_b: f64,
}

impl SszModel {
    /// D(reference) / D(qubit).
    ///
    /// Multiply a gate duration calibrated at `reference_height` by this to
    /// get the duration that is equivalent in the qubit's local time.
    pub fn gate_timing_correction(
        &self,
        qubit: &Qubit,
        reference_height: f64,
        mass: f64,
    ) -> Result<f64> {
        qubit.validate_position()?;
        ensure_finite("reference height", reference_height)?;
        let d_qubit = self.time_dilation(self.radius_of(qubit), mass)?;
        let d_ref = self.time_dilation(self.radius_at_height(reference_height), mass)?;
        Ok(d_ref / d_qubit)
    }

    /// Shared gate time, timing asymmetry and worst-case fidelity loss.
    pub fn two_qubit_gate_timing(&self, pair: &QubitPair<'_>, mass: f64) -> Result<TwoQubitTiming> {
        pair.validate_positions()?;
        pair.validate_gate_times()?;
        let r_a = self.radius_of(pair.qubit_a);
        let r_b = self.radius_of(pair.qubit_b);

        let d_a = self.time_dilation(r_a, mass)?;
        let d_b = self.time_dilation(r_b, mass)?;
        let d_avg = (d_a + d_b) / 2.0;

        let delta_d = self.time_dilation_difference(r_a, r_b, mass)?;
        let timing_asymmetry = delta_d.abs() / d_avg;

        let t_a = pair.qubit_a.gate_time;
        let t_b = pair.qubit_b.gate_time;
        let optimal_gate_time = (t_a * t_b).sqrt() / d_avg;

        // phase error 2π·asymmetry, fidelity cos²(phase / 2)
        let half_phase = std::f64::consts::PI * timing_asymmetry;
        let max_fidelity_loss = half_phase.sin().powi(2);

        Ok(TwoQubitTiming {
            optimal_gate_time,
            timing_asymmetry,
            max_fidelity_loss,
            d_qubit_a: d_a,
            d_qubit_b: d_b,
        })
    }
}
