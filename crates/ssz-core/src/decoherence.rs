//! Decoherence-rate inflation from local segment density.
//!
//! Γ = (1/T2)·(1 + Ξ·k_Ξ + |dΞ/dr|·size·k_grad), all scales from
//! [`crate::Heuristics`]. Since the inflation factor is ≥ 1 the effective T2
//! never exceeds the nominal one.

use crate::error::Result;
use crate::model::SszModel;
use crate::qubit::{Qubit, QubitPair};

impl SszModel {
    /// Decoherence rate [1/s]. `include_gradient` adds the Ξ variation across
    /// the qubit's assumed physical size.
    pub fn ssz_decoherence_rate(
        &self,
        qubit: &Qubit,
        include_gradient: bool,
        mass: f64,
    ) -> Result<f64> {
        let inflation = self.decoherence_inflation(qubit, include_gradient, mass)?;
        Ok(inflation / qubit.coherence_time_t2)
    }

    /// Effective T2 [s], gradient term included. Never above the nominal T2.
    pub fn effective_t2(&self, qubit: &Qubit, mass: f64) -> Result<f64> {
        let inflation = self.decoherence_inflation(qubit, true, mass)?;
        Ok(qubit.coherence_time_t2 / inflation)
    }

    /// Joint decoherence time of an entangled pair [s]:
    /// 1 / (Γ_a + Γ_b + ΔΞ·scale).
    pub fn pair_decoherence_time(&self, pair: &QubitPair<'_>, mass: f64) -> Result<f64> {
        let gamma_a = self.ssz_decoherence_rate(pair.qubit_a, true, mass)?;
        let gamma_b = self.ssz_decoherence_rate(pair.qubit_b, true, mass)?;
        let mismatch = self.pair_segment_mismatch(pair, mass)?;
        let gamma_mismatch = mismatch.delta_xi * self.heuristics().pair_mismatch_rate_scale;
        Ok(1.0 / (gamma_a + gamma_b + gamma_mismatch))
    }

    fn decoherence_inflation(&self, qubit: &Qubit, include_gradient: bool, mass: f64) -> Result<f64> {
        qubit.validate_position()?;
        qubit.validate_coherence_time()?;
        let r = self.radius_of(qubit);
        let regime = self.select_regime(r, mass)?;
        let xi = self.segment_density(r, mass, regime)?;
        let gradient = if include_gradient {
            Some(self.segment_gradient(r, mass, regime)?)
        } else {
            None
        };
        Ok(self.heuristics().decoherence_inflation(xi, gradient))
    }
}
