//! Phenomenological scaling factors.
//!
//! None of these follow from a physical law. They are scale knobs that turn
//! tiny Earth-scale Ξ values into visible penalties, kept in one swappable
//! struct so callers can pin or replace them. Results built on them must
//! not be read as validated decoherence physics.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Multiplies |dΞ/dr| in the coherence factor [m]
    pub coherence_gradient_scale: f64,
    /// Exponent scale of the pair-mismatch decoherence penalty
    pub mismatch_enhancement_scale: f64,
    /// Scales Ξ in the decoherence-rate inflation
    pub decoherence_xi_scale: f64,
    /// Scales Ξ variation across a qubit in the decoherence-rate inflation
    pub decoherence_gradient_scale: f64,
    /// Assumed physical extent of one qubit [m]
    pub qubit_size: f64,
    /// Converts pair ΔΞ into an extra joint decoherence rate [1/s]
    pub pair_mismatch_rate_scale: f64,
    /// Converts array Ξ range into extra physical error rate
    pub logical_error_range_scale: f64,
    /// Surface-code threshold error rate
    pub surface_code_threshold: f64,
    /// Reference Ξ for the quadratic enhancement factor
    pub enhancement_reference_xi: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            coherence_gradient_scale: 1e6,
            mismatch_enhancement_scale: 1e9,
            decoherence_xi_scale: 1e9,
            decoherence_gradient_scale: 1e15,
            qubit_size: 1e-6,
            pair_mismatch_rate_scale: 1e12,
            logical_error_range_scale: 1e12,
            surface_code_threshold: 0.01,
            enhancement_reference_xi: 1e-10,
        }
    }
}

impl Heuristics {
    /// 1 / (1 + |dΞ/dr| · scale). Bounded in (0, 1], decreasing in |gradient|.
    pub fn coherence_factor(&self, gradient: f64) -> f64 {
        1.0 / (1.0 + gradient.abs() * self.coherence_gradient_scale)
    }

    /// exp(ΔΞ · scale): multiplicative decoherence penalty for a mismatched pair.
    pub fn mismatch_enhancement(&self, delta_xi: f64) -> f64 {
        (delta_xi.abs() * self.mismatch_enhancement_scale).exp()
    }

    /// 1 + (ΔΞ / Ξ_ref)². Essentially 1.0 at Earth-scale mismatches.
    pub fn quadratic_enhancement(&self, delta_xi: f64) -> f64 {
        let ratio = delta_xi / self.enhancement_reference_xi;
        1.0 + ratio * ratio
    }

    /// Factor (≥ 1) by which the bare 1/T2 rate is inflated.
    ///
    /// `gradient` adds the Ξ variation across one qubit when present.
    pub fn decoherence_inflation(&self, xi: f64, gradient: Option<f64>) -> f64 {
        let mut factor = 1.0 + xi.abs() * self.decoherence_xi_scale;
        if let Some(g) = gradient {
            let delta_xi = g.abs() * self.qubit_size;
            factor += delta_xi * self.decoherence_gradient_scale;
        }
        factor
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let fields = [
            ("coherence_gradient_scale", self.coherence_gradient_scale),
            ("mismatch_enhancement_scale", self.mismatch_enhancement_scale),
            ("decoherence_xi_scale", self.decoherence_xi_scale),
            ("decoherence_gradient_scale", self.decoherence_gradient_scale),
            ("qubit_size", self.qubit_size),
            ("pair_mismatch_rate_scale", self.pair_mismatch_rate_scale),
            ("logical_error_range_scale", self.logical_error_range_scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("heuristics.{name} must be finite and >= 0, got {value}"));
            }
        }
        if !(self.surface_code_threshold > 0.0 && self.surface_code_threshold <= 1.0) {
            return Err(format!(
                "heuristics.surface_code_threshold must lie in (0, 1], got {}",
                self.surface_code_threshold
            ));
        }
        if !(self.enhancement_reference_xi.is_finite() && self.enhancement_reference_xi > 0.0) {
            return Err(format!(
                "heuristics.enhancement_reference_xi must be positive, got {}",
                self.enhancement_reference_xi
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coherence_factor_bounds() {
        let h = Heuristics::default();
        assert_eq!(h.coherence_factor(0.0), 1.0);
        let f = h.coherence_factor(-1e-3);
        assert!(f > 0.0 && f < 1.0);
        assert!(h.coherence_factor(1e-2) < f, "must decrease with |gradient|");
    }

    #[test]
    fn test_mismatch_enhancement_is_one_without_mismatch() {
        let h = Heuristics::default();
        assert_eq!(h.mismatch_enhancement(0.0), 1.0);
        assert!(h.mismatch_enhancement(1e-10) > 1.0);
    }

    #[test]
    fn test_quadratic_enhancement() {
        let h = Heuristics::default();
        assert!((h.quadratic_enhancement(1e-19) - 1.0).abs() < 1e-15);
        assert!((h.quadratic_enhancement(1e-10) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inflation_never_below_one() {
        let h = Heuristics::default();
        assert_eq!(h.decoherence_inflation(0.0, None), 1.0);
        assert!(h.decoherence_inflation(7e-10, Some(-1e-16)) >= 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let h = Heuristics {
            surface_code_threshold: 0.0,
            ..Heuristics::default()
        };
        assert!(h.validate().is_err());
        assert!(Heuristics::default().validate().is_ok());
    }
}
