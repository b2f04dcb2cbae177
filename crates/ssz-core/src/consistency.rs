//! Self-checks of the model against textbook GR and its own closed forms.
//!
//! These are the library form of the numbers quoted when validating the
//! model: weak-field agreement with Schwarzschild, linear drift scaling,
//! cancellation-free ΔD, and the coherent-zone width formula.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GATE_TIME, GR_WEAK_FIELD_RATIO};
use crate::error::{Result, ensure_finite, ensure_positive, invalid};
use crate::model::SszModel;
use crate::qubit::{Qubit, QubitPair};
use crate::zone::CoherentZone;

/// Sub-centimetre heights where drift is linear to well under 0.1%.
pub const DEFAULT_LINEARITY_HEIGHTS: [f64; 5] = [1e-6, 1e-5, 1e-4, 1e-3, 1e-2];

/// Height differences from a micrometre to a metre.
pub const DEFAULT_STABILITY_HEIGHTS: [f64; 7] = [1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1, 1.0];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrComparison {
    pub d_ssz: f64,
    pub d_gr: f64,
    /// |D_ssz − D_gr| / D_gr
    pub relative_difference: f64,
    /// r > 1000·r_s
    pub is_weak_field: bool,
    pub r_over_r_s: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScaling {
    pub is_linear: bool,
    /// Largest relative deviation of drift[i]/drift[0] from h[i]/h[0]
    pub max_deviation: f64,
    pub heights: Vec<f64>,
    pub phase_drifts: Vec<f64>,
    /// drift[0] / h[0] [rad/m per gate]
    pub scaling_constant: f64,
    /// [rad/mm per gate]
    pub scaling_constant_per_mm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub heights: Vec<f64>,
    pub closed_form_values: Vec<f64>,
    pub direct_values: Vec<f64>,
    /// Every closed-form ΔD is non-zero
    pub closed_form_works: bool,
    /// Some direct D(r1) − D(r2), excluding the largest height, is exactly zero
    pub direct_fails_for_small_heights: bool,
    pub numerical_stability_demonstrated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnalysis {
    pub epsilon: f64,
    pub zone: CoherentZone,
    pub zone_width: f64,
    pub half_width: f64,
    /// 4·ε·r_c² / r_s [m]
    pub formula_value: f64,
    /// Zone width within 1% of the formula
    pub formula_matches: bool,
    /// Drift per gate between qubits at the two zone edges [rad]
    pub max_phase_drift: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateFidelity {
    pub delta_phi_total: f64,
    pub fidelity: f64,
    pub fidelity_reduction: f64,
    /// Δφ < 0.1, where the small-angle form holds
    pub approximation_valid: bool,
}

/// 1 − F ≈ Δφ²/4 for Δφ ≪ 1.
pub fn fidelity_reduction_small_angle(delta_phi: f64) -> f64 {
    delta_phi * delta_phi / 4.0
}

impl SszModel {
    /// Schwarzschild D = √(1 − r_s/r). Undefined at or inside the horizon.
    pub fn gr_time_dilation_weak_field(&self, r: f64, mass: f64) -> Result<f64> {
        let r_s = self.checked_schwarzschild_radius(r, mass)?;
        if r <= r_s {
            return Err(invalid(format!(
                "radius {r} m is inside the Schwarzschild radius {r_s} m"
            )));
        }
        Ok((1.0 - r_s / r).sqrt())
    }

    pub fn compare_with_gr(&self, r: f64, mass: f64) -> Result<GrComparison> {
        let d_gr = self.gr_time_dilation_weak_field(r, mass)?;
        let d_ssz = self.time_dilation(r, mass)?;
        let r_s = self.schwarzschild_radius(mass);
        Ok(GrComparison {
            d_ssz,
            d_gr,
            relative_difference: (d_ssz - d_gr).abs() / d_gr,
            is_weak_field: r > GR_WEAK_FIELD_RATIO * r_s,
            r_over_r_s: r / r_s,
        })
    }

    /// Checks that per-gate drift between a surface qubit and one at each
    /// height grows linearly with height, using default 50 ns gates around
    /// the reference body.
    pub fn verify_linear_scaling(&self, heights: &[f64], tolerance: f64) -> Result<LinearScaling> {
        if heights.len() < 2 {
            return Err(invalid("linear scaling needs at least two heights"));
        }
        ensure_positive("tolerance", tolerance)?;
        let base = Qubit::at_height("base", 0.0).with_gate_time(DEFAULT_GATE_TIME);
        let drifts: Vec<f64> = heights
            .iter()
            .map(|&h| -> Result<f64> {
                ensure_positive("height", h)?;
                let top = Qubit::at_height("top", h).with_gate_time(DEFAULT_GATE_TIME);
                let pair = QubitPair::new(&base, &top);
                Ok(self.pair_segment_mismatch(&pair, self.reference_mass())?.phase_drift_per_gate)
            })
            .collect::<Result<_>>()?;
        ensure_positive("reference phase drift", drifts[0])?;

        let max_deviation = heights
            .iter()
            .zip(&drifts)
            .skip(1)
            .map(|(h, d)| {
                let expected = h / heights[0];
                ((d / drifts[0]) - expected).abs() / expected
            })
            .fold(0.0, f64::max);
        let scaling_constant = drifts[0] / heights[0];

        tracing::debug!(max_deviation, scaling_constant, "linear scaling check");
        Ok(LinearScaling {
            is_linear: max_deviation < tolerance,
            max_deviation,
            heights: heights.to_vec(),
            phase_drifts: drifts,
            scaling_constant,
            scaling_constant_per_mm: scaling_constant * 1e-3,
        })
    }

    /// Closed-form ΔD against naive D(r1) − D(r2) for each height offset
    /// from the reference surface.
    pub fn verify_numerical_stability(&self, heights: &[f64]) -> Result<StabilityReport> {
        if heights.is_empty() {
            return Err(invalid("stability check needs at least one height"));
        }
        let mass = self.reference_mass();
        let r1 = self.reference_radius();
        let mut closed_form_values = Vec::with_capacity(heights.len());
        let mut direct_values = Vec::with_capacity(heights.len());
        for &dh in heights {
            ensure_finite("height", dh)?;
            let r2 = self.radius_at_height(dh);
            closed_form_values.push(self.time_dilation_difference(r1, r2, mass)?);
            direct_values.push(self.time_dilation(r1, mass)? - self.time_dilation(r2, mass)?);
        }

        let closed_form_works = closed_form_values.iter().all(|v| *v != 0.0);
        let direct_fails_for_small_heights =
            direct_values[..direct_values.len() - 1].iter().any(|v| *v == 0.0);
        Ok(StabilityReport {
            heights: heights.to_vec(),
            closed_form_values,
            direct_values,
            closed_form_works,
            direct_fails_for_small_heights,
            numerical_stability_demonstrated: closed_form_works && direct_fails_for_small_heights,
        })
    }

    /// Coherent zone around `center_height` compared with 4·ε·r_c²/r_s.
    pub fn coherent_zone_analysis(
        &self,
        epsilon: f64,
        center_height: f64,
        mass: f64,
    ) -> Result<ZoneAnalysis> {
        ensure_positive("epsilon", epsilon)?;
        ensure_positive("mass", mass)?;
        let r_s = self.schwarzschild_radius(mass);
        let r_center = self.radius_at_height(center_height);
        let formula_value = 4.0 * epsilon * r_center * r_center / r_s;

        let zone = self.segment_coherent_zone(center_height, epsilon, mass)?;
        let zone_width = zone.width();

        let low = Qubit::at_height("low", zone.h_min).with_gate_time(DEFAULT_GATE_TIME);
        let high = Qubit::at_height("high", zone.h_max).with_gate_time(DEFAULT_GATE_TIME);
        let edge = self.pair_segment_mismatch(&QubitPair::new(&low, &high), mass)?;

        Ok(ZoneAnalysis {
            epsilon,
            zone,
            zone_width,
            half_width: zone_width / 2.0,
            formula_value,
            formula_matches: (zone_width - formula_value).abs() / formula_value < 0.01,
            max_phase_drift: edge.phase_drift_per_gate,
        })
    }

    /// 1 + (ΔΞ/Ξ_ref)²; essentially 1.0 for Earth-scale mismatches.
    pub fn decoherence_enhancement_factor(&self, delta_xi: f64) -> f64 {
        self.heuristics().quadratic_enhancement(delta_xi)
    }

    /// Small-angle Bell fidelity after `n_gates` for a vertical pair
    /// `height_difference` apart, starting at the surface, with 50 ns gates.
    pub fn fidelity_after_gates(
        &self,
        height_difference: f64,
        n_gates: u64,
        mass: f64,
    ) -> Result<GateFidelity> {
        ensure_finite("height difference", height_difference)?;
        let base = Qubit::at_height("base", 0.0).with_gate_time(DEFAULT_GATE_TIME);
        let top = Qubit::at_height("top", height_difference.abs()).with_gate_time(DEFAULT_GATE_TIME);
        let mismatch = self.pair_segment_mismatch(&QubitPair::new(&base, &top), mass)?;

        let delta_phi_total = n_gates as f64 * mismatch.phase_drift_per_gate;
        let fidelity_reduction = fidelity_reduction_small_angle(delta_phi_total);
        Ok(GateFidelity {
            delta_phi_total,
            fidelity: 1.0 - fidelity_reduction,
            fidelity_reduction,
            approximation_valid: delta_phi_total < 0.1,
        })
    }
}
