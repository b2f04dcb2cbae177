//! Height placement by inverting the weak-field Ξ formula.
//!
//! Ξ = r_s / (2r)  ⇔  r = r_s / (2Ξ)

use serde::{Deserialize, Serialize};

use crate::constants::XI_FLOOR;
use crate::error::{Result, ensure_non_negative, ensure_positive};
use crate::model::SszModel;
use crate::segment::Regime;

/// Height interval [h_min, h_max] above the reference surface [m].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoherentZone {
    pub h_min: f64,
    pub h_max: f64,
}

impl CoherentZone {
    pub fn width(&self) -> f64 {
        self.h_max - self.h_min
    }

    pub fn contains(&self, height: f64) -> bool {
        self.h_min <= height && height <= self.h_max
    }
}

impl SszModel {
    /// Height at which the weak-field Ξ equals `target_xi`.
    ///
    /// Negative results lie below the reference surface.
    pub fn optimal_qubit_height(&self, target_xi: f64, mass: f64) -> Result<f64> {
        ensure_positive("target segment density", target_xi)?;
        ensure_non_negative("mass", mass)?;
        let r_s = self.schwarzschild_radius(mass);
        Ok(r_s / (2.0 * target_xi) - self.reference_radius())
    }

    /// Heights around `center_height` within which Ξ stays inside
    /// `max_xi_variation` of its value at the centre.
    ///
    /// Each bound is where the weak-field Ξ departs from Ξ_center by the full
    /// tolerance, so the zone width is ≈ 4·ε·r²/r_s and |ΔΞ| ≤ ε at either
    /// edge. A zone whose lower bound would fall below the surface is slid up
    /// to start at height 0, keeping its width; its top edge then sits up to
    /// 2ε from Ξ_center, so the guarantee there is |ΔΞ| ≤ 2ε. The result
    /// always contains `center_height`. A massless body has no Ξ variation and
    /// yields an unbounded zone.
    pub fn segment_coherent_zone(
        &self,
        center_height: f64,
        max_xi_variation: f64,
        mass: f64,
    ) -> Result<CoherentZone> {
        ensure_non_negative("center height", center_height)?;
        ensure_non_negative("max Ξ variation", max_xi_variation)?;
        let r_center = self.radius_at_height(center_height);
        let r_s = self.checked_schwarzschild_radius(r_center, mass)?;
        if r_s == 0.0 {
            return Ok(CoherentZone {
                h_min: 0.0,
                h_max: f64::INFINITY,
            });
        }

        let xi_center = self.segment_density(r_center, mass, Regime::Weak)?;
        let mut xi_low = xi_center - max_xi_variation;
        let xi_high = xi_center + max_xi_variation;
        if xi_low <= 0.0 {
            tracing::debug!(xi_center, max_xi_variation, "zone lower Ξ clamped to floor");
            xi_low = XI_FLOOR.min(xi_center);
        }

        // higher r means lower Ξ
        let r_top = r_s / (2.0 * xi_low);
        let r_bottom = r_s / (2.0 * xi_high);
        let mut h_min = (r_bottom - self.reference_radius()).min(center_height);
        let mut h_max = (r_top - self.reference_radius()).max(center_height);

        if h_min < 0.0 {
            // Keeps the full 4εr²/r_s width rather than centring ±ε/2 on
            // Ξ_center; the top edge may reach 2ε.
            h_max -= h_min;
            h_min = 0.0;
        }
        Ok(CoherentZone { h_min, h_max })
    }
}
