//! Time-dilation factor D = 1 / (1 + Ξ) and robust differences of it.

use crate::error::{Result, ensure_finite};
use crate::model::SszModel;
use crate::segment::Regime;

impl SszModel {
    /// D(r) = 1 / (1 + Ξ(r)) with auto regime selection. Always in (0, 1].
    pub fn time_dilation(&self, r: f64, mass: f64) -> Result<f64> {
        let xi = self.segment_density_auto(r, mass)?;
        Ok(1.0 / (1.0 + xi))
    }

    /// D(r) in an explicitly chosen regime.
    pub fn time_dilation_in(&self, r: f64, mass: f64, regime: Regime) -> Result<f64> {
        let xi = self.segment_density(r, mass, regime)?;
        Ok(1.0 / (1.0 + xi))
    }

    /// D(r1) − D(r2), positive when r1 is less dilated.
    ///
    /// Never subtracts the two factors directly when both radii share a
    /// regime. In the weak field
    ///
    /// ΔD = 2·r_s·(r1 − r2) / ((2·r1 + r_s)·(2·r2 + r_s))
    ///
    /// which stays accurate for sub-micrometre height differences at
    /// planetary radii, where D(r1) and D(r2) agree to every bit.
    pub fn time_dilation_difference(&self, r1: f64, r2: f64, mass: f64) -> Result<f64> {
        let regime_1 = self.select_regime(r1, mass)?;
        let regime_2 = self.select_regime(r2, mass)?;
        if regime_1 != regime_2 {
            tracing::debug!(r1, r2, "radii straddle the regime cutover; subtracting directly");
            return Ok(self.time_dilation(r1, mass)? - self.time_dilation(r2, mass)?);
        }
        self.time_dilation_difference_in(r1, r2, mass, regime_1)
    }

    /// D(r1) − D(r2) with both radii evaluated in `regime`.
    pub fn time_dilation_difference_in(
        &self,
        r1: f64,
        r2: f64,
        mass: f64,
        regime: Regime,
    ) -> Result<f64> {
        match regime {
            Regime::Weak => {
                let r_s = self.checked_schwarzschild_radius(r1, mass)?;
                self.checked_schwarzschild_radius(r2, mass)?;
                Ok(2.0 * r_s * (r1 - r2) / ((2.0 * r1 + r_s) * (2.0 * r2 + r_s)))
            }
            Regime::Strong => {
                // D1 − D2 = −(Ξ1 − Ξ2) / ((1 + Ξ1)(1 + Ξ2))
                let d_xi = self.segment_density_difference(r1, r2, mass, Regime::Strong)?;
                let xi_1 = self.segment_density(r1, mass, Regime::Strong)?;
                let xi_2 = self.segment_density(r2, mass, Regime::Strong)?;
                Ok(-d_xi / ((1.0 + xi_1) * (1.0 + xi_2)))
            }
        }
    }

    /// |ΔD|: seconds of proper-time disagreement per coordinate second.
    pub fn time_difference_per_second(&self, r1: f64, r2: f64, mass: f64) -> Result<f64> {
        Ok(self.time_dilation_difference(r1, r2, mass)?.abs())
    }

    /// Proper-time offset accumulated at `height` relative to the surface
    /// over `duration` seconds. Positive above the surface.
    pub fn height_to_time_offset(&self, height: f64, duration: f64, mass: f64) -> Result<f64> {
        ensure_finite("height", height)?;
        ensure_finite("duration", duration)?;
        let r_surface = self.reference_radius();
        let delta_d = self.time_dilation_difference(self.radius_at_height(height), r_surface, mass)?;
        Ok(delta_d * duration)
    }
}
