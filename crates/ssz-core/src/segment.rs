//! Segment density Ξ(r) and its radial gradient.
//!
//! Two regimes:
//! - weak field (r ≫ r_s): Ξ = r_s / (2r), gradient −r_s / (2r²)
//! - strong field (r ~ r_s): Ξ = 1 − exp(−φ·r/r_s), gradient (φ/r_s)·exp(−φ·r/r_s)
//!
//! The weak gradient is negative and the strong gradient positive. The two
//! forms are not matched at the auto-selection cutover, so Ξ jumps there.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SszError, ensure_non_negative, ensure_positive, invalid};
use crate::model::SszModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Weak,
    Strong,
}

impl Regime {
    /// Weak when r / r_s exceeds `cutover`, strong otherwise.
    /// A massless body (r_s = 0) is always weak.
    pub fn select(r: f64, r_s: f64, cutover: f64) -> Self {
        if r_s <= 0.0 || r / r_s > cutover {
            Regime::Weak
        } else {
            Regime::Strong
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Weak => write!(f, "weak"),
            Regime::Strong => write!(f, "strong"),
        }
    }
}

impl FromStr for Regime {
    type Err = SszError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "weak" => Ok(Regime::Weak),
            "strong" => Ok(Regime::Strong),
            other => Err(invalid(format!("unknown regime '{other}'"))),
        }
    }
}

impl SszModel {
    /// r_s = 2GM/c². M = 0 yields 0.
    pub fn schwarzschild_radius(&self, mass: f64) -> f64 {
        let c = self.constants();
        2.0 * c.gravitational_constant * mass / (c.speed_of_light * c.speed_of_light)
    }

    /// Validate (r, M) and return r_s.
    pub(crate) fn checked_schwarzschild_radius(&self, r: f64, mass: f64) -> Result<f64> {
        ensure_positive("radius", r)?;
        ensure_non_negative("mass", mass)?;
        Ok(self.schwarzschild_radius(mass))
    }

    /// Regime the auto rule picks at radius `r`.
    pub fn select_regime(&self, r: f64, mass: f64) -> Result<Regime> {
        let r_s = self.checked_schwarzschild_radius(r, mass)?;
        let regime = Regime::select(r, r_s, self.config().regime_cutover);
        tracing::trace!(r, r_s, %regime, "selected regime");
        Ok(regime)
    }

    /// Ξ(r) in the given regime.
    pub fn segment_density(&self, r: f64, mass: f64, regime: Regime) -> Result<f64> {
        let r_s = self.checked_schwarzschild_radius(r, mass)?;
        match regime {
            Regime::Weak => Ok(r_s / (2.0 * r)),
            Regime::Strong => {
                let a = self.saturation_exponent(r, r_s)?;
                Ok(-(-a).exp_m1())
            }
        }
    }

    /// Ξ(r) with the regime chosen by [`SszModel::select_regime`].
    pub fn segment_density_auto(&self, r: f64, mass: f64) -> Result<f64> {
        let regime = self.select_regime(r, mass)?;
        self.segment_density(r, mass, regime)
    }

    /// dΞ/dr in the given regime [1/m].
    pub fn segment_gradient(&self, r: f64, mass: f64, regime: Regime) -> Result<f64> {
        let r_s = self.checked_schwarzschild_radius(r, mass)?;
        match regime {
            Regime::Weak => Ok(-r_s / (2.0 * r * r)),
            Regime::Strong => {
                let a = self.saturation_exponent(r, r_s)?;
                Ok(self.constants().golden_ratio / r_s * (-a).exp())
            }
        }
    }

    pub fn segment_gradient_auto(&self, r: f64, mass: f64) -> Result<f64> {
        let regime = self.select_regime(r, mass)?;
        self.segment_gradient(r, mass, regime)
    }

    /// Ξ(r1) − Ξ(r2) in one regime, without subtracting two nearly equal values.
    ///
    /// Weak: r_s·(r2 − r1) / (2·r1·r2).
    /// Strong: e^{−a2}·(1 − e^{−(a1 − a2)}) with a = φ·r/r_s, via `exp_m1`.
    pub fn segment_density_difference(
        &self,
        r1: f64,
        r2: f64,
        mass: f64,
        regime: Regime,
    ) -> Result<f64> {
        let r_s = self.checked_schwarzschild_radius(r1, mass)?;
        ensure_positive("radius", r2)?;
        match regime {
            Regime::Weak => Ok(r_s * (r2 - r1) / (2.0 * r1 * r2)),
            Regime::Strong => {
                let a2 = self.saturation_exponent(r2, r_s)?;
                let da = self.constants().golden_ratio * (r1 - r2) / r_s;
                Ok(-(-a2).exp() * (-da).exp_m1())
            }
        }
    }

    /// Ξ(r1) − Ξ(r2) under auto selection.
    ///
    /// Uses the cancellation-safe form when both radii land in the same
    /// regime; radii straddling the cutover are far apart relative to r_s,
    /// so direct subtraction is exact enough there.
    pub fn segment_density_difference_auto(&self, r1: f64, r2: f64, mass: f64) -> Result<f64> {
        let regime_1 = self.select_regime(r1, mass)?;
        let regime_2 = self.select_regime(r2, mass)?;
        if regime_1 == regime_2 {
            self.segment_density_difference(r1, r2, mass, regime_1)
        } else {
            tracing::debug!(r1, r2, "radii straddle the regime cutover; subtracting directly");
            Ok(self.segment_density(r1, mass, regime_1)? - self.segment_density(r2, mass, regime_2)?)
        }
    }

    /// φ·r/r_s. The strong-field form is undefined for a massless body.
    fn saturation_exponent(&self, r: f64, r_s: f64) -> Result<f64> {
        if r_s <= 0.0 {
            return Err(invalid("strong-field regime requires a positive mass"));
        }
        Ok(self.constants().golden_ratio * r / r_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{M_EARTH, PHI, R_EARTH};
    use approx::assert_relative_eq;

    fn model() -> SszModel {
        SszModel::earth()
    }

    #[test]
    fn test_earth_schwarzschild_radius() {
        let r_s = model().schwarzschild_radius(M_EARTH);
        assert!((r_s - 8.87e-3).abs() < 0.01e-3, "r_s = {r_s}");
    }

    #[test]
    fn test_zero_mass_schwarzschild_radius() {
        assert_eq!(model().schwarzschild_radius(0.0), 0.0);
    }

    #[test]
    fn test_xi_at_earth_surface() {
        let xi = model().segment_density(R_EARTH, M_EARTH, Regime::Weak).unwrap();
        assert_relative_eq!(xi, 6.96e-10, max_relative = 1e-3);
    }

    #[test]
    fn test_auto_matches_weak_on_earth() {
        let m = model();
        assert_eq!(m.select_regime(R_EARTH, M_EARTH).unwrap(), Regime::Weak);
        assert_eq!(
            m.segment_density_auto(R_EARTH, M_EARTH).unwrap(),
            m.segment_density(R_EARTH, M_EARTH, Regime::Weak).unwrap()
        );
    }

    #[test]
    fn test_auto_selects_strong_near_horizon() {
        let m = model();
        let r_s = m.schwarzschild_radius(M_EARTH);
        assert_eq!(m.select_regime(r_s, M_EARTH).unwrap(), Regime::Strong);
        assert_eq!(m.select_regime(100.0 * r_s * 0.999, M_EARTH).unwrap(), Regime::Strong);
        assert_eq!(m.select_regime(101.0 * r_s, M_EARTH).unwrap(), Regime::Weak);
    }

    #[test]
    fn test_strong_field_at_horizon_is_finite() {
        let m = model();
        let r_s = m.schwarzschild_radius(M_EARTH);
        let xi = m.segment_density(r_s, M_EARTH, Regime::Strong).unwrap();
        assert_relative_eq!(xi, 1.0 - (-PHI).exp(), max_relative = 1e-12);
        assert!(xi < 1.0);
        let weak = m.segment_density(r_s, M_EARTH, Regime::Weak).unwrap();
        assert_relative_eq!(weak, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_gradient_signs() {
        let m = model();
        let r_s = m.schwarzschild_radius(M_EARTH);
        assert!(m.segment_gradient(R_EARTH, M_EARTH, Regime::Weak).unwrap() < 0.0);
        assert!(m.segment_gradient(2.0 * r_s, M_EARTH, Regime::Strong).unwrap() > 0.0);
    }

    #[test]
    fn test_weak_gradient_matches_finite_difference() {
        let m = model();
        let h = 1.0;
        let lo = m.segment_density(R_EARTH - h, M_EARTH, Regime::Weak).unwrap();
        let hi = m.segment_density(R_EARTH + h, M_EARTH, Regime::Weak).unwrap();
        let numeric = (hi - lo) / (2.0 * h);
        let analytic = m.segment_gradient(R_EARTH, M_EARTH, Regime::Weak).unwrap();
        assert_relative_eq!(numeric, analytic, max_relative = 1e-4);
    }

    #[test]
    fn test_gradient_scales_as_inverse_square() {
        let m = model();
        let g1 = m.segment_gradient(R_EARTH, M_EARTH, Regime::Weak).unwrap();
        let g2 = m.segment_gradient(2.0 * R_EARTH, M_EARTH, Regime::Weak).unwrap();
        assert_relative_eq!(g1 / g2, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let m = model();
        for r in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                m.segment_density(r, M_EARTH, Regime::Weak),
                Err(SszError::InvalidArgument(_))
            ));
            assert!(m.segment_gradient(r, M_EARTH, Regime::Strong).is_err());
        }
    }

    #[test]
    fn test_zero_mass_is_flat() {
        let m = model();
        assert_eq!(m.segment_density_auto(R_EARTH, 0.0).unwrap(), 0.0);
        assert_eq!(m.segment_gradient_auto(R_EARTH, 0.0).unwrap(), -0.0);
        assert!(m.segment_density(R_EARTH, 0.0, Regime::Strong).is_err());
    }

    #[test]
    fn test_weak_difference_survives_micrometre_separation() {
        let m = model();
        let r2 = R_EARTH + 1e-6;
        let diff = m.segment_density_difference(R_EARTH, r2, M_EARTH, Regime::Weak).unwrap();
        assert!(diff > 0.0, "closer radius has the larger density");
        let r_s = m.schwarzschild_radius(M_EARTH);
        let reference = r_s * (r2 - R_EARTH) / (2.0 * R_EARTH * R_EARTH);
        assert_relative_eq!(diff, reference, max_relative = 1e-6);
    }

    #[test]
    fn test_strong_difference_matches_direct() {
        let m = model();
        let r_s = m.schwarzschild_radius(M_EARTH);
        let (r1, r2) = (3.0 * r_s, 1.5 * r_s);
        let stable = m.segment_density_difference(r1, r2, M_EARTH, Regime::Strong).unwrap();
        let direct = m.segment_density(r1, M_EARTH, Regime::Strong).unwrap()
            - m.segment_density(r2, M_EARTH, Regime::Strong).unwrap();
        assert!(stable > 0.0, "strong-field density rises with r");
        assert_relative_eq!(stable, direct, max_relative = 1e-12);
    }

    #[test]
    fn test_difference_auto_across_cutover() {
        let m = model();
        let r_s = m.schwarzschild_radius(M_EARTH);
        let (near, far) = (10.0 * r_s, 1000.0 * r_s);
        let diff = m.segment_density_difference_auto(near, far, M_EARTH).unwrap();
        let direct = m.segment_density(near, M_EARTH, Regime::Strong).unwrap()
            - m.segment_density(far, M_EARTH, Regime::Weak).unwrap();
        assert_eq!(diff, direct);
    }

    #[test]
    fn test_regime_parse_and_display() {
        assert_eq!("weak".parse::<Regime>().unwrap(), Regime::Weak);
        assert_eq!("STRONG".parse::<Regime>().unwrap(), Regime::Strong);
        assert!("auto".parse::<Regime>().is_err());
        assert_eq!(Regime::Strong.to_string(), "strong");
    }

    #[test]
    fn test_custom_cutover() {
        let config = crate::config::SszConfig {
            regime_cutover: 5.0,
            ..Default::default()
        };
        let m = SszModel::new(config).unwrap();
        let r_s = m.schwarzschild_radius(M_EARTH);
        assert_eq!(m.select_regime(10.0 * r_s, M_EARTH).unwrap(), Regime::Weak);
    }
}
