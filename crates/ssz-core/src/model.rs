use crate::config::{PhysicalConstants, SszConfig};
use crate::error::Result;
use crate::heuristics::Heuristics;
use crate::qubit::Qubit;

/// Entry point for every operation of the engine.
///
/// Holds a validated, immutable [`SszConfig`]. All methods take `&self` and
/// are pure functions of their arguments, so one model can be shared freely
/// across threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SszModel {
    config: SszConfig,
}

impl SszModel {
    pub fn new(config: SszConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Default configuration: Earth as reference body.
    pub fn earth() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &SszConfig {
        &self.config
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.config.constants
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.config.heuristics
    }

    /// Mass of the configured reference body [kg].
    pub fn reference_mass(&self) -> f64 {
        self.config.constants.reference_mass
    }

    /// Radius of the configured reference body [m].
    pub fn reference_radius(&self) -> f64 {
        self.config.constants.reference_radius
    }

    /// Qubit angular frequency ω = 2π·f [rad/s].
    pub fn omega(&self) -> f64 {
        std::f64::consts::TAU * self.config.qubit_frequency_hz
    }

    /// Radial distance of a height above the reference surface.
    pub fn radius_at_height(&self, height: f64) -> f64 {
        self.reference_radius() + height
    }

    pub(crate) fn radius_of(&self, qubit: &Qubit) -> f64 {
        qubit.radius_from_center(self.reference_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{M_EARTH, R_EARTH};
    use crate::error::SszError;

    #[test]
    fn test_earth_model() {
        let model = SszModel::earth();
        assert_eq!(model.reference_mass(), M_EARTH);
        assert_eq!(model.radius_at_height(1.0), R_EARTH + 1.0);
    }

    #[test]
    fn test_omega_from_frequency() {
        let model = SszModel::earth();
        assert!((model.omega() - 2.0 * std::f64::consts::PI * 5e9).abs() < 1e-3);
    }

    #[test]
    fn test_new_validates() {
        let config = SszConfig {
            qubit_frequency_hz: -5e9,
            ..SszConfig::default()
        };
        assert!(matches!(SszModel::new(config), Err(SszError::Config(_))));
    }

    #[test]
    fn test_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SszModel>();
    }
}
