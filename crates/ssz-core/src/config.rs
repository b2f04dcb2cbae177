use serde::{Deserialize, Serialize};

use crate::constants::{C, DEFAULT_QUBIT_FREQUENCY_HZ, G, M_EARTH, PHI, R_EARTH, REGIME_CUTOVER};
use crate::error::{Result, SszError};
use crate::heuristics::Heuristics;

/// Physical constants of the model. Defaults describe the Earth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// [m/s]
    pub speed_of_light: f64,
    /// [m³/(kg·s²)]
    pub gravitational_constant: f64,
    /// Mass of the reference body [kg]
    pub reference_mass: f64,
    /// Radius of the reference body; qubit heights are measured from here [m]
    pub reference_radius: f64,
    pub golden_ratio: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            speed_of_light: C,
            gravitational_constant: G,
            reference_mass: M_EARTH,
            reference_radius: R_EARTH,
            golden_ratio: PHI,
        }
    }
}

/// Complete model configuration.
///
/// Every field is optional in TOML; missing fields fall back to defaults:
///
/// ```toml
/// regime_cutover = 100.0
/// qubit_frequency_hz = 5e9
///
/// [constants]
/// reference_mass = 5.972e24
///
/// [heuristics]
/// qubit_size = 1e-6
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SszConfig {
    pub constants: PhysicalConstants,
    /// r / r_s above which auto selection uses the weak-field form
    pub regime_cutover: f64,
    /// Qubit transition frequency used for phase drift [Hz]
    pub qubit_frequency_hz: f64,
    pub heuristics: Heuristics,
}

impl Default for SszConfig {
    fn default() -> Self {
        Self {
            constants: PhysicalConstants::default(),
            regime_cutover: REGIME_CUTOVER,
            qubit_frequency_hz: DEFAULT_QUBIT_FREQUENCY_HZ,
            heuristics: Heuristics::default(),
        }
    }
}

impl SszConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SszError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML (the inverse of [`SszConfig::from_toml_str`]).
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SszError::Config(format!("serialize: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        let c = &self.constants;
        let strictly_positive = [
            ("constants.speed_of_light", c.speed_of_light),
            ("constants.gravitational_constant", c.gravitational_constant),
            ("constants.reference_radius", c.reference_radius),
            ("constants.golden_ratio", c.golden_ratio),
            ("regime_cutover", self.regime_cutover),
            ("qubit_frequency_hz", self.qubit_frequency_hz),
        ];
        for (name, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SszError::Config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !(c.reference_mass.is_finite() && c.reference_mass >= 0.0) {
            return Err(SszError::Config(format!(
                "constants.reference_mass must be finite and >= 0, got {}",
                c.reference_mass
            )));
        }
        self.heuristics.validate().map_err(SszError::Config)
    }
}
