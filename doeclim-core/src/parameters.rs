//! DOECLIM parameters.

use crate::errors::{DoeclimError, DoeclimResult};
use crate::{FloatValue, Time};
use serde::{Deserialize, Serialize};

/// Parameters of the DOECLIM two-box climate model.
///
/// These are the quantities varied between runs, e.g. by a calibration loop
/// drawing new parameter sets; everything else about the model is a fixed
/// physical constant in [`crate::constants`]. An engine initialized from one
/// parameter set must not be reused for another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoeclimParameters {
    /// Step size of the time axis (yr).
    /// Default: 1.0
    pub time_step: Time,

    /// Equilibrium climate sensitivity to a doubling of CO2 (K).
    /// Default: 3.0
    pub climate_sensitivity: FloatValue,

    /// Vertical diffusivity of the interior ocean (cm^2/s).
    /// Converted to m^2/yr internally.
    /// Default: 3.5
    pub ocean_diffusivity: FloatValue,

    /// Number of time steps in the simulation horizon.
    /// Default: 250
    pub n_steps: usize,
}

impl Default for DoeclimParameters {
    fn default() -> Self {
        Self {
            time_step: 1.0,
            climate_sensitivity: 3.0,
            ocean_diffusivity: 3.5,
            n_steps: 250,
        }
    }
}

impl DoeclimParameters {
    /// Check the admissible parameter ranges.
    pub fn validate(&self) -> DoeclimResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(DoeclimError::Configuration(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.climate_sensitivity.is_finite() || self.climate_sensitivity <= 0.0 {
            return Err(DoeclimError::Configuration(format!(
                "climate_sensitivity must be positive and finite, got {}",
                self.climate_sensitivity
            )));
        }
        if !self.ocean_diffusivity.is_finite() || self.ocean_diffusivity < 0.0 {
            return Err(DoeclimError::Configuration(format!(
                "ocean_diffusivity must be non-negative and finite, got {}",
                self.ocean_diffusivity
            )));
        }
        if self.n_steps < 2 {
            return Err(DoeclimError::Configuration(format!(
                "n_steps must be at least 2, got {}",
                self.n_steps
            )));
        }
        Ok(())
    }
}
