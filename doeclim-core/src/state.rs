//! Per-step and full-run model state.

use crate::errors::{DoeclimError, DoeclimResult};
use crate::FloatValue;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Model outputs for a single time index.
///
/// Index 0 of a run is the unperturbed state, which is exactly zero in every
/// field; see [`Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepState {
    /// Land air temperature anomaly (K).
    pub temp_landair: FloatValue,
    /// Sea surface temperature anomaly (K).
    pub temp_sst: FloatValue,
    /// Area-weighted global mean temperature anomaly (K).
    pub temp: FloatValue,
    /// Heat flux into the mixed layer (W/m^2).
    pub heatflux_mixed: FloatValue,
    /// Heat flux into the interior ocean (W/m^2).
    pub heatflux_interior: FloatValue,
    /// Cumulative mixed layer heat content anomaly (10^22 J).
    pub heat_mixed: FloatValue,
    /// Cumulative interior ocean heat content anomaly (10^22 J).
    pub heat_interior: FloatValue,
}

impl StepState {
    pub(crate) fn ensure_finite(&self, time_index: usize) -> DoeclimResult<()> {
        let values = [
            self.temp_landair,
            self.temp_sst,
            self.temp,
            self.heatflux_mixed,
            self.heatflux_interior,
            self.heat_mixed,
            self.heat_interior,
        ];
        if values.iter().all(|value| value.is_finite()) {
            Ok(())
        } else {
            Err(DoeclimError::NumericalInstability(format!(
                "non-finite model state at time index {}",
                time_index
            )))
        }
    }
}

/// Full output series of one simulation, one value per time index.
///
/// Each index is written exactly once, in increasing order; a run aborted
/// between steps leaves the already-written indices valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Land air temperature anomaly (K).
    pub temp_landair: Array1<FloatValue>,
    /// Sea surface temperature anomaly (K).
    pub temp_sst: Array1<FloatValue>,
    /// Area-weighted global mean temperature anomaly (K).
    pub temp: Array1<FloatValue>,
    /// Heat flux into the mixed layer (W/m^2).
    pub heatflux_mixed: Array1<FloatValue>,
    /// Heat flux into the interior ocean (W/m^2).
    pub heatflux_interior: Array1<FloatValue>,
    /// Cumulative mixed layer heat content anomaly (10^22 J).
    pub heat_mixed: Array1<FloatValue>,
    /// Cumulative interior ocean heat content anomaly (10^22 J).
    pub heat_interior: Array1<FloatValue>,
}

impl SimulationOutput {
    pub(crate) fn zeros(n_steps: usize) -> Self {
        Self {
            temp_landair: Array1::zeros(n_steps),
            temp_sst: Array1::zeros(n_steps),
            temp: Array1::zeros(n_steps),
            heatflux_mixed: Array1::zeros(n_steps),
            heatflux_interior: Array1::zeros(n_steps),
            heat_mixed: Array1::zeros(n_steps),
            heat_interior: Array1::zeros(n_steps),
        }
    }

    pub(crate) fn write(&mut self, time_index: usize, state: &StepState) {
        self.temp_landair[time_index] = state.temp_landair;
        self.temp_sst[time_index] = state.temp_sst;
        self.temp[time_index] = state.temp;
        self.heatflux_mixed[time_index] = state.heatflux_mixed;
        self.heatflux_interior[time_index] = state.heatflux_interior;
        self.heat_mixed[time_index] = state.heat_mixed;
        self.heat_interior[time_index] = state.heat_interior;
    }

    /// Number of time indices in the output.
    pub fn len(&self) -> usize {
        self.temp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temp.is_empty()
    }

    /// The last global mean temperature anomaly of the run (K).
    pub fn final_temperature(&self) -> FloatValue {
        self.temp[self.temp.len() - 1]
    }
}
