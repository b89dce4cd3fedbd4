//! The DOECLIM engine: one-time initialization and the per-step recurrence.
//!
//! # What this does
//!
//! 1. [`Doeclim::from_parameters`] derives every run-independent quantity
//!    from a parameter set: the characteristic time scales, the diffusion
//!    response kernel over the full horizon, and the implicit/explicit 2x2
//!    system matrices.
//! 2. [`Doeclim::step`] advances the two-box temperature state by one time
//!    index, convolving the SST history against the kernel and applying the
//!    implicit solve, then derives global mean temperature and the heat
//!    uptake quantities for that index.
//! 3. [`Doeclim::run`] drives the recurrence over the whole forcing horizon
//!    and collects the output series.
//!
//! # Physics overview
//!
//! The land box and the ocean mixed layer exchange heat and respond to a
//! common radiative forcing; the mixed layer additionally loses heat to the
//! interior ocean, whose memory of past SST anomalies is captured by the
//! analytic diffusion kernel. The discretization is a trapezoidal
//! implicit-explicit scheme with a Hammer-Hollingsworth stabilization
//! (Kriegler 2005, appendix A; Tanaka and Kriegler 2007, section 2.3).
//!
//! The recurrence is strictly sequential: index `t` needs the temperatures
//! of all indices below it, so there is no parallelism within a run. Runs
//! with independent engines are free to execute concurrently.

use crate::constants::{BSI, CAL, CAS, FLND, FSO};
use crate::errors::{DoeclimError, DoeclimResult};
use crate::kernel::DiffusionKernel;
use crate::matrices::SystemMatrices;
use crate::parameters::DoeclimParameters;
use crate::state::{SimulationOutput, StepState};
use crate::timescales::Timescales;
use crate::FloatValue;
use log::debug;
use nalgebra::Vector2;
use ndarray::{Array1, ArrayView1};

/// A fully initialized DOECLIM engine for one parameter set.
///
/// Initialization is the dominant cost when the engine is driven repeatedly
/// by a calibration loop; kernel and matrices belong to exactly one
/// parameter set and are never updated incrementally.
#[derive(Debug, Clone)]
pub struct Doeclim {
    parameters: DoeclimParameters,
    timescales: Timescales,
    kernel: DiffusionKernel,
    matrices: SystemMatrices,
}

impl Doeclim {
    /// Derive time scales, kernel and system matrices from a parameter set.
    pub fn from_parameters(parameters: DoeclimParameters) -> DoeclimResult<Self> {
        parameters.validate()?;
        let timescales = Timescales::from_parameters(&parameters)?;
        let kernel = DiffusionKernel::build(
            parameters.n_steps,
            timescales.bottom_reflection,
            parameters.time_step,
        )?;
        let matrices =
            SystemMatrices::build(&timescales, parameters.time_step, kernel.value(0))?;

        debug!(
            "doeclim initialized: taucfl={:.3} taucfs={:.3} taukls={:.3} tauksl={:.3} taudif={:.3} taubot={:.3}",
            timescales.land_feedback,
            timescales.ocean_feedback,
            timescales.land_sea_exchange,
            timescales.sea_land_exchange,
            timescales.ocean_diffusion,
            timescales.bottom_reflection,
        );

        Ok(Self {
            parameters,
            timescales,
            kernel,
            matrices,
        })
    }

    pub fn parameters(&self) -> &DoeclimParameters {
        &self.parameters
    }

    pub fn timescales(&self) -> &Timescales {
        &self.timescales
    }

    pub fn kernel(&self) -> &DiffusionKernel {
        &self.kernel
    }

    pub fn matrices(&self) -> &SystemMatrices {
        &self.matrices
    }

    /// Advance the recurrence to time index `t`.
    ///
    /// `temp_landair` and `temp_sst` hold the already computed history; only
    /// indices `< t` are read. `forcing` must cover indices `..= t` and is a
    /// single global series applied to both boxes. `previous` is the state
    /// written at index `t - 1`.
    ///
    /// Index 0 is the unperturbed state and is exactly zero in every field.
    pub fn step(
        &self,
        t: usize,
        forcing: ArrayView1<FloatValue>,
        temp_landair: ArrayView1<FloatValue>,
        temp_sst: ArrayView1<FloatValue>,
        previous: &StepState,
    ) -> DoeclimResult<StepState> {
        if t >= self.parameters.n_steps {
            return Err(DoeclimError::Configuration(format!(
                "time index {} is outside the horizon of {} steps",
                t, self.parameters.n_steps
            )));
        }
        if t == 0 {
            return Ok(StepState::default());
        }
        if forcing.len() <= t {
            return Err(DoeclimError::Configuration(format!(
                "forcing series has {} values but index {} is required",
                forcing.len(),
                t
            )));
        }

        let dt = self.parameters.time_step;
        let ts = &self.timescales;

        // forcing increments; one global series drives both boxes
        let dq_land = forcing[t] - forcing[t - 1];
        let dq_ocean = dq_land;

        // Hammer-Hollingsworth correction of the forcing terms
        let qc1 = (dq_land / CAL * (1.0 / ts.land_feedback + 1.0 / ts.land_sea_exchange)
            - BSI * dq_ocean / (CAS * ts.land_sea_exchange))
            * dt
            * dt
            / 12.0;
        let qc2 = (dq_ocean / CAS * (1.0 / ts.ocean_feedback + BSI / ts.sea_land_exchange)
            - dq_land / (CAL * ts.sea_land_exchange))
            * dt
            * dt
            / 12.0;

        // Trapezoidal forcing integral, assuming a linear forcing change
        // over the step. The factor 1/2 in front of Q in the cited equation
        // (A.27 in Kriegler 2005) is a typo; the corrected form is used.
        let dq1 = 0.5 * dt / CAL * (forcing[t] + forcing[t - 1]) + qc1;
        let dq2 = 0.5 * dt / CAS * (forcing[t] + forcing[t - 1]) + qc2;

        // Past contribution of the SST history to ocean heat uptake.
        // Only the ocean box has long memory; the land term is zero.
        let mut dpast2 = 0.0;
        for i in 0..t {
            dpast2 += temp_sst[i] * self.kernel.value(t - i);
        }
        dpast2 *= FSO * (dt / ts.ocean_diffusion).sqrt();

        // explicit contribution of the previous step
        let dteaux =
            self.matrices.explicit * Vector2::new(temp_landair[t - 1], temp_sst[t - 1]);

        // implicit solve for the new land and sea surface temperatures
        let solution = self.matrices.implicit_inverse
            * Vector2::new(dq1 + dteaux[0], dq2 + dpast2 + dteaux[1]);
        let temp_landair_t = solution[0];
        let temp_sst_t = solution[1];

        let temp_t = FLND * temp_landair_t + (1.0 - FLND) * BSI * temp_sst_t;

        // heat uptake over the interval (t-1, t]
        let heatflux_mixed_t = CAS * (temp_sst_t - temp_sst[t - 1]);

        // the interior flux convolution uses the kernel shifted by one lag
        // relative to the uptake convolution above
        let mut interior_sum = 0.0;
        for i in 0..t {
            interior_sum += temp_sst[i] * self.kernel.value(t - i - 1);
        }
        let heatflux_interior_t =
            CAS * FSO / (ts.ocean_diffusion * dt).sqrt() * (2.0 * temp_sst_t - interior_sum);

        let heat_mixed_t = previous.heat_mixed + heatflux_mixed_t * (ts.flux_to_heat * dt);
        let heat_interior_t =
            previous.heat_interior + heatflux_interior_t * FSO * (ts.flux_to_heat * dt);

        let state = StepState {
            temp_landair: temp_landair_t,
            temp_sst: temp_sst_t,
            temp: temp_t,
            heatflux_mixed: heatflux_mixed_t,
            heatflux_interior: heatflux_interior_t,
            heat_mixed: heat_mixed_t,
            heat_interior: heat_interior_t,
        };
        state.ensure_finite(t)?;
        Ok(state)
    }

    /// Run the full horizon and collect every output series.
    ///
    /// The forcing series (W/m^2) must cover at least `n_steps` values.
    pub fn run(&self, forcing: &Array1<FloatValue>) -> DoeclimResult<SimulationOutput> {
        let n_steps = self.parameters.n_steps;
        if forcing.len() < n_steps {
            return Err(DoeclimError::Configuration(format!(
                "forcing series has {} values but the horizon is {} steps",
                forcing.len(),
                n_steps
            )));
        }

        let mut output = SimulationOutput::zeros(n_steps);
        let mut previous = StepState::default();
        for t in 0..n_steps {
            let state = self.step(
                t,
                forcing.view(),
                output.temp_landair.view(),
                output.temp_sst.view(),
                &previous,
            )?;
            output.write(t, &state);
            previous = state;
        }

        debug!(
            "doeclim run complete: {} steps, final temperature {:.4} K",
            n_steps,
            output.final_temperature()
        );
        Ok(output)
    }
}
