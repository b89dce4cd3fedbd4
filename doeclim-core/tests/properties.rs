//! Behavioural properties of the DOECLIM engine.
//!
//! These tests exercise full simulations against the analytically known
//! behaviour of the energy balance: zero response to zero forcing, monotone
//! approach to the equilibrium warming, causality of the recurrence, and
//! rejection of inadmissible parameter sets.

use approx::assert_relative_eq;
use doeclim_core::constants::Q2CO;
use doeclim_core::{Doeclim, DoeclimError, DoeclimParameters};
use nalgebra::Matrix2;
use ndarray::Array1;

fn engine(n_steps: usize) -> Doeclim {
    Doeclim::from_parameters(DoeclimParameters {
        time_step: 1.0,
        climate_sensitivity: 3.0,
        ocean_diffusivity: 3.5,
        n_steps,
    })
    .unwrap()
}

/// Forcing that is zero at index 0 and constant afterwards.
fn step_forcing(n_steps: usize, level: f64) -> Array1<f64> {
    Array1::from_shape_fn(n_steps, |t| if t == 0 { 0.0 } else { level })
}

#[test]
fn initial_conditions_are_exactly_zero() {
    let output = engine(5).run(&step_forcing(5, 1.85)).unwrap();

    assert_eq!(output.temp_landair[0], 0.0);
    assert_eq!(output.temp_sst[0], 0.0);
    assert_eq!(output.temp[0], 0.0);
    assert_eq!(output.heatflux_mixed[0], 0.0);
    assert_eq!(output.heatflux_interior[0], 0.0);
    assert_eq!(output.heat_mixed[0], 0.0);
    assert_eq!(output.heat_interior[0], 0.0);
}

#[test]
fn zero_forcing_gives_zero_response() {
    let output = engine(50).run(&Array1::zeros(50)).unwrap();

    for t in 0..50 {
        assert_eq!(output.temp[t], 0.0, "temp at index {}", t);
        assert_eq!(output.heatflux_mixed[t], 0.0, "mixed flux at index {}", t);
        assert_eq!(
            output.heatflux_interior[t],
            0.0,
            "interior flux at index {}",
            t
        );
    }
}

#[test]
fn implicit_inverse_matches_within_tolerance() {
    let matrices = engine(50).matrices().clone();
    let product = matrices.implicit_inverse * matrices.implicit;
    let identity = Matrix2::identity();

    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(product[(i, j)], identity[(i, j)], epsilon = 1e-9);
        }
    }
}

#[test]
fn warming_is_monotone_and_bounded_by_equilibrium() {
    // constant forcing at half the 2xCO2 level; the equilibrium warming
    // implied by the sensitivity is t2co * Q / q2co = 1.5 K
    let output = engine(50).run(&step_forcing(50, 1.85)).unwrap();
    let equilibrium = 3.0 * 1.85 / Q2CO;

    for t in 1..50 {
        assert!(
            output.temp[t] >= output.temp[t - 1] - 1e-12,
            "temperature decreased at index {}: {} -> {}",
            t,
            output.temp[t - 1],
            output.temp[t]
        );
        assert!(
            output.temp[t] < equilibrium,
            "temperature {} at index {} exceeds equilibrium {}",
            output.temp[t],
            t,
            equilibrium
        );
    }

    // fifty years should take the response a substantial part of the way
    assert!(output.temp[49] > 0.5 * equilibrium);
}

#[test]
fn output_is_causal_in_the_forcing() {
    let model = engine(50);

    let base = step_forcing(50, 1.85);
    let mut diverging = base.clone();
    for t in 25..50 {
        diverging[t] = 0.0;
    }

    let output_base = model.run(&base).unwrap();
    let output_diverging = model.run(&diverging).unwrap();

    // identical up to the last index whose forcing prefix agrees
    for t in 0..25 {
        assert_eq!(
            output_base.temp[t], output_diverging.temp[t],
            "global temperature differs at index {}",
            t
        );
        assert_eq!(
            output_base.temp_sst[t], output_diverging.temp_sst[t],
            "SST differs at index {}",
            t
        );
        assert_eq!(
            output_base.heat_interior[t], output_diverging.heat_interior[t],
            "interior heat differs at index {}",
            t
        );
    }
    assert_ne!(output_base.temp[25], output_diverging.temp[25]);
}

#[test]
fn doubling_diffusivity_shrinks_the_diffusion_timescales() {
    let base = engine(10);
    let doubled = Doeclim::from_parameters(DoeclimParameters {
        ocean_diffusivity: 7.0,
        ..base.parameters().clone()
    })
    .unwrap();

    assert!(doubled.timescales().bottom_reflection < base.timescales().bottom_reflection);
    assert!(doubled.timescales().ocean_diffusion < base.timescales().ocean_diffusion);
}

#[test]
fn five_step_scenario_warms_and_takes_up_heat() {
    let output = engine(5).run(&step_forcing(5, 1.85)).unwrap();

    assert_eq!(output.temp[0], 0.0);
    assert!(output.temp[1] > 0.0);
    for t in 2..5 {
        assert!(
            output.temp[t] >= output.temp[t - 1],
            "temperature decreased at index {}",
            t
        );
        assert!(
            output.heat_mixed[t] > output.heat_mixed[t - 1],
            "mixed layer heat did not increase at index {}",
            t
        );
    }
    assert!(output.heat_mixed[1] > output.heat_mixed[0]);
}

#[test]
fn negative_diffusivity_is_a_configuration_error() {
    let err = Doeclim::from_parameters(DoeclimParameters {
        ocean_diffusivity: -1.0,
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, DoeclimError::Configuration(_)));
}

#[test]
fn forcing_shorter_than_the_horizon_is_rejected() {
    let err = engine(50).run(&step_forcing(30, 1.85)).unwrap_err();
    assert!(matches!(err, DoeclimError::Configuration(_)));
}
