//! DOECLIM: a diffusion ocean energy balance climate model.
//!
//! This crate is a thin facade over [`doeclim_core`], which holds the
//! numerical engine. A typical use initializes an engine from a parameter
//! set and runs it over a radiative forcing series:
//!
//! ```
//! use doeclim::{Doeclim, DoeclimParameters};
//! use ndarray::Array1;
//!
//! let engine = Doeclim::from_parameters(DoeclimParameters {
//!     n_steps: 10,
//!     ..Default::default()
//! })?;
//! let forcing = Array1::from_shape_fn(10, |t| if t == 0 { 0.0 } else { 1.85 });
//! let output = engine.run(&forcing)?;
//! assert!(output.final_temperature() > 0.0);
//! # Ok::<(), doeclim::DoeclimError>(())
//! ```

pub use doeclim_core::{
    constants, engine, errors, kernel, matrices, parameters, state, timescales,
};

pub use doeclim_core::{
    Doeclim, DoeclimError, DoeclimParameters, DoeclimResult, FloatValue, SimulationOutput,
    StepState, Time, Timescales,
};
