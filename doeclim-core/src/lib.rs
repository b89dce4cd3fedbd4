//! Core numerical engine for DOECLIM, a diffusion ocean energy balance
//! climate model.
//!
//! DOECLIM couples a two-box energy balance (land air and ocean mixed layer)
//! to a semi-analytic one-dimensional heat diffusion representation of the
//! interior ocean. Given a radiative forcing series and three physical
//! parameters it produces land, sea surface and global mean temperature
//! anomalies together with mixed layer and interior ocean heat uptake.
//!
//! The engine is split into a one-time initialization (time scales, the
//! diffusion response kernel and the 2x2 system matrices, see [`Doeclim`])
//! and a strictly sequential per-step recurrence. It performs no I/O and
//! holds no mutable state between runs; every distinct parameter set gets a
//! freshly initialized engine.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod kernel;
pub mod matrices;
pub mod parameters;
pub mod state;
pub mod timescales;

pub use engine::Doeclim;
pub use errors::{DoeclimError, DoeclimResult};
pub use parameters::DoeclimParameters;
pub use state::{SimulationOutput, StepState};
pub use timescales::Timescales;

/// Floating point values used throughout the model.
pub type FloatValue = f64;

/// Time values (years).
pub type Time = f64;
