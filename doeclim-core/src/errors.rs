use thiserror::Error;

/// Error type for invalid model setups and failed integrations.
#[derive(Error, Debug)]
pub enum DoeclimError {
    /// Invalid or physically degenerate parameter combination.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A non-finite intermediate value or a near-singular system matrix.
    ///
    /// This is a property of the supplied parameters, not a transient
    /// condition; callers such as a calibration loop should reject the
    /// parameter draw rather than retry.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

/// Convenience type for `Result<T, DoeclimError>`.
pub type DoeclimResult<T> = Result<T, DoeclimError>;
