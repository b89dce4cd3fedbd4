//! System matrices of the implicit-explicit two-box recurrence.
//!
//! The semi-discretized energy balance is advanced with a trapezoidal
//! scheme: an implicit matrix couples the new land and sea temperatures, an
//! explicit matrix carries the previous step forward, and a
//! Hammer-Hollingsworth term corrects a known instability of the naive
//! discretization. The ocean diagonal additionally carries the leading
//! contribution of the diffusion kernel convolution.

use crate::constants::{BSI, FSO};
use crate::errors::{DoeclimError, DoeclimResult};
use crate::timescales::Timescales;
use crate::FloatValue;
use nalgebra::Matrix2;

/// The 2x2 matrices of the implicit-explicit scheme.
#[derive(Debug, Clone)]
pub struct SystemMatrices {
    /// Backward coefficients coupling step t to step t+1 (`Baux`).
    pub implicit: Matrix2<FloatValue>,
    /// Analytic inverse of `implicit` (`IB`).
    pub implicit_inverse: Matrix2<FloatValue>,
    /// Forward coefficients coupling step t to step t-1 (`Adoe`).
    pub explicit: Matrix2<FloatValue>,
}

impl SystemMatrices {
    /// Assemble the matrices from the derived time scales.
    ///
    /// `kernel_last` is the final diffusion kernel entry, which enters the
    /// ocean diagonal of the explicit matrix; the implicit matrix uses the
    /// constant diffusion stability term instead.
    pub fn build(
        timescales: &Timescales,
        time_step: FloatValue,
        kernel_last: FloatValue,
    ) -> DoeclimResult<Self> {
        let correction = hammer_hollingsworth_correction(timescales, time_step);
        let diffusion_lead = FSO * (time_step / timescales.ocean_diffusion).sqrt();

        let implicit = Matrix2::new(
            1.0 + time_step / (2.0 * timescales.land_feedback)
                + time_step / (2.0 * timescales.land_sea_exchange),
            -time_step / (2.0 * timescales.land_sea_exchange) * BSI,
            -time_step / (2.0 * timescales.sea_land_exchange),
            1.0 + time_step / (2.0 * timescales.ocean_feedback)
                + time_step / (2.0 * timescales.sea_land_exchange) * BSI
                + 2.0 * diffusion_lead,
        ) + correction;

        let determinant = implicit.determinant();
        if !determinant.is_finite() || determinant.abs() < 1e-12 {
            return Err(DoeclimError::NumericalInstability(format!(
                "implicit matrix is near-singular (determinant {})",
                determinant
            )));
        }
        let implicit_inverse = implicit.try_inverse().ok_or_else(|| {
            DoeclimError::NumericalInstability("implicit matrix is singular".to_string())
        })?;

        let explicit = Matrix2::new(
            1.0 - time_step / (2.0 * timescales.land_feedback)
                - time_step / (2.0 * timescales.land_sea_exchange),
            time_step / (2.0 * timescales.land_sea_exchange) * BSI,
            time_step / (2.0 * timescales.sea_land_exchange),
            1.0 - time_step / (2.0 * timescales.ocean_feedback)
                - time_step / (2.0 * timescales.sea_land_exchange) * BSI
                + kernel_last * diffusion_lead,
        ) + correction;

        Ok(Self {
            implicit,
            implicit_inverse,
            explicit,
        })
    }
}

/// Hammer-Hollingsworth stabilization term, scaled by dt^2/12.
fn hammer_hollingsworth_correction(
    timescales: &Timescales,
    time_step: FloatValue,
) -> Matrix2<FloatValue> {
    let tcfl = timescales.land_feedback;
    let tcfs = timescales.ocean_feedback;
    let tkls = timescales.land_sea_exchange;
    let tksl = timescales.sea_land_exchange;

    Matrix2::new(
        1.0 / (tcfl * tcfl) + 1.0 / (tkls * tkls) + 2.0 / (tcfl * tkls) + BSI / (tkls * tksl),
        -BSI / (tkls * tkls)
            - BSI / (tcfl * tkls)
            - BSI / (tcfs * tkls)
            - BSI * BSI / (tkls * tksl),
        -BSI / (tksl * tksl) - 1.0 / (tcfs * tksl) - 1.0 / (tcfl * tksl) - 1.0 / (tkls * tksl),
        1.0 / (tcfs * tcfs)
            + BSI * BSI / (tksl * tksl)
            + 2.0 * BSI / (tcfs * tksl)
            + BSI / (tkls * tksl),
    ) * (time_step * time_step / 12.0)
}
