//! Analytic response kernel of the interior ocean heat diffusion.
//!
//! The one-dimensional heat equation over an ocean of finite depth admits a
//! closed-form solution whose discretized impulse response is an
//! error-function series (Kriegler 2005, equation A.25): zeroth through
//! third order terms in the reflection of the diffusing heat anomaly at the
//! ocean bottom. The kernel depends only on the step size and the bottom
//! reflection time scale, so it is built once per parameter set and
//! convolved against the SST history at every step.
//!
//! The closed form is horizon relative: the value for a perturbation `k`
//! steps in the past is expressed through the number of steps remaining to
//! the end of the simulation, and the final entry is the limit of the
//! interior formula for a vanishing remaining horizon. [`DiffusionKernel`]
//! therefore addresses its entries by lag from the end of the horizon so
//! that callers never translate indices themselves.

use crate::errors::{DoeclimError, DoeclimResult};
use crate::FloatValue;
use statrs::function::erf::erf;
use std::f64::consts::PI;

const SQRT_2: FloatValue = std::f64::consts::SQRT_2;

/// Discretized impulse response of the interior ocean over a fixed horizon.
#[derive(Debug, Clone)]
pub struct DiffusionKernel {
    values: Vec<FloatValue>,
}

impl DiffusionKernel {
    /// Build the kernel over a horizon of `n_steps` steps.
    ///
    /// `bottom_reflection` is the `taubot` time scale in years; `time_step`
    /// is the step size in years. Requires `n_steps >= 2`.
    pub fn build(
        n_steps: usize,
        bottom_reflection: FloatValue,
        time_step: FloatValue,
    ) -> DoeclimResult<Self> {
        // bottom reflection time expressed in steps
        let tb = bottom_reflection / time_step;
        let sqrt_pi_tb = (PI * tb).sqrt();

        let mut values = vec![0.0; n_steps];
        values[n_steps - 1] = boundary_value(tb, sqrt_pi_tb);
        for (i, value) in values.iter_mut().take(n_steps - 1).enumerate() {
            // steps remaining from entry i (1-based i+1) to the horizon end
            let near = (n_steps - 1 - i) as FloatValue;
            let mid = (n_steps - i) as FloatValue;
            let far = (n_steps + 1 - i) as FloatValue;
            *value = interior_value(tb, sqrt_pi_tb, near, mid, far);
        }

        for (i, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(DoeclimError::NumericalInstability(format!(
                    "diffusion kernel entry {} is not finite",
                    i
                )));
            }
        }

        Ok(Self { values })
    }

    /// Number of kernel entries (the simulation horizon).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Kernel value addressed by its distance from the end of the horizon.
    ///
    /// `value(0)` is the final (boundary) entry. The contribution of the SST
    /// at step `i` to the heat uptake at step `t` uses `value(t - i)`; the
    /// interior flux convolution uses `value(t - i - 1)`.
    pub fn value(&self, lag_from_end: usize) -> FloatValue {
        self.values[self.values.len() - 1 - lag_from_end]
    }
}

/// Limit of the kernel for a vanishing remaining horizon (the final entry).
fn boundary_value(tb: FloatValue, sqrt_pi_tb: FloatValue) -> FloatValue {
    // zeroth order
    let kt0 = 4.0 - 2.0 * SQRT_2;
    // first order
    let kta1 = -8.0 * (-tb).exp() + 4.0 * SQRT_2 * (-0.5 * tb).exp();
    let ktb1 = 4.0 * sqrt_pi_tb * (1.0 + erf((0.5 * tb).sqrt()) - 2.0 * erf(tb.sqrt()));
    // second order
    let kta2 = 8.0 * (-4.0 * tb).exp() - 4.0 * SQRT_2 * (-2.0 * tb).exp();
    let ktb2 = -8.0 * sqrt_pi_tb * (1.0 + erf((2.0 * tb).sqrt()) - 2.0 * erf(2.0 * tb.sqrt()));
    // third order
    let kta3 = -8.0 * (-9.0 * tb).exp() + 4.0 * SQRT_2 * (-4.5 * tb).exp();
    let ktb3 = 12.0 * sqrt_pi_tb * (1.0 + erf((4.5 * tb).sqrt()) - 2.0 * erf(3.0 * tb.sqrt()));

    kt0 + kta1 + ktb1 + kta2 + ktb2 + kta3 + ktb3
}

/// Kernel entry for an interior lag, expressed through the remaining horizon
/// `near < mid < far` (consecutive step counts).
fn interior_value(
    tb: FloatValue,
    sqrt_pi_tb: FloatValue,
    near: FloatValue,
    mid: FloatValue,
    far: FloatValue,
) -> FloatValue {
    let kt0 = 4.0 * mid.sqrt() - 2.0 * far.sqrt() - 2.0 * near.sqrt();

    let kta1 = -8.0 * mid.sqrt() * (-tb / mid).exp()
        + 4.0 * far.sqrt() * (-tb / far).exp()
        + 4.0 * near.sqrt() * (-tb / near).exp();
    let ktb1 = 4.0
        * sqrt_pi_tb
        * (erf((tb / near).sqrt()) + erf((tb / far).sqrt()) - 2.0 * erf((tb / mid).sqrt()));

    let kta2 = 8.0 * mid.sqrt() * (-4.0 * tb / mid).exp()
        - 4.0 * far.sqrt() * (-4.0 * tb / far).exp()
        - 4.0 * near.sqrt() * (-4.0 * tb / near).exp();
    let ktb2 = -8.0
        * sqrt_pi_tb
        * (erf(2.0 * (tb / near).sqrt()) + erf(2.0 * (tb / far).sqrt())
            - 2.0 * erf(2.0 * (tb / mid).sqrt()));

    let kta3 = -8.0 * mid.sqrt() * (-9.0 * tb / mid).exp()
        + 4.0 * far.sqrt() * (-9.0 * tb / far).exp()
        + 4.0 * near.sqrt() * (-9.0 * tb / near).exp();
    let ktb3 = 12.0
        * sqrt_pi_tb
        * (erf(3.0 * (tb / near).sqrt()) + erf(3.0 * (tb / far).sqrt())
            - 2.0 * erf(3.0 * (tb / mid).sqrt()));

    kt0 + kta1 + ktb1 + kta2 + ktb2 + kta3 + ktb3
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lag_addresses_from_the_end_of_the_horizon() {
        let kernel = DiffusionKernel::build(10, 1500.0, 1.0).unwrap();

        assert_eq!(kernel.len(), 10);
        assert_eq!(kernel.value(0), kernel.values[9]);
        assert_eq!(kernel.value(9), kernel.values[0]);
    }

    #[test]
    fn kernel_is_finite_over_a_long_horizon() {
        // taubot for the default diffusivity of 3.5 cm^2/s is ~1449 yr
        let kernel = DiffusionKernel::build(500, 1449.0, 1.0).unwrap();
        for lag in 0..kernel.len() {
            assert!(kernel.value(lag).is_finite(), "lag {}", lag);
        }
    }

    #[test]
    fn boundary_entry_approaches_the_zeroth_order_for_slow_oceans() {
        // for taubot >> dt every exponential and erf correction vanishes and
        // only the zeroth order term survives
        let kernel = DiffusionKernel::build(10, 50_000.0, 1.0).unwrap();
        assert_relative_eq!(kernel.value(0), 4.0 - 2.0 * SQRT_2, max_relative = 1e-6);
    }

    #[test]
    fn interior_entries_tend_to_zero_far_from_the_horizon_end() {
        // the kernel is a second difference of sqrt(t); entries for early
        // steps of a long horizon are small compared to the boundary entry
        let kernel = DiffusionKernel::build(200, 1449.0, 1.0).unwrap();
        assert!(kernel.value(199).abs() < kernel.value(0).abs());
    }
}
