//! Characteristic time scales derived from a parameter set.
//!
//! The coupled two-box system is fully described by six time scales plus a
//! flux-to-heat conversion factor. They follow from the climate sensitivity
//! and the ocean diffusivity via the feedback strengths over land and ocean
//! and the land-sea heat exchange coefficient (Kriegler 2005, appendix A).
//! All of them must be strictly positive and finite; a zero or negative
//! value indicates a physically degenerate parameter combination.

use crate::constants::{
    AK, BK, BSI, CAL, CAS, CSW, EARTH_AREA, FLND, KCON, Q2CO, RLAM, SECS_PER_YEAR, ZBOT,
};
use crate::errors::{DoeclimError, DoeclimResult};
use crate::parameters::DoeclimParameters;
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Time scales and conversion factors of the coupled two-box system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timescales {
    /// Land feedback response time `taucfl` (yr).
    pub land_feedback: FloatValue,
    /// Ocean feedback response time `taucfs` (yr).
    pub ocean_feedback: FloatValue,
    /// Land-to-sea heat exchange time `taukls` (yr).
    pub land_sea_exchange: FloatValue,
    /// Sea-to-land heat exchange time `tauksl` (yr).
    pub sea_land_exchange: FloatValue,
    /// Vertical heat diffusion time of the interior ocean `taudif` (yr).
    pub ocean_diffusion: FloatValue,
    /// Bottom reflection time of the interior ocean `taubot` (yr).
    pub bottom_reflection: FloatValue,
    /// Conversion from one year of surface flux (W/m^2 over the ocean area)
    /// to heat content (10^22 J).
    pub flux_to_heat: FloatValue,
}

impl Timescales {
    /// Derive all time scales from a parameter set.
    pub fn from_parameters(parameters: &DoeclimParameters) -> DoeclimResult<Self> {
        let t2co = parameters.climate_sensitivity;

        let ocean_area = (1.0 - FLND) * EARTH_AREA;
        let cnum = RLAM * FLND + BSI * (1.0 - FLND);
        let cden = RLAM * FLND - AK * (RLAM - BSI);
        if cden.abs() < FloatValue::EPSILON {
            return Err(DoeclimError::Configuration(
                "degenerate land-sea coupling: cden is zero".to_string(),
            ));
        }

        // effective vertical diffusivity (m^2/yr)
        let keff = KCON * parameters.ocean_diffusivity;

        // climate feedback strengths over land and ocean (W/m^2/K)
        let cfl = FLND * cnum / cden * Q2CO / t2co - BK * (RLAM - BSI) / cden;
        let cfs = (RLAM * FLND - AK / (1.0 - FLND) * (RLAM - BSI)) * cnum / cden * Q2CO / t2co
            + RLAM * FLND / (1.0 - FLND) * BK * (RLAM - BSI) / cden;

        // land-sea heat exchange coefficient (W/m^2/K)
        let kls = BK * RLAM * FLND / cden - AK * FLND * cnum / cden * Q2CO / t2co;

        let timescales = Self {
            land_feedback: CAL / cfl,
            ocean_feedback: CAS / cfs,
            land_sea_exchange: FLND * CAL / kls,
            sea_land_exchange: (1.0 - FLND) * CAS / kls,
            ocean_diffusion: CAS * CAS / (CSW * CSW) * PI / keff,
            bottom_reflection: ZBOT * ZBOT / keff,
            flux_to_heat: ocean_area * SECS_PER_YEAR / 1.0e22,
        };
        timescales.ensure_physical()?;
        Ok(timescales)
    }

    fn ensure_physical(&self) -> DoeclimResult<()> {
        let named = [
            ("taucfl", self.land_feedback),
            ("taucfs", self.ocean_feedback),
            ("taukls", self.land_sea_exchange),
            ("tauksl", self.sea_land_exchange),
            ("taudif", self.ocean_diffusion),
            ("taubot", self.bottom_reflection),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(DoeclimError::Configuration(format!(
                    "time scale {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_parameters_give_positive_timescales() {
        let timescales = Timescales::from_parameters(&DoeclimParameters::default()).unwrap();

        for value in [
            timescales.land_feedback,
            timescales.ocean_feedback,
            timescales.land_sea_exchange,
            timescales.sea_land_exchange,
            timescales.ocean_diffusion,
            timescales.bottom_reflection,
            timescales.flux_to_heat,
        ] {
            assert!(value.is_finite() && value > 0.0, "got {}", value);
        }
    }

    #[test]
    fn doubling_diffusivity_halves_the_diffusion_timescales() {
        let base = Timescales::from_parameters(&DoeclimParameters::default()).unwrap();
        let doubled = Timescales::from_parameters(&DoeclimParameters {
            ocean_diffusivity: 7.0,
            ..Default::default()
        })
        .unwrap();

        // keff is linear in the diffusivity and both scales go as 1/keff
        assert_relative_eq!(
            doubled.bottom_reflection,
            0.5 * base.bottom_reflection,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            doubled.ocean_diffusion,
            0.5 * base.ocean_diffusion,
            max_relative = 1e-12
        );
        assert!(doubled.bottom_reflection < base.bottom_reflection);
        assert!(doubled.ocean_diffusion < base.ocean_diffusion);
    }

    #[test]
    fn zero_diffusivity_makes_diffusion_timescales_infinite() {
        let parameters = DoeclimParameters {
            ocean_diffusivity: 0.0,
            ..Default::default()
        };
        let err = Timescales::from_parameters(&parameters).unwrap_err();
        assert!(matches!(err, DoeclimError::Configuration(_)));
    }

    #[test]
    fn runaway_sensitivity_is_rejected() {
        // the land feedback strength changes sign near t2co ~ 7 K, which
        // turns the land response time negative
        let parameters = DoeclimParameters {
            climate_sensitivity: 10.0,
            ..Default::default()
        };
        let err = Timescales::from_parameters(&parameters).unwrap_err();
        assert!(matches!(err, DoeclimError::Configuration(_)));
    }
}
