//! Fixed physical constants of the two-box energy balance model.
//!
//! These values are part of the model formulation (Kriegler 2005, appendix A)
//! and are never varied between runs; the quantities that do vary live in
//! [`crate::parameters::DoeclimParameters`].

use crate::FloatValue;

/// Slope coefficient of the land-sea heat exchange (dimensionless).
pub const AK: FloatValue = 0.31;

/// Offset coefficient of the land-sea heat exchange (W/m^2/K).
pub const BK: FloatValue = 1.59;

/// Marine surface air warming enhancement over the sea surface (dimensionless).
pub const BSI: FloatValue = 1.3;

/// Heat capacity of the land-troposphere system (W yr/m^2/K).
pub const CAL: FloatValue = 0.52;

/// Heat capacity of the mixed layer-troposphere system (W yr/m^2/K).
pub const CAS: FloatValue = 7.8;

/// Volumetric heat capacity of seawater (W yr/m^3/K).
pub const CSW: FloatValue = 0.13;

/// Land fraction of the Earth surface (dimensionless).
pub const FLND: FloatValue = 0.29;

/// Fraction of the ocean area below a depth of 60 m (dimensionless).
pub const FSO: FloatValue = 0.95;

/// Ratio of climate feedback strength over land relative to the ocean
/// (dimensionless).
pub const RLAM: FloatValue = 1.43;

/// Depth of the diffusive interior ocean (m).
pub const ZBOT: FloatValue = 4000.0;

/// Radiative forcing for a doubling of CO2 (W/m^2).
pub const Q2CO: FloatValue = 3.7;

/// Conversion of the vertical diffusivity from cm^2/s to m^2/yr.
pub const KCON: FloatValue = 3155.0;

/// Earth surface area (m^2).
pub const EARTH_AREA: FloatValue = 5.100656e14;

/// Seconds per year.
pub const SECS_PER_YEAR: FloatValue = 31_556_926.0;
