//! Unit conversion, daily reduction and mask application for gridded
//! `[time, lat, lon]` fields.

use crate::config::ModelConstants;
use crate::error::EnergyModelError;
use crate::io::FieldSource;
use log::debug;
use ndarray::{Array2, Array3, Axis, Zip};

/// Physical variable kinds the archive vocabulary maps onto. The kind
/// decides which unit conversion runs when a field is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// 2 m air temperature, archived in Kelvin
    Temperature2m,
    /// Surface solar irradiance, archived as hourly accumulation (J h⁻¹ m⁻²)
    SurfaceIrradiance,
    /// 100 m eastward wind component (m s⁻¹)
    WindComponentU,
    /// 100 m northward wind component (m s⁻¹)
    WindComponentV,
    /// Anything else, passed through unchanged
    Passthrough,
}

impl VariableKind {
    /// Map a reanalysis archive variable name to its kind
    pub fn from_archive_name(name: &str) -> Self {
        match name {
            "t2m" => Self::Temperature2m,
            "ssrd" => Self::SurfaceIrradiance,
            "u100" => Self::WindComponentU,
            "v100" => Self::WindComponentV,
            _ => Self::Passthrough,
        }
    }
}

/// Convert a freshly loaded field into the units the energy models expect:
/// temperature Kelvin → Celsius, irradiance J h⁻¹ m⁻² → W m⁻². Other kinds
/// pass through unchanged.
pub fn convert_units(
    field: &Array3<f64>,
    kind: VariableKind,
    constants: &ModelConstants,
) -> Array3<f64> {
    match kind {
        VariableKind::Temperature2m => {
            debug!("converting temperature from Kelvin to Celsius");
            field - constants.kelvin_offset
        }
        VariableKind::SurfaceIrradiance => {
            debug!("converting irradiance from J h⁻¹ m⁻² to W m⁻²");
            field / constants.irradiance_accumulation_seconds
        }
        _ => field.clone(),
    }
}

/// Reduce an hourly field to daily means by averaging blocks of 24 time
/// steps. The time length must be an exact number of days.
pub fn hourly_to_daily(
    field: &Array3<f64>,
    constants: &ModelConstants,
) -> Result<Array3<f64>, EnergyModelError> {
    let hours = constants.hours_per_day;
    let (ntime, nlat, nlon) = field.dim();
    if hours == 0 || ntime % hours != 0 {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "time length {} is not a whole number of {}-hour days",
            ntime, hours
        )));
    }
    let days = ntime / hours;
    debug!("reducing {} hourly steps to {} daily means", ntime, days);

    let grouped = field
        .to_owned()
        .into_shape((days, hours, nlat, nlon))
        .map_err(|e| EnergyModelError::ShapeMismatch(e.to_string()))?;
    grouped
        .mean_axis(Axis(1))
        .ok_or_else(|| EnergyModelError::ShapeMismatch("empty hour axis".to_string()))
}

/// Multiply every time slice of `field` by `mask`, zeroing gridpoints
/// outside the country. Idempotent for a 0/1 mask.
pub fn apply_mask(
    field: &Array3<f64>,
    mask: &Array2<f64>,
) -> Result<Array3<f64>, EnergyModelError> {
    let (_, nlat, nlon) = field.dim();
    if mask.dim() != (nlat, nlon) {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "mask shape ({}, {}) does not match field spatial shape ({}, {})",
            mask.dim().0,
            mask.dim().1,
            nlat,
            nlon
        )));
    }

    let mut masked = field.to_owned();
    Zip::from(masked.axis_iter_mut(Axis(0))).par_for_each(|mut slice| {
        slice *= mask;
    });
    Ok(masked)
}

/// Load a named variable from `source`, convert its units, optionally
/// reduce hourly steps to daily means, and apply the country mask.
///
/// This is the front door for the demand and solar chains: the returned
/// field is in model units with every outside-country gridpoint zeroed.
pub fn load_masked<S: FieldSource + ?Sized>(
    source: &S,
    variable: &str,
    mask: &Array2<f64>,
    daily_means: bool,
    constants: &ModelConstants,
) -> Result<Array3<f64>, EnergyModelError> {
    let grid = source.grid()?;
    grid.check_mask(mask)?;

    let raw = source.load_field(variable)?;
    grid.check_field(&raw)?;

    let kind = VariableKind::from_archive_name(variable);
    let mut data = convert_units(&raw, kind, constants);
    if daily_means {
        data = hourly_to_daily(&data, constants)?;
    }
    apply_mask(&data, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_variable_kind_vocabulary() {
        assert_eq!(VariableKind::from_archive_name("t2m"), VariableKind::Temperature2m);
        assert_eq!(VariableKind::from_archive_name("ssrd"), VariableKind::SurfaceIrradiance);
        assert_eq!(VariableKind::from_archive_name("u100"), VariableKind::WindComponentU);
        assert_eq!(VariableKind::from_archive_name("v100"), VariableKind::WindComponentV);
        assert_eq!(VariableKind::from_archive_name("msl"), VariableKind::Passthrough);
    }

    #[test]
    fn test_hourly_to_daily_shape_error() {
        let constants = ModelConstants::default();
        let field = Array3::<f64>::zeros((25, 2, 2));
        assert!(matches!(
            hourly_to_daily(&field, &constants),
            Err(EnergyModelError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_apply_mask_shape_error() {
        let field = Array3::<f64>::zeros((4, 2, 2));
        let mask = arr2(&[[1.0, 0.0, 1.0]]);
        assert!(matches!(
            apply_mask(&field, &mask),
            Err(EnergyModelError::ShapeMismatch(_))
        ));
    }
}
