//! Country-level composition of the conversion chain: masked gridded
//! fields in, national time series out.

use crate::aggregate::{capacity_weighted_series, weighted_mean_series};
use crate::config::ModelConstants;
use crate::demand::{degree_days, weather_dependent_demand, Country, DemandCoefficients};
use crate::error::EnergyModelError;
use crate::solar::pv_capacity_factor;
use crate::wind::{bias_correct, to_capacity_factor, to_capacity_factor_multi_class, PowerCurve};
use ndarray::{Array1, Array2, Array3};

/// National solar PV capacity factor series: PV model over the masked
/// temperature and irradiance fields, then the mask-weighted spatial mean.
pub fn country_solar_cf(
    t2m_masked: &Array3<f64>,
    ssrd_masked: &Array3<f64>,
    mask: &Array2<f64>,
    constants: &ModelConstants,
) -> Result<Array1<f64>, EnergyModelError> {
    let cf = pv_capacity_factor(t2m_masked, ssrd_masked, constants)?;
    weighted_mean_series(&cf, mask)
}

/// National wind power capacity factor series through a single turbine
/// power curve, weighted by installed capacity per gridbox. The optional
/// correction is the static additive speed bias adjustment.
pub fn country_wind_cf(
    speed: &Array3<f64>,
    correction: Option<&Array2<f64>>,
    curve: &PowerCurve,
    capacity_mw: &Array2<f64>,
    constants: &ModelConstants,
) -> Result<Array1<f64>, EnergyModelError> {
    let speed = match correction {
        Some(correction) => bias_correct(speed, correction)?,
        None => speed.to_owned(),
    };
    let cf = to_capacity_factor(&speed, curve, constants);
    capacity_weighted_series(&cf, capacity_mw)
}

/// National wind power capacity factor series with per-gridpoint optimal
/// turbine class selection across three curves.
pub fn country_wind_cf_optimal(
    speed: &Array3<f64>,
    correction: Option<&Array2<f64>>,
    class_map: &Array2<f64>,
    curves: &[PowerCurve; 3],
    capacity_mw: &Array2<f64>,
    constants: &ModelConstants,
) -> Result<Array1<f64>, EnergyModelError> {
    let speed = match correction {
        Some(correction) => bias_correct(speed, correction)?,
        None => speed.to_owned(),
    };
    let cf = to_capacity_factor_multi_class(&speed, class_map, curves, constants)?;
    capacity_weighted_series(&cf, capacity_mw)
}

/// National weather-dependent demand series from country-masked daily-mean
/// 2 m temperature (°C).
pub fn country_demand(
    t2m_daily_masked: &Array3<f64>,
    mask: &Array2<f64>,
    coefficients: &DemandCoefficients,
    country: Country,
    constants: &ModelConstants,
) -> Result<Array1<f64>, EnergyModelError> {
    let (hdd, cdd) = degree_days(t2m_daily_masked, mask, constants)?;
    weather_dependent_demand(&hdd, &cdd, coefficients, country, constants)
}
