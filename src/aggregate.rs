//! Spatial aggregation of masked fields into national time series.

use crate::error::EnergyModelError;
use ndarray::{Array1, Array2, Array3, Axis, Zip};
use rayon::prelude::*;

/// Weighted spatial mean of every time slice: `Σ(field·w) / Σ(w)`.
///
/// Weights are a 0/1 country mask for plain national means or an
/// installed-capacity map for siting-weighted aggregates; the kernel is the
/// same. A weight sum of zero means no gridpoint was selected and the mean
/// is undefined, surfaced as `DegenerateMask` rather than NaN.
///
/// Time steps are independent and computed in parallel; the reduction
/// within each slice runs in a fixed order so results do not depend on
/// thread scheduling.
pub fn weighted_mean_series(
    field: &Array3<f64>,
    weights: &Array2<f64>,
) -> Result<Array1<f64>, EnergyModelError> {
    let (ntime, nlat, nlon) = field.dim();
    if weights.dim() != (nlat, nlon) {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "weights shape ({}, {}) does not match field spatial shape ({}, {})",
            weights.dim().0,
            weights.dim().1,
            nlat,
            nlon
        )));
    }

    let weight_sum = weights.sum();
    if !(weight_sum > 0.0) {
        return Err(EnergyModelError::DegenerateMask);
    }

    let series: Vec<f64> = (0..ntime)
        .into_par_iter()
        .map(|t| {
            let slice = field.index_axis(Axis(0), t);
            let mut acc = 0.0;
            Zip::from(&slice).and(weights).for_each(|&value, &w| {
                acc += value * w;
            });
            acc / weight_sum
        })
        .collect();

    Ok(Array1::from(series))
}

/// National wind power aggregation weighted by installed capacity (MW) per
/// gridbox, so the series reflects where turbines actually stand rather
/// than uniform within-country weighting. With all-ones weights this
/// reduces to the unweighted spatial mean.
pub fn capacity_weighted_series(
    field: &Array3<f64>,
    capacity_mw: &Array2<f64>,
) -> Result<Array1<f64>, EnergyModelError> {
    weighted_mean_series(field, capacity_mw)
}
