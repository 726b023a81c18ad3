//! Wind power conversion: scalar speed from components, additive bias
//! correction, and capacity factor via interpolated turbine power curves.

use crate::config::ModelConstants;
use crate::error::EnergyModelError;
use crate::math::{digitize_right_exclusive, interp_clamped};
use log::warn;
use ndarray::{Array2, Array3, Axis, Zip};
use std::io::{BufRead, BufReader, Read};

/// A turbine power curve: tabulated (wind speed m/s, capacity factor)
/// pairs. Speeds must be strictly increasing for interpolation to be
/// meaningful, and are validated on construction.
#[derive(Debug, Clone)]
pub struct PowerCurve {
    speeds: Vec<f64>,
    capacity_factors: Vec<f64>,
}

impl PowerCurve {
    pub fn new(speeds: Vec<f64>, capacity_factors: Vec<f64>) -> Result<Self, EnergyModelError> {
        if speeds.len() != capacity_factors.len() {
            return Err(EnergyModelError::InvalidPowerCurve(format!(
                "{} speeds but {} capacity factors",
                speeds.len(),
                capacity_factors.len()
            )));
        }
        if speeds.len() < 2 {
            return Err(EnergyModelError::InvalidPowerCurve(
                "need at least two tabulated points".to_string(),
            ));
        }
        if speeds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EnergyModelError::InvalidPowerCurve(
                "speeds must be strictly increasing".to_string(),
            ));
        }
        Ok(Self {
            speeds,
            capacity_factors,
        })
    }

    /// Parse a whitespace-delimited turbine table: column 0 is wind speed
    /// (m/s), column 2 is capacity factor, no header. Blank lines are
    /// skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EnergyModelError> {
        let mut speeds = Vec::new();
        let mut capacity_factors = Vec::new();

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.is_empty() {
                continue;
            }
            if columns.len() < 3 {
                return Err(EnergyModelError::InvalidPowerCurve(format!(
                    "line {}: expected at least 3 columns, found {}",
                    index + 1,
                    columns.len()
                )));
            }
            let speed: f64 = columns[0].parse().map_err(|_| {
                EnergyModelError::InvalidPowerCurve(format!(
                    "line {}: unparsable wind speed {:?}",
                    index + 1,
                    columns[0]
                ))
            })?;
            let cf: f64 = columns[2].parse().map_err(|_| {
                EnergyModelError::InvalidPowerCurve(format!(
                    "line {}: unparsable capacity factor {:?}",
                    index + 1,
                    columns[2]
                ))
            })?;
            speeds.push(speed);
            capacity_factors.push(cf);
        }

        Self::new(speeds, capacity_factors)
    }

    pub fn from_table_str(table: &str) -> Result<Self, EnergyModelError> {
        Self::from_reader(table.as_bytes())
    }

    /// Resample the curve onto the fine fixed-speed grid (501 points over
    /// [0, 50] m/s by default) by linear interpolation, clamping to the
    /// endpoint values outside the tabulated span.
    pub fn resample(&self, constants: &ModelConstants) -> ResampledCurve {
        let n = constants.curve_samples;
        let mut speeds = Vec::with_capacity(n);
        let mut capacity_factors = Vec::with_capacity(n);
        for i in 0..n {
            let speed = constants.curve_max_speed * i as f64 / (n - 1) as f64;
            speeds.push(speed);
            capacity_factors.push(interp_clamped(&self.speeds, &self.capacity_factors, speed));
        }
        ResampledCurve {
            speeds,
            capacity_factors,
        }
    }
}

/// A power curve resampled onto the fine fixed-speed grid, ready for the
/// binned capacity factor lookup.
#[derive(Debug, Clone)]
pub struct ResampledCurve {
    speeds: Vec<f64>,
    capacity_factors: Vec<f64>,
}

impl ResampledCurve {
    /// Binned capacity factor lookup: locate the speed's bin with a
    /// right-exclusive digitize against the resampled grid, clamp the top
    /// overflow bin to the last valid bin, and average the two bracketing
    /// curve points. Speeds at or above the grid's upper edge all map to
    /// the last bin; power curves are zero well before 50 m/s anyway.
    pub fn capacity_factor(&self, speed: f64) -> f64 {
        let last = self.speeds.len() - 1;
        let bin = digitize_right_exclusive(&self.speeds, speed).clamp(1, last);
        0.5 * (self.capacity_factors[bin - 1] + self.capacity_factors[bin])
    }
}

/// Scalar wind speed from orthogonal components: `√(u² + v²)`
pub fn wind_speed(
    u: &Array3<f64>,
    v: &Array3<f64>,
) -> Result<Array3<f64>, EnergyModelError> {
    if u.dim() != v.dim() {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "u shape {:?} does not match v shape {:?}",
            u.dim(),
            v.dim()
        )));
    }
    let mut speed = Array3::<f64>::zeros(u.dim());
    Zip::from(&mut speed).and(u).and(v).par_for_each(|s, &uu, &vv| {
        *s = (uu * uu + vv * vv).sqrt();
    });
    Ok(speed)
}

/// Add a static per-gridpoint speed correction to every time slice,
/// clamping any negative result to zero: wind speed cannot be negative.
pub fn bias_correct(
    speed: &Array3<f64>,
    correction: &Array2<f64>,
) -> Result<Array3<f64>, EnergyModelError> {
    let (_, nlat, nlon) = speed.dim();
    if correction.dim() != (nlat, nlon) {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "correction shape ({}, {}) does not match field spatial shape ({}, {})",
            correction.dim().0,
            correction.dim().1,
            nlat,
            nlon
        )));
    }

    let mut corrected = speed.to_owned();
    Zip::from(corrected.axis_iter_mut(Axis(0))).par_for_each(|mut slice| {
        Zip::from(&mut slice).and(correction).for_each(|s, &c| {
            *s = (*s + c).max(0.0);
        });
    });
    Ok(corrected)
}

/// Convert a wind speed field to a capacity factor field through a single
/// turbine power curve.
pub fn to_capacity_factor(
    speed: &Array3<f64>,
    curve: &PowerCurve,
    constants: &ModelConstants,
) -> Array3<f64> {
    let resampled = curve.resample(constants);
    let mut cf = Array3::<f64>::zeros(speed.dim());
    Zip::from(&mut cf).and(speed).par_for_each(|c, &s| {
        *c = resampled.capacity_factor(s);
    });
    cf
}

/// Convert a wind speed field through the per-gridpoint optimal turbine
/// class: each gridpoint takes the capacity factor of the curve its class
/// selects, classes 1 to 3. Every gridpoint contributes exactly one class
/// value; class values outside {1, 2, 3} contribute zero and are reported
/// once per conversion.
pub fn to_capacity_factor_multi_class(
    speed: &Array3<f64>,
    class_map: &Array2<f64>,
    curves: &[PowerCurve; 3],
    constants: &ModelConstants,
) -> Result<Array3<f64>, EnergyModelError> {
    let (_, nlat, nlon) = speed.dim();
    if class_map.dim() != (nlat, nlon) {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "class map shape ({}, {}) does not match field spatial shape ({}, {})",
            class_map.dim().0,
            class_map.dim().1,
            nlat,
            nlon
        )));
    }

    let unknown = class_map
        .iter()
        .filter(|&&class| class != 1.0 && class != 2.0 && class != 3.0)
        .count();
    if unknown > 0 {
        warn!(
            "turbine class map has {} gridpoint(s) outside classes 1-3; they contribute zero",
            unknown
        );
    }

    let resampled: Vec<ResampledCurve> = curves.iter().map(|c| c.resample(constants)).collect();

    let mut cf = Array3::<f64>::zeros(speed.dim());
    Zip::from(cf.axis_iter_mut(Axis(0)))
        .and(speed.axis_iter(Axis(0)))
        .par_for_each(|mut cf_slice, speed_slice| {
            Zip::from(&mut cf_slice)
                .and(&speed_slice)
                .and(class_map)
                .for_each(|c, &s, &class| {
                    *c = if class == 1.0 {
                        resampled[0].capacity_factor(s)
                    } else if class == 2.0 {
                        resampled[1].capacity_factor(s)
                    } else if class == 3.0 {
                        resampled[2].capacity_factor(s)
                    } else {
                        0.0
                    };
                });
        });
    Ok(cf)
}
