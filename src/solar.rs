//! Solar PV capacity factor from temperature and irradiance, using the
//! relative-efficiency panel model of Evans and Florschuetz (1977) with
//! the reference values of Bloomfield et al. (2020).

use crate::config::ModelConstants;
use crate::error::EnergyModelError;
use ndarray::{Array3, Zip};

/// Relative panel efficiency at a cell temperature (°C):
/// `eff_ref · (1 − beta_ref · (t2m − T_ref))`
pub fn panel_efficiency(t2m_celsius: f64, constants: &ModelConstants) -> f64 {
    constants.eff_ref * (1.0 - constants.beta_ref * (t2m_celsius - constants.t_ref))
}

/// Gridded PV capacity factor from 2 m temperature (°C) and surface solar
/// irradiance (W m⁻²): `efficiency · (ssrd / G_ref)`.
///
/// NaN results (masked-out zero inputs can produce 0/0 forms upstream) are
/// sanitized to 0. Values are not clamped to [0, 1]: extreme inputs can
/// push the model transiently outside the nominal range.
pub fn pv_capacity_factor(
    t2m_celsius: &Array3<f64>,
    ssrd_wm2: &Array3<f64>,
    constants: &ModelConstants,
) -> Result<Array3<f64>, EnergyModelError> {
    if t2m_celsius.dim() != ssrd_wm2.dim() {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "t2m shape {:?} does not match ssrd shape {:?}",
            t2m_celsius.dim(),
            ssrd_wm2.dim()
        )));
    }

    let mut cf = Array3::<f64>::zeros(t2m_celsius.dim());
    Zip::from(&mut cf)
        .and(t2m_celsius)
        .and(ssrd_wm2)
        .par_for_each(|c, &t2m, &ssrd| {
            let value = panel_efficiency(t2m, constants) * (ssrd / constants.g_ref);
            *c = if value.is_nan() { 0.0 } else { value };
        });
    Ok(cf)
}
