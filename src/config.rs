/// Model constants for the energy conversion chain.
///
/// Every threshold and reference value used by the converters lives here as
/// a named field rather than a literal at the point of use, and is passed
/// into the conversion functions by reference.
#[derive(Clone, Debug)]
pub struct ModelConstants {
    /// PV reference cell temperature (°C), Evans and Florschuetz (1977)
    pub t_ref: f64,
    /// PV reference relative efficiency, adapted from Bett and Thornton (2016)
    pub eff_ref: f64,
    /// PV efficiency temperature coefficient (°C⁻¹)
    pub beta_ref: f64,
    /// Reference irradiance for the PV model (W m⁻²)
    pub g_ref: f64,

    /// Heating degree day base temperature (°C), Bloomfield et al. (2020)
    pub hdd_base_temp: f64,
    /// Cooling degree day base temperature (°C)
    pub cdd_base_temp: f64,
    /// Year the demand regression was fitted to reproduce. The demand model
    /// recreates this reference year's demand level, it is not a forecast.
    pub demand_reference_year: f64,

    /// Kelvin to Celsius offset
    pub kelvin_offset: f64,
    /// Accumulation period of archive irradiance (s); divides J h⁻¹ m⁻²
    /// down to W m⁻²
    pub irradiance_accumulation_seconds: f64,

    /// Upper edge of the resampled power curve speed grid (m s⁻¹)
    pub curve_max_speed: f64,
    /// Number of samples on the resampled power curve speed grid
    pub curve_samples: usize,

    /// Time steps per day for the hourly to daily-mean reduction
    pub hours_per_day: usize,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            // Solar PV panel model
            t_ref: 25.0,
            eff_ref: 0.9,
            beta_ref: 0.0042,
            g_ref: 1000.0,

            // Degree day thresholds and demand anchor year
            hdd_base_temp: 15.5,
            cdd_base_temp: 22.0,
            demand_reference_year: 2017.0,

            // Unit conversions applied on load
            kelvin_offset: 273.15,
            irradiance_accumulation_seconds: 3600.0,

            // Power curve resampling: 501 points over [0, 50] m/s
            curve_max_speed: 50.0,
            curve_samples: 501,

            hours_per_day: 24,
        }
    }
}

/// Row of the regression coefficient table holding the time-trend term.
pub const TIME_TREND_ROW: usize = 0;
/// Row of the regression coefficient table holding the HDD coefficient.
pub const HDD_ROW: usize = 8;
/// Row of the regression coefficient table holding the CDD coefficient.
pub const CDD_ROW: usize = 9;
