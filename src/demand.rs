//! Weather-driven electricity demand: heating/cooling degree days from the
//! national temperature mean, combined with published per-country
//! regression coefficients (Bloomfield et al., 2020).

use crate::aggregate::weighted_mean_series;
use crate::config::{ModelConstants, CDD_ROW, HDD_ROW, TIME_TREND_ROW};
use crate::error::EnergyModelError;
use ndarray::{Array1, Array2, Array3};
use std::fmt;
use std::io::Read;

/// The closed set of countries the demand regression was fitted for, in
/// the fixed column order of the coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Austria = 1,
    Belgium,
    Bulgaria,
    Croatia,
    CzechRepublic,
    Denmark,
    Finland,
    France,
    Germany,
    Greece,
    Hungary,
    Ireland,
    Italy,
    Latvia,
    Lithuania,
    Luxembourg,
    Montenegro,
    Netherlands,
    Norway,
    Poland,
    Portugal,
    Romania,
    Slovakia,
    Slovenia,
    Spain,
    Sweden,
    Switzerland,
    UnitedKingdom,
}

/// Number of modelled countries
pub const NUM_COUNTRIES: usize = 28;

impl Country {
    pub const ALL: [Country; NUM_COUNTRIES] = [
        Country::Austria,
        Country::Belgium,
        Country::Bulgaria,
        Country::Croatia,
        Country::CzechRepublic,
        Country::Denmark,
        Country::Finland,
        Country::France,
        Country::Germany,
        Country::Greece,
        Country::Hungary,
        Country::Ireland,
        Country::Italy,
        Country::Latvia,
        Country::Lithuania,
        Country::Luxembourg,
        Country::Montenegro,
        Country::Netherlands,
        Country::Norway,
        Country::Poland,
        Country::Portugal,
        Country::Romania,
        Country::Slovakia,
        Country::Slovenia,
        Country::Spain,
        Country::Sweden,
        Country::Switzerland,
        Country::UnitedKingdom,
    ];

    /// Column of this country in the coefficient table (column 0 is the
    /// coefficient row label)
    pub fn column_index(self) -> usize {
        self as usize
    }

    /// Underscored key, the spelling the coefficient table uses
    pub fn coefficient_key(self) -> &'static str {
        match self {
            Country::Austria => "Austria",
            Country::Belgium => "Belgium",
            Country::Bulgaria => "Bulgaria",
            Country::Croatia => "Croatia",
            Country::CzechRepublic => "Czech_Republic",
            Country::Denmark => "Denmark",
            Country::Finland => "Finland",
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Greece => "Greece",
            Country::Hungary => "Hungary",
            Country::Ireland => "Ireland",
            Country::Italy => "Italy",
            Country::Latvia => "Latvia",
            Country::Lithuania => "Lithuania",
            Country::Luxembourg => "Luxembourg",
            Country::Montenegro => "Montenegro",
            Country::Netherlands => "Netherlands",
            Country::Norway => "Norway",
            Country::Poland => "Poland",
            Country::Portugal => "Portugal",
            Country::Romania => "Romania",
            Country::Slovakia => "Slovakia",
            Country::Slovenia => "Slovenia",
            Country::Spain => "Spain",
            Country::Sweden => "Sweden",
            Country::Switzerland => "Switzerland",
            Country::UnitedKingdom => "United_Kingdom",
        }
    }

    /// Display name with spaces, the spelling shapefile records use
    pub fn shapefile_name(self) -> &'static str {
        match self {
            Country::CzechRepublic => "Czech Republic",
            Country::UnitedKingdom => "United Kingdom",
            other => other.coefficient_key(),
        }
    }

    /// Resolve a country name in either spelling ("Czech Republic" or
    /// "Czech_Republic"). Unknown names are rejected at this boundary.
    pub fn from_name(name: &str) -> Result<Self, EnergyModelError> {
        let key = name.replace(' ', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.coefficient_key() == key)
            .ok_or_else(|| EnergyModelError::UnknownCountry(name.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shapefile_name())
    }
}

/// The regression terms the demand model uses for one country
#[derive(Debug, Clone, Copy)]
pub struct CountryCoefficients {
    pub time_trend: f64,
    pub hdd: f64,
    pub cdd: f64,
}

/// The published regression coefficient table: one header row, one row per
/// coefficient index, one column per country after the row-label column.
#[derive(Debug, Clone)]
pub struct DemandCoefficients {
    table: Array2<f64>,
}

impl DemandCoefficients {
    /// Parse the coefficient CSV. Non-numeric cells (the row labels in
    /// column 0) parse to NaN and are never read back.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EnergyModelError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut rows: Vec<Vec<f64>> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.len() != NUM_COUNTRIES + 1 {
                return Err(EnergyModelError::InvalidCoefficients(format!(
                    "row {}: expected {} columns, found {}",
                    rows.len() + 1,
                    NUM_COUNTRIES + 1,
                    record.len()
                )));
            }
            rows.push(
                record
                    .iter()
                    .map(|cell| cell.trim().parse().unwrap_or(f64::NAN))
                    .collect(),
            );
        }

        if rows.len() <= CDD_ROW {
            return Err(EnergyModelError::InvalidCoefficients(format!(
                "expected at least {} coefficient rows, found {}",
                CDD_ROW + 1,
                rows.len()
            )));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let table = Array2::from_shape_vec((rows.len(), NUM_COUNTRIES + 1), flat)
            .map_err(|e| EnergyModelError::InvalidCoefficients(e.to_string()))?;
        Ok(Self { table })
    }

    pub fn from_csv_str(csv: &str) -> Result<Self, EnergyModelError> {
        Self::from_reader(csv.as_bytes())
    }

    pub fn country_coefficients(&self, country: Country) -> CountryCoefficients {
        let column = country.column_index();
        CountryCoefficients {
            time_trend: self.table[[TIME_TREND_ROW, column]],
            hdd: self.table[[HDD_ROW, column]],
            cdd: self.table[[CDD_ROW, column]],
        }
    }
}

/// Heating and cooling degree days from country-masked daily-mean 2 m
/// temperature (°C).
///
/// The country spatial mean is taken per time step with the mask as
/// weights, then `hdd = max(0, 15.5 − T̄)` and `cdd = max(0, T̄ − 22.0)`.
/// Input must already be daily means; reduce hourly data first with
/// [`crate::field::hourly_to_daily`].
pub fn degree_days(
    t2m_masked: &Array3<f64>,
    mask: &Array2<f64>,
    constants: &ModelConstants,
) -> Result<(Array1<f64>, Array1<f64>), EnergyModelError> {
    let mean_t2m = weighted_mean_series(t2m_masked, mask)?;

    let hdd = mean_t2m.mapv(|t| (constants.hdd_base_temp - t).max(0.0));
    let cdd = mean_t2m.mapv(|t| (t - constants.cdd_base_temp).max(0.0));
    Ok((hdd, cdd))
}

/// Weather-dependent national demand from degree day series:
/// `demand[t] = c_time · year + c_hdd · hdd[t] + c_cdd · cdd[t]`,
/// anchored to the regression's reference year. The output reproduces that
/// year's demand level and is not a general forecast.
pub fn weather_dependent_demand(
    hdd: &Array1<f64>,
    cdd: &Array1<f64>,
    coefficients: &DemandCoefficients,
    country: Country,
    constants: &ModelConstants,
) -> Result<Array1<f64>, EnergyModelError> {
    if hdd.len() != cdd.len() {
        return Err(EnergyModelError::ShapeMismatch(format!(
            "hdd length {} does not match cdd length {}",
            hdd.len(),
            cdd.len()
        )));
    }

    let c = coefficients.country_coefficients(country);
    let baseline = c.time_trend * constants.demand_reference_year;
    Ok(hdd * c.hdd + &(cdd * c.cdd) + baseline)
}
