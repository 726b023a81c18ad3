//! Collaborator interfaces.
//!
//! The core never touches archive files itself: gridded reanalysis
//! variables, shapefile boundary records and installed-capacity maps are
//! produced by external readers and handed in as in-memory arrays. These
//! traits are the contract those readers implement.

use crate::error::EnergyModelError;
use crate::grid::Grid;
use crate::mask::CountryRecord;
use ndarray::{Array2, Array3};

/// A source of gridded reanalysis fields on a fixed grid. The variable
/// vocabulary includes at least `t2m`, `ssrd`, `u100` and `v100`; units
/// are the archive's (conversion happens in [`crate::field`]).
pub trait FieldSource {
    /// The lat/lon grid every field from this source is sampled on
    fn grid(&self) -> Result<Grid, EnergyModelError>;

    /// Load a named variable as a `[time, lat, lon]` array
    fn load_field(&self, variable: &str) -> Result<Array3<f64>, EnergyModelError>;
}

/// A source of country boundary records, e.g. a Natural Earth shapefile
/// reader. Record names use spaces ("United Kingdom").
pub trait ShapeSource {
    fn country_records(&self) -> Result<Vec<CountryRecord>, EnergyModelError>;
}

/// A source of the per-gridpoint `totals` map: installed capacity in MW
/// for capacity-weighted aggregation, or the optimal turbine class per
/// gridbox for multi-class wind conversion.
pub trait CapacitySource {
    fn totals(&self) -> Result<Array2<f64>, EnergyModelError>;
}
