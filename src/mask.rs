//! Country membership masks on a reanalysis grid.
//!
//! A mask is a `[lat, lon]` array of 1.0/0.0 marking grid cell centres
//! inside a country boundary. Building one costs a point-in-polygon test
//! per grid cell, so masks are built once per (country, grid) pair and
//! shared read-only afterwards.

use crate::error::EnergyModelError;
use crate::geometry::{GeoPoint, MultiPolygon};
use crate::grid::Grid;
use log::{info, warn};
use ndarray::{Array2, Zip};
use std::collections::HashMap;
use std::sync::Arc;

/// One country boundary record as supplied by a shapefile reader
/// collaborator. Names use spaces, not underscores ("Czech Republic").
#[derive(Debug, Clone)]
pub struct CountryRecord {
    pub name: String,
    pub geometry: MultiPolygon,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, geometry: impl Into<MultiPolygon>) -> Self {
        Self {
            name: name.into(),
            geometry: geometry.into(),
        }
    }
}

/// Build the binary membership mask for `country` over `grid`.
///
/// Only the first record whose name matches exactly is used; shapefile
/// entries that merge a country's parts into one multipolygon are covered
/// by that single record. Additional records sharing the name are ignored
/// with a warning, since silently dropping them has bitten real datasets.
///
/// Returns `CountryNotFound` when no record matches.
pub fn build_country_mask(
    records: &[CountryRecord],
    country: &str,
    grid: &Grid,
) -> Result<Array2<f64>, EnergyModelError> {
    let mut matches = records.iter().filter(|r| r.name == country);
    let record = matches
        .next()
        .ok_or_else(|| EnergyModelError::CountryNotFound(country.to_string()))?;
    let ignored = matches.count();
    if ignored > 0 {
        warn!(
            "{} additional shapefile record(s) named {:?} ignored; masking the first only",
            ignored, country
        );
    }
    info!("found country record for {:?}", country);

    let geometry = &record.geometry;
    let mut mask = Array2::<f64>::zeros(grid.shape());
    Zip::indexed(&mut mask).par_for_each(|(i, j), value| {
        let point = GeoPoint::new(grid.lons[j], grid.lats[i]);
        if geometry.contains(&point) {
            *value = 1.0;
        }
    });

    Ok(mask)
}

/// Per-grid cache of country masks.
///
/// Masks are immutable once built; the cache hands out `Arc` clones so the
/// same mask can back concurrent conversions without copying or locking.
pub struct MaskCache {
    grid: Grid,
    masks: HashMap<String, Arc<Array2<f64>>>,
}

impl MaskCache {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            masks: HashMap::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Fetch the mask for `country`, building it on first use.
    pub fn mask_for(
        &mut self,
        records: &[CountryRecord],
        country: &str,
    ) -> Result<Arc<Array2<f64>>, EnergyModelError> {
        if let Some(mask) = self.masks.get(country) {
            return Ok(Arc::clone(mask));
        }
        let mask = Arc::new(build_country_mask(records, country, &self.grid)?);
        self.masks.insert(country.to_string(), Arc::clone(&mask));
        Ok(mask)
    }
}
