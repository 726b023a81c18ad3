use crate::error::EnergyModelError;
use ndarray::{Array1, Array2, Array3};

/// Regular latitude/longitude lattice shared by every field processed
/// together. Fields are indexed `[time, lat, lon]`, masks `[lat, lon]`.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Ordered grid cell centre longitudes (degrees east)
    pub lons: Array1<f64>,
    /// Ordered grid cell centre latitudes (degrees north)
    pub lats: Array1<f64>,
}

impl Grid {
    pub fn new(lons: Array1<f64>, lats: Array1<f64>) -> Self {
        Self { lons, lats }
    }

    pub fn from_vecs(lons: Vec<f64>, lats: Vec<f64>) -> Self {
        Self::new(Array1::from(lons), Array1::from(lats))
    }

    pub fn nlon(&self) -> usize {
        self.lons.len()
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    /// Spatial shape in array order, `(nlat, nlon)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nlat(), self.nlon())
    }

    /// Check that a `[time, lat, lon]` field sits on this grid
    pub fn check_field(&self, field: &Array3<f64>) -> Result<(), EnergyModelError> {
        let (_, nlat, nlon) = field.dim();
        if (nlat, nlon) != self.shape() {
            return Err(EnergyModelError::ShapeMismatch(format!(
                "field spatial shape ({}, {}) does not match grid shape ({}, {})",
                nlat,
                nlon,
                self.nlat(),
                self.nlon()
            )));
        }
        Ok(())
    }

    /// Check that a `[lat, lon]` mask or weight map sits on this grid
    pub fn check_mask(&self, mask: &Array2<f64>) -> Result<(), EnergyModelError> {
        if mask.dim() != self.shape() {
            return Err(EnergyModelError::ShapeMismatch(format!(
                "mask shape ({}, {}) does not match grid shape ({}, {})",
                mask.dim().0,
                mask.dim().1,
                self.nlat(),
                self.nlon()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_grid_shape() {
        let grid = Grid::from_vecs(vec![0.0, 1.0, 2.0], vec![50.0, 51.0]);
        assert_eq!(grid.nlon(), 3);
        assert_eq!(grid.nlat(), 2);
        assert_eq!(grid.shape(), (2, 3));
    }

    #[test]
    fn test_check_field() {
        let grid = Grid::from_vecs(vec![0.0, 1.0, 2.0], vec![50.0, 51.0]);
        assert!(grid.check_field(&Array3::zeros((5, 2, 3))).is_ok());
        assert!(grid.check_field(&Array3::zeros((5, 3, 2))).is_err());
    }
}
