use thiserror::Error;

/// Error type for the country-masking and energy-conversion chain.
///
/// Every variant is local-origin (bad input data or a bad country/key);
/// nothing here is transient, so there is no retry machinery anywhere in
/// the crate. Callers fix their inputs and re-invoke.
#[derive(Error, Debug)]
pub enum EnergyModelError {
    #[error("Country not found in shapefile records: {0}")]
    CountryNotFound(String),

    #[error("Country is not part of the 28-country demand model: {0}")]
    UnknownCountry(String),

    #[error("Variable not found: {0}")]
    MissingVariable(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Mask weights sum to zero, spatial mean is undefined")]
    DegenerateMask,

    #[error("Invalid power curve: {0}")]
    InvalidPowerCurve(String),

    #[error("Invalid coefficient table: {0}")]
    InvalidCoefficients(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
