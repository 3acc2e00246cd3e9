//! Core error types for the analytics engines.
//!
//! Numeric edge cases (no overlapping history, flat series, zero targets) are
//! resolved to sentinel values by the engines themselves. Only violations of
//! an engine's preconditions surface as an [`Error`].

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid simulation configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Market data operation failed: {0}")]
    MarketData(String),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

/// Precondition violations rejected at the simulator boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Initial value must be a positive finite number, got {0}")]
    NonPositiveInitialValue(f64),

    #[error("Simulation horizon must be at least one year")]
    ZeroHorizon,

    #[error("Simulation horizon of {0} years has too many monthly steps")]
    HorizonTooLong(u32),

    #[error("At least one simulation path is required")]
    ZeroSimulations,

    #[error("Volatility must be a non-negative finite number, got {0}")]
    InvalidVolatility(f64),

    #[error("{field} must be between 0 and 1, got {value}")]
    TaxRateOutOfRange { field: &'static str, value: f64 },

    #[error("Inflation rate must be greater than -100%, got {0}")]
    InvalidInflationRate(f64),

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Errors that occur while deriving statistics from raw series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Insufficient overlapping history: {found} aligned price points, {required} required")]
    InsufficientPricePoints { found: usize, required: usize },

    #[error("Insufficient valid returns: {found} return pairs, {required} required")]
    InsufficientReturnPairs { found: usize, required: usize },
}

/// Validation errors for host-supplied inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Duplicate entry for symbol '{0}'")]
    DuplicateSymbol(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
