//! Error types for strict configuration checks and snapshot lookups.

use core::fmt;

/// Errors reported by the fallible edges of the crate.
///
/// The simulation itself never fails: configuration is clamped on the way
/// in. These variants exist for callers that prefer rejection over clamping.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// A numeric field lies outside its accepted range.
    OutOfRange { field: &'static str, min: f64, max: f64, value: f64 },
    /// A vector or scalar field is NaN or infinite.
    NonFinite { field: &'static str },
    /// Row or column index is outside the grid.
    PointOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::OutOfRange { field, min, max, value } => {
                write!(f, "{} = {} is outside [{}, {}]", field, value, min, max)
            }
            ClothError::NonFinite { field } => write!(f, "{} must be finite", field),
            ClothError::PointOutOfBounds { row, col, rows, cols } => {
                write!(f, "point ({}, {}) out of bounds (grid: {} x {})", row, col, rows, cols)
            }
        }
    }
}

impl core::error::Error for ClothError {}
