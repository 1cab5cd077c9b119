//! Mathematical utilities: averaging and least squares.

pub mod ols;

pub use ols::*;

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
