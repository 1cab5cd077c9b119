//! Curve fitting.
//!
//! Currently a single concern: the BCA standard curve (linear, least squares).

pub mod standard_curve;

pub use standard_curve::*;
