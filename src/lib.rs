//! `plate-assays` library crate.
//!
//! Numeric core for two plate-reader assays:
//!
//! - BCA: protein concentration and load volume per sample (`bca`, `fit`)
//! - CTG: percent viability relative to control wells (`ctg`)
//!
//! File parsing and presentation belong to callers; they hand the core a
//! `grid::GridSource` and receive serializable results from `pipeline`.

pub mod bca;
pub mod ctg;
pub mod domain;
pub mod error;
pub mod fit;
pub mod grid;
pub mod math;
pub mod pipeline;

pub use error::AssayError;
pub use pipeline::{run_bca, run_bca_from_source, run_ctg};
