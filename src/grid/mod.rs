//! Plate grids and the sources they are read from.
//!
//! - `GridSource`: the trait exporters/parsers implement (`source`)
//! - `StackedPlates`: in-memory multi-plate sheet (`source`)
//! - `PlateGrid`: validated 8 × 12 plate (`plate`)

pub mod plate;
pub mod source;

pub use plate::*;
pub use source::*;
