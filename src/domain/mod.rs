//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - plate geometry and assay constants (mass ladder, control columns, labels)
//! - result values (`AssayRun`, `CtgRun`, and their parts)
//! - run configuration (`BcaConfig`, `CtgConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
