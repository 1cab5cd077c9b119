//! BCA protein quantification.
//!
//! Stages, in pipeline order:
//!
//! - replicate averaging and background subtraction (`averager`)
//! - signal → concentration through the standard curve (`concentration`)
//! - concentration → load volume for a target mass (`load_volume`)
//! - gating, naming and record assembly (`samples`)
//!
//! Curve fitting itself lives in `crate::fit`.

pub mod averager;
pub mod concentration;
pub mod load_volume;
pub mod samples;

pub use averager::*;
pub use concentration::*;
pub use load_volume::*;
pub use samples::*;
