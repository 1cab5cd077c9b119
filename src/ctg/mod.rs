//! CTG cell-viability normalization.

pub mod normalizer;

pub use normalizer::*;
