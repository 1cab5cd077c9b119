//! Volume to load for a target protein mass.

use crate::error::AssayError;

/// Microliters of sample that deliver `target_mass_ug` at `concentration` µg/µL.
///
/// A non-positive or non-finite concentration has no physical load volume.
pub fn load_volume(concentration: f64, target_mass_ug: f64) -> Result<f64, AssayError> {
    if !(concentration.is_finite() && concentration > 0.0) {
        return Err(AssayError::computation(format!(
            "cannot derive a load volume from concentration {concentration} µg/µL"
        )));
    }
    Ok(target_mass_ug / concentration)
}
