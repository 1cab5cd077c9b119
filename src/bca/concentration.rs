//! Protein concentration from a standard curve.

use crate::domain::StandardCurve;

/// Concentration (µg/µL) of a sample given its background-subtracted signal.
///
/// The curve predicts the mass present in the assay well; dividing by the
/// volume loaded into that well gives the concentration of the stock.
pub fn concentration(signal: f64, curve: &StandardCurve, dilution_volume_ul: f64) -> f64 {
    curve.predict_mass(signal) / dilution_volume_ul
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_DILUTION_VOLUME_UL;

    fn curve(slope: f64, intercept: f64) -> StandardCurve {
        StandardCurve {
            slope,
            intercept,
            r_squared: 1.0,
        }
    }

    #[test]
    fn divides_predicted_mass_by_loaded_volume() {
        let c = concentration(0.5, &curve(10.0, 0.0), DEFAULT_DILUTION_VOLUME_UL);
        assert!((c - 2.0).abs() < 1e-12);
    }

    #[test]
    fn intercept_shifts_mass() {
        let c = concentration(1.0, &curve(10.0, 2.5), 5.0);
        assert!((c - 2.5).abs() < 1e-12);
    }

    #[test]
    fn negative_prediction_is_passed_through() {
        let c = concentration(0.01, &curve(10.0, -1.0), 2.5);
        assert!(c < 0.0);
    }
}
