//! Standard-curve fitting for the BCA assay.
//!
//! Averaged standard signals are paired positionally with the known mass ladder
//! and regressed with x = signal, y = mass. The resulting line converts any
//! background-subtracted sample signal into a protein mass.

use crate::domain::{MASS_LADDER_UG, StandardCurve, StandardCurvePoint};
use crate::error::AssayError;
use crate::math::{fit_line, r_squared};

/// Pair standard averages with the mass ladder.
pub fn standard_points(std_avgs: &[f64]) -> Result<Vec<StandardCurvePoint>, AssayError> {
    if std_avgs.len() != MASS_LADDER_UG.len() {
        return Err(AssayError::data_format(format!(
            "expected {} standard averages to match the mass ladder, found {}",
            MASS_LADDER_UG.len(),
            std_avgs.len()
        )));
    }

    Ok(std_avgs
        .iter()
        .zip(MASS_LADDER_UG)
        .map(|(&signal, mass_ug)| StandardCurvePoint { signal, mass_ug })
        .collect())
}

/// Fit `mass = slope * signal + intercept` through the standards.
pub fn fit_standard_curve(std_avgs: &[f64]) -> Result<StandardCurve, AssayError> {
    let points = standard_points(std_avgs)?;
    fit_points(&points)
}

/// Fit an arbitrary set of standard points.
///
/// Fails with a configuration error when the signals cannot determine a line:
/// non-finite values or fewer than two distinct signals.
pub fn fit_points(points: &[StandardCurvePoint]) -> Result<StandardCurve, AssayError> {
    if let Some(bad) = points.iter().find(|p| !p.signal.is_finite()) {
        return Err(AssayError::configuration(format!(
            "standard for {} µg has a non-finite signal ({})",
            bad.mass_ug, bad.signal
        )));
    }

    let x: Vec<f64> = points.iter().map(|p| p.signal).collect();
    let y: Vec<f64> = points.iter().map(|p| p.mass_ug).collect();

    let distinct = distinct_count(&x);
    if distinct < 2 {
        return Err(AssayError::configuration(format!(
            "standard curve needs at least 2 distinct signals, found {distinct}"
        )));
    }

    let (intercept, slope) = fit_line(&x, &y).ok_or_else(|| {
        AssayError::configuration("standard curve regression did not produce finite coefficients")
    })?;

    let curve = StandardCurve {
        slope,
        intercept,
        r_squared: r_squared(&x, &y, intercept, slope),
    };
    log::debug!(
        "standard curve: slope={:.6} intercept={:.6} r2={:.4}",
        curve.slope,
        curve.intercept,
        curve.r_squared
    );
    Ok(curve)
}

fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
