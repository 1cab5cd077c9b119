//! Ordinary least squares.
//!
//! Standard curves are tiny regressions (seven points, two coefficients), but the
//! standards can be nearly collinear when a plate is badly read. We solve through
//! SVD so that a rank-deficient design is reported instead of producing garbage.

use nalgebra::{DMatrix, DVector};

/// Solve `min ||X β - y||²` using SVD.
///
/// Returns `None` if the system is too ill-conditioned to give finite coefficients.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Intercept and slope of the simple regression `y = intercept + slope * x`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len();
    let design = DMatrix::from_fn(n, 2, |r, c| if c == 0 { 1.0 } else { x[r] });
    let target = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &target)?;
    Some((beta[0], beta[1]))
}

/// Coefficient of determination of a fitted line.
///
/// A constant `y` has no variance to explain; the fit is then exact only if every
/// residual is zero, which we report as 1.0.
pub fn r_squared(x: &[f64], y: &[f64], intercept: f64, slope: f64) -> f64 {
    let y_mean = super::mean(y);
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let fit = intercept + slope * xi;
        ss_res += (yi - fit).powi(2);
        ss_tot += (yi - y_mean).powi(2);
    }
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
