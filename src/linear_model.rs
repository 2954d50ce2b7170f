//! Ordinary least squares.
//!
//! ```rust
//! use coursework::LinearRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0]];
//! let y = array![2.0, 4.0, 6.0];
//!
//! let mut model = LinearRegression::new();
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! ```

use crate::{CourseworkError, Matrix, Result, Vector, linalg};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct LinearRegression {
    pub coefficients: Option<Vector>,
    pub intercept: Option<f64>,
    fit_intercept: bool,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept: true,
        }
    }

    pub fn with_intercept(fit_intercept: bool) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept,
        }
    }

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(CourseworkError::length_mismatch(x.nrows(), y.len()));
        }

        if x.nrows() == 0 {
            return Err(CourseworkError::InvalidParameter(
                "X must have at least one sample".to_string(),
            ));
        }

        let (coeffs, intercept) = if self.fit_intercept {
            self.fit_with_intercept(x, y)?
        } else {
            (solve_normal_equation(x, y)?, 0.0)
        };

        debug!(?coeffs, intercept, "fitted least squares");
        self.coefficients = Some(coeffs);
        self.intercept = Some(intercept);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self
            .coefficients
            .as_ref()
            .ok_or(CourseworkError::ModelNotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);

        if x.ncols() != coeffs.len() {
            return Err(CourseworkError::ShapeMismatch {
                expected: format!("{} features", coeffs.len()),
                actual: format!("{} features", x.ncols()),
            });
        }

        Ok(x.dot(coeffs) + intercept)
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }

    fn fit_with_intercept(&self, x: &Matrix, y: &Vector) -> Result<(Vector, f64)> {
        let n = y.len() as f64;
        let y_mean = y.sum() / n;
        let x_means = x.sum_axis(ndarray::Axis(0)) / n;

        let mut x_centered = x.clone();
        for mut row in x_centered.axis_iter_mut(ndarray::Axis(0)) {
            row -= &x_means;
        }

        let y_centered = y - y_mean;

        let coeffs = solve_normal_equation(&x_centered, &y_centered)?;
        let intercept = y_mean - coeffs.dot(&x_means);

        Ok((coeffs, intercept))
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

/// Solves `xᵀx b = xᵀy`.
fn solve_normal_equation(x: &Matrix, y: &Vector) -> Result<Vector> {
    let xty = x.t().dot(y);
    linalg::solve(&linalg::gram(x), &xty)
}
