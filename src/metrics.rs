//! Goodness-of-fit statistics for regression predictions.
//!
//! Shape mismatches are errors. Degenerate inputs are not: a constant
//! `y_true`, `n == k + 1` or `n == 2` produce NaN or infinities exactly as the
//! arithmetic dictates, and callers decide what to do with them.

use std::fmt;

use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

use crate::{CourseworkError, Matrix, Result, Vector, linalg};

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(CourseworkError::length_mismatch(y_true.len(), y_pred.len()));
    }
    Ok(())
}

fn squared_residuals(y_true: &Vector, y_pred: &Vector) -> Vector {
    (y_pred - y_true).mapv(|x| x * x)
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    Ok(squared_residuals(y_true, y_pred).sum() / y_true.len() as f64)
}

pub fn root_mean_square_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let mae = (y_pred - y_true).mapv(f64::abs).sum() / y_true.len() as f64;
    Ok(mae)
}

pub fn sum_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    Ok(squared_residuals(y_true, y_pred).sum())
}

/// Coefficient of determination, `1 - SSE/SST`.
///
/// A constant `y_true` has `SST == 0`; the result is then NaN (perfect fit)
/// or negative infinity.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = squared_residuals(y_true, y_pred).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    Ok(1.0 - ss_res / ss_tot)
}

/// R² penalised for the number of features.
pub fn adj_r2(r2: f64, num_data: usize, num_features: usize) -> f64 {
    let n = num_data as f64;
    let k = num_features as f64;
    1.0 - (1.0 - r2) * (n - 1.0) / (n - k - 1.0)
}

/// `sqrt(SSE / (n - 2))`.
pub fn standard_error_estimate(y_true: &Vector, y_pred: &Vector, num_data: usize) -> Result<f64> {
    let sse = sum_squared_error(y_true, y_pred)?;
    Ok((sse / (num_data as f64 - 2.0)).sqrt())
}

/// Two-sided p-values for each fitted coefficient.
///
/// Uses the residual variance `SSE / (n - k)`, standard errors from the
/// diagonal of `σ² (xᵀx)⁻¹` and a Student-t with `n - k` degrees of freedom.
/// `x` must have full column rank.
pub fn p_vals_per_coef(
    y_pred: &Vector,
    y_true: &Vector,
    coefs: &Vector,
    x: &Matrix,
) -> Result<Vector> {
    check_lengths(y_true, y_pred)?;
    if x.nrows() != y_true.len() {
        return Err(CourseworkError::length_mismatch(y_true.len(), x.nrows()));
    }
    if coefs.len() != x.ncols() {
        return Err(CourseworkError::length_mismatch(x.ncols(), coefs.len()));
    }

    let dof = y_true.len() as f64 - x.ncols() as f64;
    let t_dist = StudentsT::new(0.0, 1.0, dof).map_err(|e| {
        CourseworkError::InvalidParameter(format!("degrees of freedom {}: {}", dof, e))
    })?;

    let sigma2 = sum_squared_error(y_true, y_pred)? / dof;
    let gram_inv = linalg::invert(&linalg::gram(x))?;
    let std_errors = gram_inv.diag().mapv(|v| (sigma2 * v).sqrt());

    let t_stats = coefs / &std_errors;
    debug!(?t_stats, dof, "coefficient t statistics");

    Ok(t_stats.mapv(|t| 2.0 * (1.0 - t_dist.cdf(t.abs()))))
}

/// `[min(y), max(y)]`, the ends of the predicted-equals-true reference line.
pub fn reference_diagonal(y_true: &Vector) -> Option<(f64, f64)> {
    if y_true.is_empty() {
        return None;
    }
    let lo = y_true.fold(f64::INFINITY, |acc, &v| acc.min(v));
    let hi = y_true.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    Some((lo, hi))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelScore {
    pub r2: f64,
    pub adj_r2: f64,
}

/// Every statistic [`model_score`] prints in verbose mode.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsReport {
    pub mean_squared_error: f64,
    pub root_mean_squared_error: f64,
    pub mean_absolute_error: f64,
    pub r2: f64,
    pub adj_r2: f64,
    pub standard_error_estimate: f64,
    /// `(predicted, true)` pairs for a scatter plot.
    pub points: Vec<(f64, f64)>,
    pub diagonal: Option<(f64, f64)>,
}

impl MetricsReport {
    pub fn compute(y_true: &Vector, y_pred: &Vector, x: &Matrix) -> Result<Self> {
        let score = score_only(y_true, y_pred, x)?;
        let mse = mean_squared_error(y_true, y_pred)?;

        Ok(Self {
            mean_squared_error: mse,
            root_mean_squared_error: mse.sqrt(),
            mean_absolute_error: mean_absolute_error(y_true, y_pred)?,
            r2: score.r2,
            adj_r2: score.adj_r2,
            standard_error_estimate: standard_error_estimate(y_true, y_pred, x.nrows())?,
            points: y_pred.iter().copied().zip(y_true.iter().copied()).collect(),
            diagonal: reference_diagonal(y_true),
        })
    }

    pub fn score(&self) -> ModelScore {
        ModelScore {
            r2: self.r2,
            adj_r2: self.adj_r2,
        }
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean Squared Error: {}", self.mean_squared_error)?;
        writeln!(f, "Root Mean Squared Error: {}", self.root_mean_squared_error)?;
        writeln!(f, "Mean Absolute Error: {}", self.mean_absolute_error)?;
        writeln!(f, "R2: {}", self.r2)?;
        writeln!(f, "Adj R2: {}", self.adj_r2)?;
        write!(f, "Standard Error of Estimate: {}", self.standard_error_estimate)
    }
}

fn score_only(y_true: &Vector, y_pred: &Vector, x: &Matrix) -> Result<ModelScore> {
    if x.nrows() != y_true.len() {
        return Err(CourseworkError::length_mismatch(y_true.len(), x.nrows()));
    }
    let r2 = r2_score(y_true, y_pred)?;
    Ok(ModelScore {
        r2,
        adj_r2: adj_r2(r2, x.nrows(), x.ncols()),
    })
}

/// R² and adjusted R² for a fit over design matrix `x`.
///
/// With `verbose` the full [`MetricsReport`] is printed to stdout as well.
pub fn model_score(
    y_true: &Vector,
    y_pred: &Vector,
    x: &Matrix,
    verbose: bool,
) -> Result<ModelScore> {
    if !verbose {
        return score_only(y_true, y_pred, x);
    }
    let report = MetricsReport::compute(y_true, y_pred, x)?;
    println!("{}", report);
    Ok(report.score())
}
