//! Dense solves for the small symmetric systems that show up in least squares.

use crate::{CourseworkError, Matrix, Result, Vector};

/// Pivots at or below `PIVOT_EPS` times the largest entry of the input count
/// as zero, so the test follows the scale of the matrix.
const PIVOT_EPS: f64 = 1e-10;

fn pivot_tolerance(a: &Matrix) -> f64 {
    PIVOT_EPS * a.fold(0.0_f64, |acc, &v| acc.max(v.abs()))
}

fn check_square(a: &Matrix) -> Result<usize> {
    if a.nrows() != a.ncols() {
        return Err(CourseworkError::ShapeMismatch {
            expected: "square matrix".to_string(),
            actual: format!("{}x{}", a.nrows(), a.ncols()),
        });
    }
    Ok(a.nrows())
}

/// Index of the row at or below `col` with the largest magnitude in `col`.
fn pivot_row(aug: &Matrix, col: usize) -> usize {
    let mut max_row = col;
    for k in (col + 1)..aug.nrows() {
        if aug[(k, col)].abs() > aug[(max_row, col)].abs() {
            max_row = k;
        }
    }
    max_row
}

fn swap_rows(aug: &mut Matrix, i: usize, j: usize) {
    if i == j {
        return;
    }
    for c in 0..aug.ncols() {
        aug.swap((i, c), (j, c));
    }
}

/// Solves `a x = b` by Gaussian elimination with partial pivoting.
pub fn solve(a: &Matrix, b: &Vector) -> Result<Vector> {
    let n = check_square(a)?;
    if b.len() != n {
        return Err(CourseworkError::length_mismatch(n, b.len()));
    }

    let mut aug = Matrix::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n)] = b[i];
    }

    let tol = pivot_tolerance(a);
    for i in 0..n {
        let max_row = pivot_row(&aug, i);
        if aug[(max_row, i)].abs() <= tol {
            return Err(CourseworkError::SingularMatrix);
        }
        swap_rows(&mut aug, i, max_row);

        for k in (i + 1)..n {
            let factor = aug[(k, i)] / aug[(i, i)];
            for j in i..=n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        x[i] = aug[(i, n)];
        for j in (i + 1)..n {
            x[i] -= aug[(i, j)] * x[j];
        }
        x[i] /= aug[(i, i)];
    }

    Ok(x)
}

/// Inverts `a` by Gauss-Jordan elimination on `[a | I]`.
pub fn invert(a: &Matrix) -> Result<Matrix> {
    let n = check_square(a)?;

    let mut aug = Matrix::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n + i)] = 1.0;
    }

    let tol = pivot_tolerance(a);
    for i in 0..n {
        let max_row = pivot_row(&aug, i);
        if aug[(max_row, i)].abs() <= tol {
            return Err(CourseworkError::SingularMatrix);
        }
        swap_rows(&mut aug, i, max_row);

        let pivot = aug[(i, i)];
        for j in 0..2 * n {
            aug[(i, j)] /= pivot;
        }

        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = aug[(k, i)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    Ok(aug.slice(ndarray::s![.., n..]).to_owned())
}

/// Gram matrix `xᵀx`.
pub fn gram(x: &Matrix) -> Matrix {
    x.t().dot(x)
}
