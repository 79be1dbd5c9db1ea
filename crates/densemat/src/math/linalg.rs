//! Determinants, minors, cofactors, inverses and integer powers.
//!
//! Everything here follows the textbook definitions: the determinant is a
//! recursive Laplace expansion along the first row and the inverse is the
//! adjugate divided by the determinant. Cost is exponential in the matrix
//! size, which is fine for the small matrices this crate targets.

use num_traits::Float;

use crate::error::{MatrixError, Result};
use crate::math::{Matrix, Scalar};

/// Copy of an `nrows x ncols` row-major buffer without row `row` and column
/// `col` (both zero-based).
fn strike<T: Scalar>(ncols: usize, data: &[T], row: usize, col: usize) -> Vec<T> {
    data.iter()
        .enumerate()
        .filter(|(idx, _)| idx / ncols != row && idx % ncols != col)
        .map(|(_, &v)| v)
        .collect()
}

/// Determinant of the `n x n` matrix stored row-major in `data`.
fn det<T: Scalar>(n: usize, data: &[T]) -> T {
    match n {
        1 => data[0],
        2 => data[0] * data[3] - data[1] * data[2],
        _ => {
            log::trace!("expanding {}x{} determinant along the first row", n, n);
            let mut acc = T::zero();
            for col in 0..n {
                let sub = strike(n, data, 0, col);
                let term = data[col] * det(n - 1, &sub);
                acc = if col % 2 == 0 { acc + term } else { acc - term };
            }
            acc
        }
    }
}

fn square_and_multiply<T: Scalar>(base: &Matrix<T>, exponent: u32) -> Result<Matrix<T>> {
    if exponent == 1 {
        return Ok(base.clone());
    }
    log::trace!("squaring for exponent {}", exponent);
    let squared = base.matmul(base)?;
    let rest = square_and_multiply(&squared, exponent / 2)?;
    if exponent % 2 == 1 {
        base.matmul(&rest)
    } else {
        Ok(rest)
    }
}

impl<T: Scalar> Matrix<T> {
    pub(crate) fn require_square(&self, op: &'static str) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// The matrix without 1-indexed row `row` and column `col`.
    pub fn submatrix(&self, row: usize, col: usize) -> Result<Matrix<T>> {
        if self.rows < 2 || self.cols < 2 {
            return Err(MatrixError::InvalidShape {
                rows: self.rows - 1,
                cols: self.cols - 1,
            });
        }
        self.get(row, col)?;
        let data = strike(self.cols, &self.dense(), row - 1, col - 1);
        Ok(Matrix::with_data(self.rows - 1, self.cols - 1, data))
    }

    pub fn determinant(&self) -> Result<T> {
        self.require_square("determinant")?;
        Ok(det(self.rows, &self.dense()))
    }

    /// Minor of the 1-indexed coordinate `(row, col)`.
    pub fn minor(&self, row: usize, col: usize) -> Result<T> {
        self.require_square("minor")?;
        self.submatrix(row, col)?.determinant()
    }

    /// Matrix of minors. A 1x1 matrix is returned unchanged.
    pub fn minors(&self) -> Result<Matrix<T>> {
        self.require_square("minors")?;
        let n = self.rows;
        let data = self.dense();
        if n == 1 {
            return Ok(Matrix::with_data(1, 1, data.into_owned()));
        }
        let mut out = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                out.push(det(n - 1, &strike(n, &data, i, j)));
            }
        }
        Ok(Matrix::with_data(n, n, out))
    }

    /// Minors with the checkerboard sign applied: `(i, j)` is negated when
    /// `i + j` is odd.
    pub fn cofactors(&self) -> Result<Matrix<T>> {
        let mut minors = self.minors()?;
        let n = minors.cols;
        for (idx, v) in minors.data.iter_mut().enumerate() {
            if (idx / n + idx % n) % 2 == 1 {
                *v = -*v;
            }
        }
        Ok(minors)
    }

    /// Transpose of the cofactor matrix. For a 1x1 matrix this is the matrix
    /// itself, since its minors are defined as the element.
    pub fn adjugate(&self) -> Result<Matrix<T>> {
        Ok(self.cofactors()?.transposed())
    }

    /// Non-negative integer power by repeated squaring. `pow(0)` is the
    /// identity of matching size.
    pub fn pow(&self, exponent: u32) -> Result<Matrix<T>> {
        self.require_square("power")?;
        match exponent {
            0 => Matrix::identity(self.rows),
            e => square_and_multiply(self, e),
        }
    }
}

impl<T: Scalar + Float> Matrix<T> {
    /// Adjugate over determinant. Fails with [`MatrixError::Singular`] when the
    /// determinant is exactly zero.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        self.require_square("inverse")?;
        let det = self.determinant()?;
        if det == T::zero() {
            return Err(MatrixError::Singular);
        }
        log::debug!("inverting {}x{} matrix (determinant {})", self.rows, self.cols, det);
        if self.rows == 1 {
            return Ok(Matrix::with_data(1, 1, vec![T::one() / det]));
        }
        Ok(self.adjugate()?.scale(T::one() / det))
    }

    /// Integer power where negative exponents go through the inverse:
    /// `A^-k == (A^-1)^k`.
    pub fn powi(&self, exponent: i32) -> Result<Matrix<T>> {
        self.require_square("power")?;
        match exponent {
            e if e >= 0 => self.pow(e as u32),
            -1 => self.inverse(),
            e => self.inverse()?.pow(e.unsigned_abs()),
        }
    }
}
