//! Elementwise arithmetic, scaling and the matrix product.
//!
//! The `checked_*` methods and [`Matrix::matmul`] are the fallible forms. The
//! `std::ops` impls on references are shorthands that panic on a shape error,
//! in the same way slice indexing panics out of range.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{MatrixError, Result};
use crate::math::{Matrix, Scalar};

impl<T: Scalar> Matrix<T> {
    fn zip_with<F>(&self, other: &Matrix<T>, op: &'static str, f: F) -> Result<Matrix<T>>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .dense()
            .iter()
            .zip(other.dense().iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::with_data(self.rows, self.cols, data))
    }

    pub fn checked_add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Matrix<T> {
        self.map(|&v| v * k)
    }

    pub fn negate(&self) -> Matrix<T> {
        self.scale(-T::one())
    }

    /// Unary plus.
    pub fn identity_unary(&self) -> Matrix<T> {
        self.clone()
    }

    /// Standard matrix product, `self.rows x other.cols`.
    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                left_cols: self.cols,
                right_rows: other.rows,
            });
        }
        let lhs = self.dense();
        let rhs = other.dense();
        let (m, inner, n) = (self.rows, self.cols, other.cols);

        let mut data = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::zero();
                for k in 0..inner {
                    sum = sum + lhs[i * inner + k] * rhs[k * n + j];
                }
                data.push(sum);
            }
        }
        Ok(Matrix::with_data(m, n, data))
    }
}

impl<'a, 'b, T: Scalar> Add<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &'b Matrix<T>) -> Self::Output {
        match self.checked_add(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, 'b, T: Scalar> Sub<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &'b Matrix<T>) -> Self::Output {
        match self.checked_sub(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, 'b, T: Scalar> Mul<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &'b Matrix<T>) -> Self::Output {
        match self.matmul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T: Scalar> Mul<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.scale(rhs)
    }
}

impl<'a, T: Scalar> Neg for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
