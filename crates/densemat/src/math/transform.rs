use std::fmt;
use std::str::FromStr;

use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::config::RoundingMode;
use crate::error::{MatrixError, Result};
use crate::math::{Matrix, Scalar};

/// Axis for [`Matrix::flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Reverse the order of the rows (top becomes bottom).
    Row,
    /// Reverse each row (left becomes right).
    Col,
}

impl FromStr for Axis {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "row" => Ok(Axis::Row),
            "col" | "column" => Ok(Axis::Col),
            _ => Err(MatrixError::InvalidArgument(format!(
                "unknown flip axis '{}', expected 'row' or 'col'",
                s
            ))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "col"),
        }
    }
}

impl<T: Scalar> Matrix<T> {
    /// New matrix with element `(i, j)` taken from `(j, i)`.
    pub fn transposed(&self) -> Matrix<T> {
        let data = self.dense();
        let (rows, cols) = (self.rows, self.cols);
        let mut out = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                out.push(data[i * cols + j]);
            }
        }
        Matrix::with_data(cols, rows, out)
    }

    /// Transpose in place; the shape becomes `(cols, rows)`.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    pub fn flipped(&self, axis: Axis) -> Matrix<T> {
        let rows = self.to_nested();
        let data = match axis {
            Axis::Row => rows.into_iter().rev().flatten().collect(),
            Axis::Col => rows
                .into_iter()
                .flat_map(|row| row.into_iter().rev())
                .collect(),
        };
        Matrix::with_data(self.rows, self.cols, data)
    }

    /// Flip in place along `axis`.
    pub fn flip(&mut self, axis: Axis) {
        *self = self.flipped(axis);
    }
}

fn round_half_even<T: Float>(y: T) -> T {
    let r = y.round();
    let two = T::one() + T::one();
    if (r - y).abs() == <T as NumCast>::from(0.5).unwrap_or_else(|| T::one() / two) {
        two * (y / two).round()
    } else {
        r
    }
}

impl<T: Scalar + Float> Matrix<T> {
    /// Round every element to `ndigits` decimal places, ties to even.
    /// Negative `ndigits` rounds to tens, hundreds and so on.
    pub fn round(&self, ndigits: i32) -> Matrix<T> {
        self.round_with(ndigits, RoundingMode::HalfEven)
    }

    pub fn round_with(&self, ndigits: i32, mode: RoundingMode) -> Matrix<T> {
        let ten = <T as NumCast>::from(10.0).unwrap_or_else(T::one);
        let factor = ten.powi(ndigits.saturating_abs());
        if !factor.is_finite() {
            // past the exponent range every value is already exact, or rounds to zero
            return self.map(|&v| if ndigits > 0 { v } else { v * T::zero() });
        }
        self.map(|&v| {
            let y = if ndigits >= 0 { v * factor } else { v / factor };
            if y.is_infinite() && v.is_finite() {
                return v;
            }
            let r = match mode {
                RoundingMode::HalfEven => round_half_even(y),
                RoundingMode::HalfAwayFromZero => y.round(),
            };
            if ndigits >= 0 {
                r / factor
            } else {
                r * factor
            }
        })
    }

    /// Same shape and every pair of elements within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix<T>, tolerance: T) -> bool {
        self.shape() == other.shape()
            && self
                .dense()
                .iter()
                .zip(other.dense().iter())
                .all(|(&a, &b)| (a - b).abs() <= tolerance)
    }
}
