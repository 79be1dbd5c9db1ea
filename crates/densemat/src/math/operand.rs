//! Right-hand operands that may be either a scalar or a matrix.
//!
//! Dispatch on the operand kind happens here, at the call boundary, so the
//! arithmetic below it only ever sees concrete types.

use num_traits::{Float, ToPrimitive};

use crate::error::{MatrixError, Result};
use crate::math::{Matrix, Scalar};

#[derive(Clone, Debug, PartialEq)]
pub enum Operand<T: Scalar> {
    Scalar(T),
    Matrix(Matrix<T>),
}

impl<T: Scalar> Operand<T> {
    /// Short name of the operand kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Matrix(_) => "matrix",
        }
    }
}

impl<T: Scalar> From<Matrix<T>> for Operand<T> {
    fn from(m: Matrix<T>) -> Self {
        Operand::Matrix(m)
    }
}

impl<T: Scalar> Matrix<T> {
    /// `self * rhs`: scaling for a scalar, the matrix product for a matrix.
    pub fn multiply(&self, rhs: &Operand<T>) -> Result<Matrix<T>> {
        match rhs {
            Operand::Scalar(k) => Ok(self.scale(*k)),
            Operand::Matrix(m) => self.matmul(m),
        }
    }
}

impl<T: Scalar + Float> Matrix<T> {
    /// `self * rhs^-1`.
    pub fn divide(&self, rhs: &Operand<T>) -> Result<Matrix<T>> {
        match rhs {
            Operand::Scalar(k) => {
                if *k == T::zero() {
                    return Err(MatrixError::Singular);
                }
                Ok(self.scale(T::one() / *k))
            }
            Operand::Matrix(m) => self.matmul(&m.powi(-1)?),
        }
    }

    /// `self^-1 * lhs`, i.e. `lhs` divided by this matrix.
    pub fn reverse_divide(&self, lhs: &Operand<T>) -> Result<Matrix<T>> {
        let inverse = self.powi(-1)?;
        inverse.multiply(lhs)
    }

    /// Raise to an exponent given as an operand. Only integral scalars are
    /// accepted.
    pub fn power(&self, exponent: &Operand<T>) -> Result<Matrix<T>> {
        let e = match exponent {
            Operand::Scalar(e) => *e,
            Operand::Matrix(_) => {
                return Err(MatrixError::TypeMismatch(
                    "exponent must be an integer, got a matrix".to_string(),
                ))
            }
        };
        if e.fract() != T::zero() {
            return Err(MatrixError::TypeMismatch(format!(
                "exponent must be an integer, got {}",
                e
            )));
        }
        let e = e.to_i32().ok_or_else(|| {
            MatrixError::InvalidArgument(format!("exponent {} is out of range", e))
        })?;
        self.powi(e)
    }
}
