//! densemat: small dense matrices with textbook linear algebra.
//!
//! The crate provides a row-major `Matrix<T>` over signed integers and floats
//! with elementwise arithmetic, the matrix product, determinants by cofactor
//! expansion, minors, cofactors, adjugates and inverses, integer powers by
//! repeated squaring, and a few shape transforms.
//!
//! Everything is exact-definition linear algebra meant for small matrices;
//! there is no pivoting or decomposition.
pub mod config;
pub mod error;
pub mod math;

pub use config::{FormatConfig, RoundingMode};
pub use error::{ErrorKind, MatrixError, Result};
pub use math::{Axis, Matrix, Operand, Scalar};
