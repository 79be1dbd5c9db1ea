//! The dense matrix type and everything it can do.
//!
//! `Matrix` lives in `matrix.rs` with construction, access and export. The
//! remaining modules add inherent impls by concern: elementwise arithmetic and
//! the product, determinant-based linear algebra, shape transforms and
//! rounding, operand dispatch, and the textual dump.
mod arithmetic;
mod format;
mod linalg;
pub mod matrix;
pub mod operand;
mod scalar;
pub mod transform;

pub use matrix::Matrix;
pub use operand::Operand;
pub use scalar::Scalar;
pub use transform::Axis;
