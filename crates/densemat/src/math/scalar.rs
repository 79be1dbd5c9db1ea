use std::fmt::{Debug, Display};
use std::ops::Neg;

use num_traits::{Num, NumCast};

/// Element type of a [`Matrix`](super::Matrix).
///
/// Implemented for every signed built-in integer and for `f32`/`f64`. Operations
/// that need real division (inverse, division, negative powers, rounding) are
/// only available when the scalar is also [`num_traits::Float`].
///
/// Integer arithmetic uses the primitive `+`, `-` and `*`, so overflow panics in
/// debug builds and wraps in release builds. Determinants and powers grow
/// fast: use a wider integer type (`map(|&v| v as i64)`) or `cast::<f64>()`
/// when the products may not fit.
pub trait Scalar: Num + NumCast + Neg<Output = Self> + Copy + PartialEq + Debug + Display {}

impl<T> Scalar for T where T: Num + NumCast + Neg<Output = T> + Copy + PartialEq + Debug + Display {}
