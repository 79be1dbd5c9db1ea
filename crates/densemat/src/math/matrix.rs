use std::borrow::Cow;
use std::cmp::Ordering;
use std::ops::Index;

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::math::Scalar;

/// Dense row-major matrix.
///
/// Logical coordinates are 1-indexed: element `(i, j)` lives at flat offset
/// `(i - 1) * cols + (j - 1)`. The stored buffer may be shorter or longer than
/// `rows * cols` right after [`Matrix::new`]; reads go through a zero-padded,
/// truncated view and [`Matrix::fill`] repairs the buffer in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "RawMatrix<T>",
    bound(deserialize = "T: Scalar + Deserialize<'de>")
)]
pub struct Matrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    #[serde(rename = "elements")]
    pub(crate) data: Vec<T>,
}

#[derive(Deserialize)]
struct RawMatrix<T> {
    rows: usize,
    cols: usize,
    elements: Vec<T>,
}

impl<T: Scalar> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self> {
        Matrix::new(raw.rows, raw.cols, raw.elements)
    }
}

impl<T: Scalar> Matrix<T> {
    /// Build a matrix from dimensions and a (possibly partial) row-major buffer.
    ///
    /// Fails when either dimension is zero. The buffer length is not checked;
    /// see [`Matrix::from_shape_vec`] for the strict form.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows < 1 || cols < 1 {
            return Err(MatrixError::InvalidShape { rows, cols });
        }
        if data.len() != rows * cols {
            log::debug!(
                "{}x{} matrix created with {} elements; reads are zero-padded until fill()",
                rows,
                cols,
                data.len()
            );
        }
        Ok(Self { rows, cols, data })
    }

    /// Strict constructor: the buffer must hold exactly `rows * cols` elements.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(MatrixError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Self::new(rows, cols, data)
    }

    /// Build a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(MatrixError::Ragged {
                    row: idx + 1,
                    len: row.len(),
                    expected: ncols,
                });
            }
            data.extend(row);
        }
        Self::new(nrows, ncols, data)
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, vec![T::zero(); rows * cols])
    }

    /// `k x k` matrix with ones on the diagonal.
    pub fn identity(k: usize) -> Result<Self> {
        let mut data = vec![T::zero(); k * k];
        for i in 0..k {
            data[i * k + i] = T::one();
        }
        Self::new(k, k, data)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of logical elements, `rows * cols`.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether the stored buffer holds exactly `rows * cols` elements.
    pub fn is_filled(&self) -> bool {
        self.data.len() == self.len()
    }

    /// The stored buffer, as-is.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize> {
        if row < 1 || row > self.rows || col < 1 || col > self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.offset(row - 1, col - 1))
    }

    /// Element at 1-indexed `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.data.get(idx).copied().unwrap_or_else(T::zero))
    }

    /// Overwrite 1-indexed `(row, col)` and return the previous value.
    ///
    /// A short buffer is zero-padded first so the write lands at its logical
    /// position.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<T> {
        let idx = self.check_bounds(row, col)?;
        if self.data.len() <= idx {
            self.fill();
        }
        Ok(std::mem::replace(&mut self.data[idx], value))
    }

    /// Repair the buffer to exactly `rows * cols` elements.
    ///
    /// Returns `0` when nothing changed, the number of zeros appended when the
    /// buffer was short, or minus the number of dropped elements when it was
    /// too long.
    pub fn fill(&mut self) -> isize {
        let len = self.len();
        let stored = self.data.len();
        match stored.cmp(&len) {
            Ordering::Equal => 0,
            Ordering::Greater => {
                self.data.truncate(len);
                -((stored - len) as isize)
            }
            Ordering::Less => {
                self.data.resize(len, T::zero());
                (len - stored) as isize
            }
        }
    }

    /// Row-major view of exactly `rows * cols` elements.
    pub(crate) fn dense(&self) -> Cow<'_, [T]> {
        let len = self.len();
        if self.data.len() >= len {
            Cow::Borrowed(&self.data[..len])
        } else {
            let mut padded = self.data.clone();
            padded.resize(len, T::zero());
            Cow::Owned(padded)
        }
    }

    /// Flat row-major export.
    pub fn to_vec(&self) -> Vec<T> {
        self.dense().into_owned()
    }

    /// Nested export, one inner vector per row.
    pub fn to_nested(&self) -> Vec<Vec<T>> {
        self.dense()
            .chunks(self.cols)
            .map(|row| row.to_vec())
            .collect()
    }

    pub(crate) fn with_data(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map<U: Scalar, F>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix::with_data(self.rows, self.cols, self.dense().iter().map(f).collect())
    }

    /// Convert every element to another scalar type.
    pub fn cast<U: Scalar>(&self) -> Result<Matrix<U>> {
        let data = self
            .dense()
            .iter()
            .map(|&v| {
                <U as NumCast>::from(v).ok_or_else(|| {
                    MatrixError::TypeMismatch(format!(
                        "{} is not representable as {}",
                        v,
                        std::any::type_name::<U>()
                    ))
                })
            })
            .collect::<Result<Vec<U>>>()?;
        Ok(Matrix::with_data(self.rows, self.cols, data))
    }
}

impl<T: Scalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.dense() == other.dense()
    }
}

/// Zero-based `(row, col)` indexing into the stored buffer. Panics when out of
/// range, like slice indexing.
///
/// The buffer must be filled: a matrix built by [`Matrix::new`] from a short
/// buffer has no stored element to borrow for the padded cells, so call
/// [`Matrix::fill`] first or read through [`Matrix::get`].
impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        let offset = row * self.cols + col;
        assert!(
            offset < self.data.len(),
            "element ({}, {}) of {}x{} matrix is not stored ({} of {} elements); call fill() first",
            row,
            col,
            self.rows,
            self.cols,
            self.data.len(),
            self.rows * self.cols
        );
        &self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let err = Matrix::<i32>::new(0, 2, vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(Matrix::<i32>::new(2, 0, vec![]).is_err());
    }

    #[test]
    fn test_from_shape_vec_checks_length() {
        let err = Matrix::from_shape_vec((2, 2), vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::BufferLength {
                rows: 2,
                cols: 2,
                len: 3
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(Matrix::<i32>::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_get_is_one_indexed_row_major() {
        let m = Matrix::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 1);
        assert_eq!(m.get(1, 3).unwrap(), 3);
        assert_eq!(m.get(2, 1).unwrap(), 4);
        assert_eq!(m.get(2, 3).unwrap(), 6);
        assert_eq!(m[(1, 2)], 6);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        for (r, c) in [(0, 1), (1, 0), (3, 1), (1, 3)] {
            assert_eq!(m.get(r, c).unwrap_err().kind(), ErrorKind::Index);
        }
    }

    #[test]
    fn test_set_returns_previous() {
        let mut m = Matrix::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.set(2, 1, 9).unwrap(), 3);
        assert_eq!(m.to_vec(), vec![1, 2, 9, 4]);
        assert!(m.set(3, 1, 0).is_err());
    }

    #[test]
    fn test_set_on_short_buffer_pads() {
        let mut m = Matrix::new(2, 2, vec![1]).unwrap();
        assert_eq!(m.set(2, 2, 7).unwrap(), 0);
        assert_eq!(m.as_slice(), &[1, 0, 0, 7]);
    }

    #[test]
    fn test_fill_deltas() {
        let mut exact = Matrix::new(1, 2, vec![1, 2]).unwrap();
        assert_eq!(exact.fill(), 0);

        let mut long = Matrix::new(1, 2, vec![1, 2, 3, 4, 5]).unwrap();
        assert_eq!(long.fill(), -3);
        assert_eq!(long.as_slice(), &[1, 2]);

        let mut short = Matrix::new(2, 2, vec![1]).unwrap();
        assert_eq!(short.fill(), 3);
        assert_eq!(short.as_slice(), &[1, 0, 0, 0]);
        assert!(short.is_filled());
    }

    #[test]
    fn test_unfilled_reads_as_filled() {
        let partial = Matrix::new(2, 2, vec![1, 2]).unwrap();
        let full = Matrix::new(2, 2, vec![1, 2, 0, 0]).unwrap();
        assert_eq!(partial, full);
        assert_eq!(partial.get(2, 2).unwrap(), 0);
        assert_eq!(partial.as_slice().len(), 2);
    }

    #[test]
    #[should_panic(expected = "call fill() first")]
    fn test_index_on_unfilled_buffer_panics() {
        let m = Matrix::new(2, 2, vec![1i32]).unwrap();
        assert_eq!(m.get(2, 2).unwrap(), 0);
        let value = m[(1, 1)];
        assert_eq!(value, 0);
    }

    #[test]
    fn test_index_agrees_with_get_after_fill() {
        let mut m = Matrix::new(2, 2, vec![1i32]).unwrap();
        assert_eq!(m.fill(), 3);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(m[(i, j)], m.get(i + 1, j + 1).unwrap());
            }
        }
        assert_eq!(m[(1, 1)], 0);
    }

    #[test]
    fn test_identity() {
        let i3 = Matrix::<i32>::identity(3).unwrap();
        assert_eq!(i3.to_vec(), vec![1, 0, 0, 0, 1, 0, 0, 0, 1]);
        let err = Matrix::<i32>::identity(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_exports() {
        let m = Matrix::new(2, 3, vec![1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(m.to_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.to_nested(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_cast_to_float() {
        let m = Matrix::new(1, 2, vec![1i64, -2]).unwrap();
        let f: Matrix<f64> = m.cast().unwrap();
        assert_eq!(f.to_vec(), vec![1.0, -2.0]);

        let big = Matrix::new(1, 1, vec![1000i32]).unwrap();
        assert_eq!(big.cast::<i8>().unwrap_err().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_serde_validates_shape() {
        let m: Matrix<f64> =
            serde_json::from_str(r#"{"rows": 1, "cols": 2, "elements": [1.0, 2.0]}"#).unwrap();
        assert_eq!(m.shape(), (1, 2));
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"elements\""));

        let bad = serde_json::from_str::<Matrix<f64>>(r#"{"rows": 0, "cols": 2, "elements": []}"#);
        assert!(bad.is_err());
    }
}
