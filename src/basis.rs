//! Basis shapes accepted by the kernels.
//!
//! A basis is read column by column, so anything that can hand out a column
//! view works:
//! - a dense `ndarray` matrix whose columns are the basis vectors (any layout);
//! - an ordered sequence of individually owned vectors, for callers that do
//!   not store the basis contiguously.

use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix2};

use crate::error::{OrthoError, Result};
use crate::scalar::Scalar;

/// An ordered set of basis columns.
pub trait Basis<T: Scalar> {
    /// Column length, when known without inspecting a column.
    ///
    /// `None` for an empty sequence of vectors.
    fn column_len(&self) -> Option<usize>;

    /// Number of columns.
    fn num_columns(&self) -> usize;

    /// View of column `j`.
    ///
    /// # Panics
    /// Panics if `j >= self.num_columns()`.
    fn column(&self, j: usize) -> ArrayView1<'_, T>;
}

impl<T, S> Basis<T> for ArrayBase<S, Ix2>
where
    T: Scalar,
    S: Data<Elem = T>,
{
    fn column_len(&self) -> Option<usize> {
        Some(self.len_of(Axis(0)))
    }

    fn num_columns(&self) -> usize {
        self.len_of(Axis(1))
    }

    fn column(&self, j: usize) -> ArrayView1<'_, T> {
        self.index_axis(Axis(1), j)
    }
}

impl<T: Scalar> Basis<T> for [Array1<T>] {
    fn column_len(&self) -> Option<usize> {
        self.first().map(|c| c.len())
    }

    fn num_columns(&self) -> usize {
        self.len()
    }

    fn column(&self, j: usize) -> ArrayView1<'_, T> {
        self[j].view()
    }
}

impl<T: Scalar> Basis<T> for [Vec<T>] {
    fn column_len(&self) -> Option<usize> {
        self.first().map(|c| c.len())
    }

    fn num_columns(&self) -> usize {
        self.len()
    }

    fn column(&self, j: usize) -> ArrayView1<'_, T> {
        ArrayView1::from(self[j].as_slice())
    }
}

impl<T: Scalar> Basis<T> for Vec<Array1<T>> {
    fn column_len(&self) -> Option<usize> {
        self.as_slice().column_len()
    }

    fn num_columns(&self) -> usize {
        self.len()
    }

    fn column(&self, j: usize) -> ArrayView1<'_, T> {
        self[j].view()
    }
}

impl<T: Scalar> Basis<T> for Vec<Vec<T>> {
    fn column_len(&self) -> Option<usize> {
        self.as_slice().column_len()
    }

    fn num_columns(&self) -> usize {
        self.len()
    }

    fn column(&self, j: usize) -> ArrayView1<'_, T> {
        ArrayView1::from(self[j].as_slice())
    }
}

/// Check that every column of `basis` has length `n`.
///
/// Runs in O(m); no column data is read.
pub(crate) fn check_basis<T, B>(basis: &B, n: usize) -> Result<()>
where
    T: Scalar,
    B: Basis<T> + ?Sized,
{
    if let Some(rows) = basis.column_len() {
        if rows != n {
            return Err(OrthoError::DimensionMismatch {
                expected: rows,
                got: n,
            });
        }
    }
    for j in 0..basis.num_columns() {
        let len = basis.column(j).len();
        if len != n {
            return Err(OrthoError::RaggedBasis {
                column: j,
                expected: n,
                got: len,
            });
        }
    }
    Ok(())
}
