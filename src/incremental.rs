//! Incremental orthonormal basis with its triangular factor.
//!
//! Vectors are pushed one at a time. Each push orthonormalizes the new vector
//! against the committed columns in place, inside a preallocated column-major
//! matrix, so after `k` pushes
//!
//! ```text
//! [v_0 … v_{k-1}] = Q R
//! ```
//!
//! with `Q` (dim × k) orthonormal and `R` (k × k) upper triangular. This is
//! the bookkeeping an Arnoldi or block-Krylov loop needs around the kernel.

use ndarray::{s, Array2, ArrayBase, ArrayView2, Axis, Data, Ix1, ShapeBuilder};
use num_traits::{Float, ToPrimitive};

use crate::config::OrthogonalizationMethod;
use crate::diagnostics;
use crate::error::{OrthoError, Result};
use crate::scalar::Scalar;
use crate::strategy::Orthogonalizer;

/// Growing orthonormal basis of fixed dimension and capacity.
#[derive(Clone, Debug)]
pub struct IncrementalBasis<T: Scalar> {
    q: Array2<T>,
    r: Array2<T>,
    len: usize,
    strategy: Orthogonalizer<T>,
}

impl<T: Scalar> IncrementalBasis<T> {
    /// Allocate room for `capacity` vectors of length `dim`.
    pub fn new(dim: usize, capacity: usize, method: OrthogonalizationMethod) -> Self {
        Self {
            q: Array2::zeros((dim, capacity).f()),
            r: Array2::zeros((capacity, capacity)),
            len: 0,
            strategy: method.with_capacity(capacity),
        }
    }

    /// Orthonormalize `v` against the basis and append it.
    ///
    /// Returns the residual norm `ρ`, which becomes the new diagonal entry
    /// of the triangular factor. A zero, subnormal or non-finite `ρ` means
    /// `v` adds no usable direction; the column is rejected and the basis is
    /// unchanged.
    pub fn push<S>(&mut self, v: &ArrayBase<S, Ix1>) -> Result<T::Real>
    where
        S: Data<Elem = T>,
    {
        if v.len() != self.dim() {
            return Err(OrthoError::DimensionMismatch {
                expected: self.dim(),
                got: v.len(),
            });
        }
        if self.len == self.capacity() {
            return Err(OrthoError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let k = self.len;
        let (done, mut rest) = self.q.view_mut().split_at(Axis(1), k);
        let mut target = rest.column_mut(0);
        target.assign(v);

        self.strategy.resize(k);
        let rho = self.strategy.orthogonalize_and_normalize(&done, &mut target)?;

        if !rho.is_normal() {
            tracing::debug!(
                column = k,
                norm = %rho,
                method = ?self.strategy.method(),
                "rejecting linearly dependent column"
            );
            return Err(OrthoError::DegenerateResidual {
                column: k,
                norm: rho.to_f64().unwrap_or(f64::NAN),
            });
        }

        self.r
            .slice_mut(s![..k, k])
            .assign(&self.strategy.projection());
        self.r[[k, k]] = T::from_real(rho);
        self.len += 1;
        Ok(rho)
    }

    /// The committed orthonormal columns, dim × len.
    pub fn basis(&self) -> ArrayView2<'_, T> {
        self.q.slice(s![.., ..self.len])
    }

    /// Upper-triangular factor, len × len.
    pub fn r_factor(&self) -> ArrayView2<'_, T> {
        self.r.slice(s![..self.len, ..self.len])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of every basis vector.
    pub fn dim(&self) -> usize {
        self.q.nrows()
    }

    pub fn capacity(&self) -> usize {
        self.q.ncols()
    }

    /// Drop all columns, keeping the allocations.
    pub fn clear(&mut self) {
        self.len = 0;
        self.strategy.resize(0);
    }

    pub fn method(&self) -> OrthogonalizationMethod {
        self.strategy.method()
    }

    /// `‖QᴴQ − I‖_F` of the committed columns.
    pub fn orthogonality_error(&self) -> T::Real {
        diagnostics::orthogonality_error(&self.basis())
    }
}
