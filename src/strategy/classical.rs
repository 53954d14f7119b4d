//! Classical Gram-Schmidt: one projection, one subtraction.
//!
//! `r = Wᴴv`, `v ← v − W r`, `ρ = ‖v‖`, `v ← v/ρ`. Two matrix-vector products
//! and no correction step, so orthogonality can degrade to `κ([W v])·ε`.
//! Use it only for very well conditioned bases or when cost dominates.

use ndarray::{ArrayBase, ArrayView1, ArrayViewMut1, DataMut, Ix1};

use super::{check_shapes, normalize};
use crate::basis::Basis;
use crate::error::Result;
use crate::primitives;
use crate::scalar::Scalar;

/// Single-pass Classical Gram-Schmidt with a reusable projection buffer.
#[derive(Clone, Debug)]
pub struct ClassicalGramSchmidt<T: Scalar> {
    projection: Vec<T>,
}

impl<T: Scalar> ClassicalGramSchmidt<T> {
    /// Create with a projection buffer sized for a basis of `columns` columns.
    pub fn new(columns: usize) -> Self {
        Self {
            projection: vec![T::zero(); columns],
        }
    }

    /// Create with an empty projection buffer that can grow to `capacity`
    /// columns without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            projection: Vec::with_capacity(capacity),
        }
    }

    /// Resize the projection buffer for a basis of `columns` columns.
    pub fn resize(&mut self, columns: usize) {
        self.projection.resize(columns, T::zero());
    }

    /// Number of basis columns the buffer is sized for.
    pub fn num_columns(&self) -> usize {
        self.projection.len()
    }

    /// Projection coefficients `Wᴴv` from the last call.
    pub fn projection(&self) -> ArrayView1<'_, T> {
        ArrayView1::from(self.projection.as_slice())
    }

    /// Orthogonalize `target` against `basis` and normalize it in place.
    ///
    /// Returns the residual norm `ρ`. A zero `ρ` leaves `target` non-finite.
    pub fn orthogonalize_and_normalize<B, S>(
        &mut self,
        basis: &B,
        target: &mut ArrayBase<S, Ix1>,
    ) -> Result<T::Real>
    where
        B: Basis<T> + ?Sized,
        S: DataMut<Elem = T>,
    {
        check_shapes(basis, target.len(), &[("projection", self.projection.len())])?;

        let mut r = ArrayViewMut1::from(self.projection.as_mut_slice());
        primitives::gemv_adjoint(basis, &*target, &mut r);
        primitives::gemv_subtract(basis, &r, target);

        let norm = primitives::nrm2(&*target);
        Ok(normalize("classical_gram_schmidt", target, norm))
    }
}
