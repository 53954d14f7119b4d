//! Modified Gram-Schmidt: project and subtract one column at a time.
//!
//! Each coefficient `rᵢ = ⟨wᵢ, v⟩` is taken against the already-updated `v`,
//! which halves rounding-error growth relative to the classical variant at
//! the same cost. The loop is inherently sequential across columns.
//!
//! Works with any [`Basis`]: a dense matrix of columns or a sequence of
//! separately owned vectors give the same result.

use ndarray::{ArrayBase, ArrayView1, DataMut, Ix1};

use super::{check_shapes, normalize};
use crate::basis::Basis;
use crate::error::Result;
use crate::primitives;
use crate::scalar::Scalar;

/// Modified Gram-Schmidt with a reusable projection buffer.
#[derive(Clone, Debug)]
pub struct ModifiedGramSchmidt<T: Scalar> {
    projection: Vec<T>,
}

impl<T: Scalar> ModifiedGramSchmidt<T> {
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

    /// Projection coefficients from the last call.
    pub fn projection(&self) -> ArrayView1<'_, T> {
        ArrayView1::from(self.projection.as_slice())
    }

    /// Orthogonalize `target` against `basis` column by column and normalize
    /// it in place.
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

        for (j, rj) in self.projection.iter_mut().enumerate() {
            let w = basis.column(j);
            *rj = primitives::dot(&w, &*target);
            primitives::axpy(-*rj, &w, target);
        }

        let norm = primitives::nrm2(&*target);
        Ok(normalize("modified_gram_schmidt", target, norm))
    }
}
