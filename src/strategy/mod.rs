//! Orthogonalization strategies.
//!
//! Three interchangeable algorithms share one contract: given an orthonormal
//! basis `W` and a vector `v`, overwrite `v` with a unit vector `q ⟂ W`, store
//! `r = Wᴴv` in the strategy's projection buffer and return `ρ` such that
//! `v = W r + ρ q`.
//!
//! - [`ClassicalGramSchmidt`]: cheapest, least stable.
//! - [`ModifiedGramSchmidt`]: column-sequential, about twice as stable.
//! - [`Dgks`]: classical Gram-Schmidt repeated while the DGKS criterion asks
//!   for it; orthogonal to working precision.
//!
//! Each strategy owns its scratch buffers so they are reused across calls as
//! a basis grows. Calls take `&mut self`, so one strategy value serves one
//! call at a time.

pub mod classical;
pub mod dgks;
pub mod modified;

pub use classical::ClassicalGramSchmidt;
pub use dgks::{Dgks, DEFAULT_STEPS};
pub use modified::ModifiedGramSchmidt;

use ndarray::{ArrayBase, ArrayView1, DataMut, Ix1};
use num_traits::Float;

use crate::basis::{check_basis, Basis};
use crate::config::OrthogonalizationMethod;
use crate::error::{OrthoError, Result};
use crate::primitives;
use crate::scalar::Scalar;

/// One of the three orthogonalization algorithms, with its scratch state.
#[derive(Clone, Debug)]
pub enum Orthogonalizer<T: Scalar> {
    ClassicalGramSchmidt(ClassicalGramSchmidt<T>),
    ModifiedGramSchmidt(ModifiedGramSchmidt<T>),
    Dgks(Dgks<T>),
}

impl<T: Scalar> Orthogonalizer<T> {
    /// Classical Gram-Schmidt sized for `columns` basis columns.
    pub fn classical(columns: usize) -> Self {
        Self::ClassicalGramSchmidt(ClassicalGramSchmidt::new(columns))
    }

    /// Modified Gram-Schmidt sized for `columns` basis columns.
    pub fn modified(columns: usize) -> Self {
        Self::ModifiedGramSchmidt(ModifiedGramSchmidt::new(columns))
    }

    /// DGKS with the default two sweeps, sized for `columns` basis columns.
    pub fn dgks(columns: usize) -> Self {
        Self::Dgks(Dgks::new(columns))
    }

    /// DGKS with at most `steps` sweeps, sized for `columns` basis columns.
    pub fn dgks_with_steps(columns: usize, steps: usize) -> Self {
        Self::Dgks(Dgks::with_steps(columns, steps))
    }

    /// The method this strategy implements.
    pub fn method(&self) -> OrthogonalizationMethod {
        match self {
            Self::ClassicalGramSchmidt(_) => OrthogonalizationMethod::ClassicalGramSchmidt,
            Self::ModifiedGramSchmidt(_) => OrthogonalizationMethod::ModifiedGramSchmidt,
            Self::Dgks(d) => OrthogonalizationMethod::Dgks { steps: d.steps() },
        }
    }

    /// Resize the scratch buffers for a basis of `columns` columns.
    pub fn resize(&mut self, columns: usize) {
        match self {
            Self::ClassicalGramSchmidt(s) => s.resize(columns),
            Self::ModifiedGramSchmidt(s) => s.resize(columns),
            Self::Dgks(s) => s.resize(columns),
        }
    }

    /// Number of basis columns the buffers are sized for.
    pub fn num_columns(&self) -> usize {
        match self {
            Self::ClassicalGramSchmidt(s) => s.num_columns(),
            Self::ModifiedGramSchmidt(s) => s.num_columns(),
            Self::Dgks(s) => s.num_columns(),
        }
    }

    /// Projection coefficients from the last call.
    pub fn projection(&self) -> ArrayView1<'_, T> {
        match self {
            Self::ClassicalGramSchmidt(s) => s.projection(),
            Self::ModifiedGramSchmidt(s) => s.projection(),
            Self::Dgks(s) => s.projection(),
        }
    }

    /// Orthogonalize `target` against `basis` and normalize it in place.
    ///
    /// See [`orthogonalize_and_normalize`](crate::orthogonalize_and_normalize).
    pub fn orthogonalize_and_normalize<B, S>(
        &mut self,
        basis: &B,
        target: &mut ArrayBase<S, Ix1>,
    ) -> Result<T::Real>
    where
        B: Basis<T> + ?Sized,
        S: DataMut<Elem = T>,
    {
        match self {
            Self::ClassicalGramSchmidt(s) => s.orthogonalize_and_normalize(basis, target),
            Self::ModifiedGramSchmidt(s) => s.orthogonalize_and_normalize(basis, target),
            Self::Dgks(s) => s.orthogonalize_and_normalize(basis, target),
        }
    }
}

impl<T: Scalar> From<ClassicalGramSchmidt<T>> for Orthogonalizer<T> {
    fn from(s: ClassicalGramSchmidt<T>) -> Self {
        Self::ClassicalGramSchmidt(s)
    }
}

impl<T: Scalar> From<ModifiedGramSchmidt<T>> for Orthogonalizer<T> {
    fn from(s: ModifiedGramSchmidt<T>) -> Self {
        Self::ModifiedGramSchmidt(s)
    }
}

impl<T: Scalar> From<Dgks<T>> for Orthogonalizer<T> {
    fn from(s: Dgks<T>) -> Self {
        Self::Dgks(s)
    }
}

/// Validate basis, target and buffer shapes before any mutation.
pub(crate) fn check_shapes<T, B>(
    basis: &B,
    target_len: usize,
    buffers: &[(&'static str, usize)],
) -> Result<()>
where
    T: Scalar,
    B: Basis<T> + ?Sized,
{
    check_basis(basis, target_len)?;
    let columns = basis.num_columns();
    for &(buffer, len) in buffers {
        if len != columns {
            return Err(OrthoError::BufferMismatch {
                buffer,
                expected: columns,
                got: len,
            });
        }
    }
    Ok(())
}

/// Divide `target` by `norm` and hand `norm` back.
///
/// A zero or non-finite norm is not masked: the division propagates
/// infinities or NaNs into `target`. A subnormal norm still divides cleanly
/// but is reported alongside them.
pub(crate) fn normalize<T, S>(
    strategy: &'static str,
    target: &mut ArrayBase<S, Ix1>,
    norm: T::Real,
) -> T::Real
where
    T: Scalar,
    S: DataMut<Elem = T>,
{
    if !norm.is_normal() {
        tracing::debug!(
            strategy,
            norm = %norm,
            len = target.len(),
            "residual norm is zero, subnormal or not finite"
        );
    }
    primitives::rdiv(norm, target);
    norm
}
