//! # Orthogonalize: incremental Gram-Schmidt kernels
//!
//! Given an orthonormal basis `W` (n×m) and a vector `v`, the kernels
//! overwrite `v` with a unit vector `q ⟂ span(W)` and return the coefficients
//! needed to rebuild the original:
//!
//! ```text
//! v = W r + ρ q
//! ```
//!
//! This is the inner step of Arnoldi, GMRES and block-Krylov eigensolvers.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::{array, Array2};
//! use orthogonalize::{orthogonalize_and_normalize, Orthogonalizer};
//!
//! let mut w = Array2::<f64>::zeros((3, 1));
//! w[[0, 0]] = 1.0;
//!
//! let mut v = array![2.0, 3.0, 4.0];
//! let mut dgks = Orthogonalizer::dgks(1);
//! let rho = orthogonalize_and_normalize(&w, &mut v, &mut dgks)?;
//!
//! assert_eq!(rho, 5.0);
//! assert!((&v - &array![0.0, 0.6, 0.8]).iter().all(|d| d.abs() < 1e-15));
//! assert_eq!(dgks.projection(), array![2.0]);
//! # Ok::<(), orthogonalize::OrthoError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Scalars**: `f32`, `f64`, `Complex<f32>`, `Complex<f64>`; inner products
//!   conjugate the left operand
//! - **Basis**: a dense matrix of columns or a sequence of separate vectors
//! - **Strategies**: classical, modified and DGKS Gram-Schmidt, each owning
//!   reusable scratch buffers
//! - **Incremental basis**: a growing `Q R` factorization built by repeated pushes

pub mod basis;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod incremental;
pub mod primitives;
pub mod scalar;
pub mod strategy;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use basis::Basis;
pub use config::OrthogonalizationMethod;
pub use diagnostics::{orthogonality_error, reconstruction_residual};
pub use error::{OrthoError, Result};
pub use incremental::IncrementalBasis;
pub use scalar::Scalar;
pub use strategy::{ClassicalGramSchmidt, Dgks, ModifiedGramSchmidt, Orthogonalizer, DEFAULT_STEPS};

use ndarray::{ArrayBase, DataMut, Ix1};

/// Orthogonalize `target` against `basis` and normalize it in place.
///
/// On return `target` holds `q`, `strategy.projection()` holds `r = Wᴴv`
/// and the returned value is `ρ`, with `v = W r + ρ q`. The basis columns
/// must be orthonormal and the strategy's buffers sized for
/// `basis.num_columns()` (see [`Orthogonalizer::resize`]).
///
/// If `v` lies in `span(W)` then `ρ` is zero and `target` becomes
/// non-finite; callers decide whether that is a breakdown.
///
/// # Errors
/// [`OrthoError::DimensionMismatch`], [`OrthoError::RaggedBasis`] or
/// [`OrthoError::BufferMismatch`] when shapes disagree. Nothing is modified
/// in that case.
pub fn orthogonalize_and_normalize<T, B, S>(
    basis: &B,
    target: &mut ArrayBase<S, Ix1>,
    strategy: &mut Orthogonalizer<T>,
) -> Result<T::Real>
where
    T: Scalar,
    B: Basis<T> + ?Sized,
    S: DataMut<Elem = T>,
{
    strategy.orthogonalize_and_normalize(basis, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};
    use num_complex::Complex64;

    #[test]
    fn test_free_function_matches_strategy() {
        let w = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];
        let mut v = array![1.0, 2.0, 2.0];
        let mut s = Orthogonalizer::modified(2);
        let rho = orthogonalize_and_normalize(w.as_slice(), &mut v, &mut s).unwrap();
        assert_eq!(rho, 2.0);
        assert_eq!(v, array![0.0, 0.0, 1.0]);
        assert_eq!(s.projection(), array![1.0, 2.0]);
    }

    #[test]
    fn test_empty_basis_normalizes() {
        let w: Vec<Array1<Complex64>> = Vec::new();
        let mut v = array![Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)];
        let mut s = Orthogonalizer::classical(0);
        let rho = orthogonalize_and_normalize(&w, &mut v, &mut s).unwrap();
        assert_eq!(rho, 5.0);
        assert_eq!(v[1], Complex64::new(0.0, 0.8));
        assert!(s.projection().is_empty());
    }

    #[test]
    fn test_works_on_column_view() {
        let mut m = ndarray::Array2::<f64>::zeros((3, 2));
        m[[0, 0]] = 1.0;
        m[[0, 1]] = 5.0;
        m[[2, 1]] = 2.0;
        let (w, mut rest) = m.view_mut().split_at(ndarray::Axis(1), 1);
        let mut target = rest.column_mut(0);
        let mut s = Orthogonalizer::dgks(1);
        let rho = orthogonalize_and_normalize(&w, &mut target, &mut s).unwrap();
        assert_eq!(rho, 2.0);
        assert_eq!(m.column(1), array![0.0, 0.0, 1.0]);
    }
}
