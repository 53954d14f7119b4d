//! Accuracy measures for orthonormal bases and their updates.

use ndarray::{Array1, ArrayBase, Data, Ix1};
use num_traits::{Float, Zero};

use crate::basis::{check_basis, Basis};
use crate::error::{OrthoError, Result};
use crate::primitives;
use crate::scalar::Scalar;

/// Loss of orthogonality `‖WᴴW − I‖_F`.
///
/// Zero for an exactly orthonormal basis; grows like `κ·ε` for Modified
/// Gram-Schmidt and stays near `ε` for DGKS.
pub fn orthogonality_error<T, B>(basis: &B) -> T::Real
where
    T: Scalar,
    B: Basis<T> + ?Sized,
{
    let m = basis.num_columns();
    let mut sum = T::Real::zero();
    for i in 0..m {
        let wi = basis.column(i);
        for j in 0..m {
            let mut g = primitives::dot(&wi, &basis.column(j));
            if i == j {
                g -= T::one();
            }
            sum += g.abs_sqr();
        }
    }
    sum.sqrt()
}

/// Reconstruction residual `‖W r + ρ q − v‖` of one orthogonalization.
///
/// `projection` and `norm` are what the kernel produced for the original
/// vector `original`, and `normalized` is the overwritten target.
pub fn reconstruction_residual<T, B, S1, S2, S3>(
    basis: &B,
    projection: &ArrayBase<S1, Ix1>,
    norm: T::Real,
    normalized: &ArrayBase<S2, Ix1>,
    original: &ArrayBase<S3, Ix1>,
) -> Result<T::Real>
where
    T: Scalar,
    B: Basis<T> + ?Sized,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    S3: Data<Elem = T>,
{
    let n = original.len();
    if normalized.len() != n {
        return Err(OrthoError::DimensionMismatch {
            expected: n,
            got: normalized.len(),
        });
    }
    check_basis(basis, n)?;
    if projection.len() != basis.num_columns() {
        return Err(OrthoError::BufferMismatch {
            buffer: "projection",
            expected: basis.num_columns(),
            got: projection.len(),
        });
    }

    // diff = ρ q − v + W r
    let mut diff: Array1<T> = normalized.mapv(|x| x.scale_real(norm));
    primitives::axpy(-T::one(), original, &mut diff);
    primitives::gemv_subtract(basis, &projection.mapv(|c| -c), &mut diff);
    Ok(primitives::nrm2(&diff))
}
