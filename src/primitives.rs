//! Dense linear-algebra primitives over `ndarray` vectors.
//!
//! These are the BLAS-1/BLAS-2 building blocks the kernels are written in:
//! - **dot**: conjugated inner product
//! - **axpy**: scaled vector addition
//! - **nrm2**: overflow-safe Euclidean norm
//! - **scal** / **rscal** / **rdiv**: in-place scaling
//! - **gemv_adjoint** / **gemv_subtract**: `Wᴴx` and `y − W c` against a [`Basis`]

use ndarray::{ArrayBase, Data, DataMut, Ix1};
use num_traits::{Float, One, Zero};

use crate::basis::Basis;
use crate::scalar::Scalar;

/// Conjugated inner product `⟨x, y⟩ = Σ conj(xᵢ) yᵢ`.
///
/// Contiguous inputs go through [`Scalar::dot_slices`]; strided views fall
/// back to an iterator loop.
pub fn dot<T, S1, S2>(x: &ArrayBase<S1, Ix1>, y: &ArrayBase<S2, Ix1>) -> T
where
    T: Scalar,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
{
    assert_eq!(x.len(), y.len(), "Dimension mismatch in dot");

    match (x.as_slice(), y.as_slice()) {
        (Some(xs), Some(ys)) => T::dot_slices(xs, ys),
        _ => x
            .iter()
            .zip(y.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a.conj() * b),
    }
}

/// `y ← y + alpha·x`.
pub fn axpy<T, S1, S2>(alpha: T, x: &ArrayBase<S1, Ix1>, y: &mut ArrayBase<S2, Ix1>)
where
    T: Scalar,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    assert_eq!(x.len(), y.len(), "Dimension mismatch in axpy");
    y.zip_mut_with(x, |yi, &xi| *yi += alpha * xi);
}

/// Euclidean norm `‖x‖₂`.
///
/// Uses the scaled sum of squares (as reference BLAS `nrm2` does) so that
/// neither tiny nor huge entries underflow or overflow the intermediate sum.
/// Non-finite entries propagate.
pub fn nrm2<T, S>(x: &ArrayBase<S, Ix1>) -> T::Real
where
    T: Scalar,
    S: Data<Elem = T>,
{
    let zero = T::Real::zero();
    let one = T::Real::one();
    let mut scale = zero;
    let mut ssq = one;

    for &xi in x.iter() {
        for part in [xi.real(), xi.imag()] {
            if part == zero {
                continue;
            }
            let a = part.abs();
            if scale < a {
                let q = scale / a;
                ssq = one + ssq * q * q;
                scale = a;
            } else {
                let q = a / scale;
                ssq += q * q;
            }
        }
    }

    scale * ssq.sqrt()
}

/// `x ← alpha·x`.
pub fn scal<T, S>(alpha: T, x: &mut ArrayBase<S, Ix1>)
where
    T: Scalar,
    S: DataMut<Elem = T>,
{
    x.map_inplace(|xi| *xi *= alpha);
}

/// `x ← alpha·x` for a real factor.
pub fn rscal<T, S>(alpha: T::Real, x: &mut ArrayBase<S, Ix1>)
where
    T: Scalar,
    S: DataMut<Elem = T>,
{
    x.map_inplace(|xi| *xi = (*xi).scale_real(alpha));
}

/// `x ← x / alpha` for a real divisor.
///
/// Divides each entry rather than multiplying by `1/alpha`, whose reciprocal
/// overflows for subnormal `alpha`.
pub fn rdiv<T, S>(alpha: T::Real, x: &mut ArrayBase<S, Ix1>)
where
    T: Scalar,
    S: DataMut<Elem = T>,
{
    x.map_inplace(|xi| *xi = (*xi).div_real(alpha));
}

/// `y ← Wᴴx`: one inner product per basis column.
///
/// `y` must hold exactly `basis.num_columns()` entries.
pub fn gemv_adjoint<T, B, S1, S2>(basis: &B, x: &ArrayBase<S1, Ix1>, y: &mut ArrayBase<S2, Ix1>)
where
    T: Scalar,
    B: Basis<T> + ?Sized,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    assert_eq!(
        y.len(),
        basis.num_columns(),
        "Dimension mismatch in gemv_adjoint"
    );
    for (j, yj) in y.iter_mut().enumerate() {
        *yj = dot(&basis.column(j), x);
    }
}

/// `y ← y − W c`.
///
/// `c` must hold exactly `basis.num_columns()` coefficients.
pub fn gemv_subtract<T, B, S1, S2>(basis: &B, c: &ArrayBase<S1, Ix1>, y: &mut ArrayBase<S2, Ix1>)
where
    T: Scalar,
    B: Basis<T> + ?Sized,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = T>,
{
    assert_eq!(
        c.len(),
        basis.num_columns(),
        "Dimension mismatch in gemv_subtract"
    );
    for (j, &cj) in c.iter().enumerate() {
        axpy(-cj, &basis.column(j), y);
    }
}
