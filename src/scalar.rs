//! Element types for the orthogonalization kernels.
//!
//! Real (`f32`, `f64`) and complex (`Complex32`, `Complex64`) scalars share one
//! trait so every kernel is written once. Inner products conjugate the left
//! operand: "orthogonal" means `⟨x, y⟩ = Σ conj(xᵢ) yᵢ = 0`.

use std::fmt::{Debug, Display};
use std::ops::Neg;

use num_complex::Complex;
use num_traits::{Float, FloatConst, NumAssign, Zero};

/// A real or complex floating-point element.
pub trait Scalar: NumAssign + Neg<Output = Self> + Copy + Debug + Send + Sync + 'static {
    /// Underlying real type (`Self` for real scalars).
    type Real: Scalar<Real = Self::Real> + Float + FloatConst + Display;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn real(self) -> Self::Real;

    /// Imaginary part (zero for reals).
    fn imag(self) -> Self::Real;

    /// Embed a real value.
    fn from_real(re: Self::Real) -> Self;

    /// Squared modulus `|x|²`.
    fn abs_sqr(self) -> Self::Real {
        let (re, im) = (self.real(), self.imag());
        re * re + im * im
    }

    /// Multiply by a real factor.
    fn scale_real(self, k: Self::Real) -> Self;

    /// Divide by a real factor.
    fn div_real(self, k: Self::Real) -> Self;

    /// Conjugated dot product of two contiguous slices of equal length.
    ///
    /// Overridden for real types when the `simd` feature is enabled.
    fn dot_slices(x: &[Self], y: &[Self]) -> Self {
        portable_dot(x, y)
    }
}

#[inline]
fn portable_dot<T: Scalar>(x: &[T], y: &[T]) -> T {
    x.iter()
        .zip(y.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc + a.conj() * b)
}

macro_rules! impl_real_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            type Real = $t;

            #[inline]
            fn conj(self) -> Self {
                self
            }

            #[inline]
            fn real(self) -> Self::Real {
                self
            }

            #[inline]
            fn imag(self) -> Self::Real {
                <$t>::zero()
            }

            #[inline]
            fn from_real(re: Self::Real) -> Self {
                re
            }

            #[inline]
            fn abs_sqr(self) -> Self::Real {
                self * self
            }

            #[inline]
            fn scale_real(self, k: Self::Real) -> Self {
                self * k
            }

            #[inline]
            fn div_real(self, k: Self::Real) -> Self {
                self / k
            }

            #[cfg(feature = "simd")]
            fn dot_slices(x: &[Self], y: &[Self]) -> Self {
                use simsimd::SpatialSimilarity;
                match <$t as SpatialSimilarity>::dot(x, y) {
                    Some(d) => d as $t,
                    None => portable_dot(x, y),
                }
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty) => {
        impl Scalar for Complex<$t> {
            type Real = $t;

            #[inline]
            fn conj(self) -> Self {
                Complex::new(self.re, -self.im)
            }

            #[inline]
            fn real(self) -> Self::Real {
                self.re
            }

            #[inline]
            fn imag(self) -> Self::Real {
                self.im
            }

            #[inline]
            fn from_real(re: Self::Real) -> Self {
                Complex::new(re, <$t>::zero())
            }

            #[inline]
            fn abs_sqr(self) -> Self::Real {
                self.norm_sqr()
            }

            #[inline]
            fn scale_real(self, k: Self::Real) -> Self {
                Complex::new(self.re * k, self.im * k)
            }

            #[inline]
            fn div_real(self, k: Self::Real) -> Self {
                Complex::new(self.re / k, self.im / k)
            }
        }
    };
}

impl_real_scalar!(f32);
impl_real_scalar!(f64);
impl_complex_scalar!(f32);
impl_complex_scalar!(f64);
