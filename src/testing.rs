//! Seeded inputs shared by the unit tests.

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex;
use num_traits::One;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::primitives;
use crate::scalar::Scalar;

/// Scalars that can be drawn uniformly from the unit box.
pub(crate) trait RandomScalar: Scalar {
    fn sample(rng: &mut ChaCha8Rng) -> Self;
}

impl RandomScalar for f64 {
    fn sample(rng: &mut ChaCha8Rng) -> Self {
        rng.gen_range(-1.0..1.0)
    }
}

impl RandomScalar for f32 {
    fn sample(rng: &mut ChaCha8Rng) -> Self {
        rng.gen_range(-1.0f32..1.0f32)
    }
}

impl RandomScalar for Complex<f64> {
    fn sample(rng: &mut ChaCha8Rng) -> Self {
        Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    }
}

impl RandomScalar for Complex<f32> {
    fn sample(rng: &mut ChaCha8Rng) -> Self {
        Complex::new(rng.gen_range(-1.0f32..1.0f32), rng.gen_range(-1.0f32..1.0f32))
    }
}

pub(crate) fn random_vector<T: RandomScalar>(n: usize, seed: u64) -> Array1<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Array1::from_shape_fn(n, |_| T::sample(&mut rng))
}

/// Random n×m matrix with orthonormal columns (row-major, so columns are strided).
///
/// Built with two Modified Gram-Schmidt passes per column.
pub(crate) fn random_orthonormal_basis<T: RandomScalar>(
    n: usize,
    m: usize,
    seed: u64,
) -> Array2<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut w = Array2::from_shape_fn((n, m), |_| T::sample(&mut rng));

    for j in 0..m {
        let (done, mut rest) = w.view_mut().split_at(Axis(1), j);
        let mut col = rest.column_mut(0);
        for _ in 0..2 {
            for k in 0..j {
                let q = done.column(k);
                let c = primitives::dot(&q, &col);
                primitives::axpy(-c, &q, &mut col);
            }
        }
        let norm = primitives::nrm2(&col);
        primitives::rscal(T::Real::one() / norm, &mut col);
    }

    w
}

/// Leading n×m block of the Hilbert matrix, `H[i, j] = 1 / (i + j + 1)`.
pub(crate) fn hilbert(n: usize, m: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, m), |(i, j)| 1.0 / (i + j + 1) as f64)
}
