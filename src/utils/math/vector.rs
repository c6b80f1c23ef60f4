//! Dense vector math over `num::Float`.
//!
//! Term-weight vectors are stored densely (one slot per vocabulary token), so
//! every routine here walks both slices in lock step.

use num::Float;

/// dot積
/// d(a, b) = Σ(a_i * b_i)
///
/// The sum is accumulated left to right so the same pair of slices always
/// produces the same bits.
#[inline]
pub fn dot<N: Float>(vec: &[N], other: &[N]) -> N {
    debug_assert_eq!(
        vec.len(),
        other.len(),
        "Vectors must be of the same length to compute dot product."
    );
    vec.iter()
        .zip(other.iter())
        .fold(N::zero(), |acc, (&a, &b)| acc + a * b)
}

/// ユークリッドノルム
/// ||a|| = sqrt(Σ(a_i^2))
#[inline]
pub fn l2_norm<N: Float>(vec: &[N]) -> N {
    dot(vec, vec).sqrt()
}

/// Scale `vec` to unit length in place and return the original norm.
/// A zero vector is left untouched.
#[inline]
pub fn normalize_l2<N: Float>(vec: &mut [N]) -> N {
    let norm = l2_norm(vec);
    if norm > N::zero() {
        for v in vec.iter_mut() {
            *v = *v / norm;
        }
    }
    norm
}
