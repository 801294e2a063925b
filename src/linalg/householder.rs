//! Householder reflector construction and application.
//!
//! A reflector is `H = I - gamma * u * u^H` with `u[0] = 1` and real `gamma`,
//! so `H` is both Hermitian and unitary. The same `H` is used on the left and
//! on the right, which is what lets the tridiagonal reduction keep its trailing
//! block exactly Hermitian.

use alloc::vec::Vec;

use num_traits::{One, Zero};

use crate::dynmatrix::DynMatrix;
use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, MatrixMut};

/// Result of building a reflector: the value left in the pivot position and
/// the scale of `H = I - gamma * u * u^H`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflector<T: LinalgScalar> {
    /// `H x = beta * e_0`.
    pub beta: T,
    /// Zero when the segment was already eliminated and `H = I`.
    pub gamma: T::Real,
}

impl<T: LinalgScalar> Reflector<T> {
    /// `true` when this reflector acts as the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.gamma.is_zero()
    }
}

/// Build the reflector that maps `x` onto a multiple of `e_0`.
///
/// On return `x[0] = 1` and `x[1..]` holds the rest of `u`. The pivot value is
/// `beta = -phase(x[0]) * ||x||` (the sign opposite to `x[0]` for reals), so
/// `u[0] = x[0] - beta` never suffers cancellation, and
/// `gamma = (|x[0]| + ||x||) / ||x||`.
///
/// If everything below the pivot is exactly zero the segment is already
/// eliminated: `gamma = 0`, `beta = x[0]` and `H = I`. This keeps identity and
/// triangular inputs unchanged rather than flipping their signs.
///
/// ```
/// use householder::linalg::householder::make_reflector;
///
/// let mut x = [3.0_f64, 4.0];
/// let h = make_reflector(&mut x).unwrap();
/// assert!((h.beta + 5.0).abs() < 1e-12);
/// assert!((h.gamma - 1.6).abs() < 1e-12);
/// assert_eq!(x[0], 1.0);
/// assert!((x[1] - 0.5).abs() < 1e-12);
/// ```
pub fn make_reflector<T: LinalgScalar>(x: &mut [T]) -> Result<Reflector<T>, LinalgError> {
    assert!(!x.is_empty(), "reflector segment must not be empty");
    let x0 = x[0];
    if !x0.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    let mut scale = x0.modulus();
    let mut tail_is_zero = true;
    for &v in &x[1..] {
        if !v.is_finite() {
            return Err(LinalgError::NonFinite);
        }
        if v != T::zero() {
            tail_is_zero = false;
            let m = v.modulus();
            if m > scale {
                scale = m;
            }
        }
    }

    if tail_is_zero {
        x[0] = T::one();
        return Ok(Reflector {
            beta: x0,
            gamma: <T::Real as Zero>::zero(),
        });
    }

    // Scaled sum of squares: no overflow for huge entries, no underflow to
    // zero for tiny ones.
    let inv_scale = <T::Real as One>::one() / scale;
    let mut sum_sq = <T::Real as Zero>::zero();
    for &v in x.iter() {
        let s = v.modulus() * inv_scale;
        sum_sq = sum_sq + s * s;
    }
    let norm = scale * sum_sq.lsqrt();

    let abs_x0 = x0.modulus();
    let phase = if abs_x0.is_zero() {
        T::one()
    } else {
        x0 / T::from_real(abs_x0)
    };
    let beta = T::zero() - phase * T::from_real(norm);
    let u0 = x0 - beta;
    let gamma = (abs_x0 + norm) / norm;

    if !LinalgScalar::is_finite(norm) || !LinalgScalar::is_finite(gamma) || !u0.is_finite() {
        return Err(LinalgError::NonFinite);
    }

    for v in x[1..].iter_mut() {
        *v = *v / u0;
    }
    x[0] = T::one();

    Ok(Reflector { beta, gamma })
}

/// Build a reflector for a Hermitian matrix from one of its rows.
///
/// Row `i` of a Hermitian matrix holds the conjugate of column `i`. The slice
/// is conjugated in place into that column, and the reflector is built from
/// it exactly as [`make_reflector`] does, so on return `row` holds the
/// column-form `u`. Storing the reflector back into the row means storing
/// `conj(u)`.
pub fn make_row_reflector<T: LinalgScalar>(row: &mut [T]) -> Result<Reflector<T>, LinalgError> {
    for v in row.iter_mut() {
        *v = v.conj();
    }
    make_reflector(row)
}

/// Left application `A[row0.., col0..col1] = H * A[row0.., col0..col1]`.
///
/// The rows touched are `row0..row0 + u.len()`. Rank-1 update:
/// `s = gamma * u^H A`, then `A -= u * s`. `scratch` receives `s`; it is
/// resized in place, so a buffer reused across calls stops allocating once it
/// has reached the widest block.
pub fn apply_left<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    u: &[T],
    gamma: T::Real,
    row0: usize,
    col0: usize,
    col1: usize,
    scratch: &mut Vec<T>,
) {
    if gamma.is_zero() || col1 <= col0 {
        return;
    }
    let width = col1 - col0;
    debug_assert!(row0 + u.len() <= a.nrows() && col1 <= a.ncols());

    scratch.clear();
    scratch.resize(width, T::zero());
    for (k, &uk) in u.iter().enumerate() {
        let uk = uk.conj();
        let row = &a.row_as_slice(row0 + k, col0)[..width];
        for (s, &x) in scratch.iter_mut().zip(row) {
            *s = *s + uk * x;
        }
    }

    let g = T::from_real(gamma);
    for s in scratch.iter_mut() {
        *s = *s * g;
    }

    for (k, &uk) in u.iter().enumerate() {
        let row = &mut a.row_as_mut_slice(row0 + k, col0)[..width];
        for (x, &s) in row.iter_mut().zip(scratch.iter()) {
            *x = *x - uk * s;
        }
    }
}

/// Right application `A[row0..row1, col0..] = A[row0..row1, col0..] * H`.
///
/// The columns touched are `col0..col0 + u.len()`. Each row is contiguous, so
/// `A u` is formed one row at a time and needs no scratch.
pub fn apply_right<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    u: &[T],
    gamma: T::Real,
    col0: usize,
    row0: usize,
    row1: usize,
) {
    if gamma.is_zero() {
        return;
    }
    debug_assert!(col0 + u.len() <= a.ncols() && row1 <= a.nrows());
    let g = T::from_real(gamma);
    for r in row0..row1 {
        let row = &mut a.row_as_mut_slice(r, col0)[..u.len()];
        let mut s = T::zero();
        for (&x, &uk) in row.iter().zip(u) {
            s = s + x * uk;
        }
        s = s * g;
        for (x, &uk) in row.iter_mut().zip(u) {
            *x = *x - s * uk.conj();
        }
    }
}

/// Explicit `I - gamma * u * u^H`.
///
/// Only needed to check the packed form; the decompositions never build it.
pub fn reflector_matrix<T: LinalgScalar>(u: &[T], gamma: T::Real) -> DynMatrix<T> {
    let n = u.len();
    let g = T::from_real(gamma);
    DynMatrix::from_fn(n, n, |i, j| {
        let id = if i == j { T::one() } else { T::zero() };
        id - g * u[i] * u[j].conj()
    })
}
