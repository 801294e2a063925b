pub mod householder;
pub(crate) mod qr;
pub(crate) mod tridiagonal;

pub use qr::QrHouseholder;
pub use tridiagonal::{RealTridiagonal, TridiagonalHouseholder};

use alloc::boxed::Box;

use crate::dynmatrix::DynMatrix;
use crate::traits::LinalgScalar;

/// Errors from the decompositions.
///
/// Shape preconditions (a non-square matrix handed to the tridiagonal
/// reduction, mismatched operands) are not errors: they panic at the call
/// boundary, like every other dimension check in this crate.
///
/// ```
/// use householder::{DynMatrix, QrHouseholder};
/// use householder::linalg::LinalgError;
///
/// let mut qr = QrHouseholder::new();
/// let bad = DynMatrix::from_rows(2, 2, &[1.0_f64, f64::NAN, 0.0, 1.0]);
/// assert_eq!(qr.decompose(&bad), Err(LinalgError::NonFinite));
/// assert_eq!(qr.r().unwrap_err(), LinalgError::NotDecomposed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// A reflector norm, scale or pivot became NaN or infinite.
    NonFinite,
    /// Result requested before a successful `decompose`.
    NotDecomposed,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::NonFinite => write!(f, "non-finite value produced during decomposition"),
            LinalgError::NotDecomposed => write!(f, "no valid decomposition available"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Lifecycle of a reusable decomposition instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionState {
    /// Nothing decomposed yet.
    Empty,
    /// The last `decompose` succeeded; accessors are valid.
    Decomposed,
    /// The last `decompose` failed; earlier results are gone.
    Failed,
}

/// Common surface of every decomposition in this crate.
///
/// Instances are reusable: each call to [`decompose`](Self::decompose)
/// discards the previous result and reuses the internal buffers.
pub trait Decomposition<T: LinalgScalar> {
    /// Decompose a copy of `a`. The caller's matrix is never modified.
    fn decompose(&mut self, a: &DynMatrix<T>) -> Result<(), LinalgError>;

    /// Decompose `a`, taking ownership of its buffer instead of copying it.
    /// The factorization is computed in that buffer.
    fn decompose_owned(&mut self, a: DynMatrix<T>) -> Result<(), LinalgError>;

    /// Rows of the last decomposed matrix.
    fn nrows(&self) -> usize;

    /// Columns of the last decomposed matrix.
    fn ncols(&self) -> usize;
}

/// `A = Q R` with `Q` orthogonal / unitary and `R` upper triangular.
pub trait QrDecomposition<T: LinalgScalar>: Decomposition<T> {
    /// Full `m x m` orthogonal factor.
    fn q(&self) -> Result<DynMatrix<T>, LinalgError>;
    /// Full `m x n` upper-triangular factor.
    fn r(&self) -> Result<DynMatrix<T>, LinalgError>;
    /// Thin `m x min(m, n)` orthogonal factor.
    fn q_thin(&self) -> Result<DynMatrix<T>, LinalgError>;
    /// Thin `min(m, n) x n` upper-triangular factor.
    fn r_thin(&self) -> Result<DynMatrix<T>, LinalgError>;
    /// Reflector scales, one per eliminated column.
    fn gammas(&self) -> Result<&[T::Real], LinalgError>;
}

/// `A = Q T Q^H` with `T` Hermitian tridiagonal.
pub trait TridiagonalDecomposition<T: LinalgScalar>: Decomposition<T> {
    /// The tridiagonal matrix `T`.
    fn t(&self) -> Result<DynMatrix<T>, LinalgError>;
    /// The unitary similarity `Q`.
    fn q(&self) -> Result<DynMatrix<T>, LinalgError>;
    /// Packed form: `T` on the band, reflector `i` conjugated in row `i`
    /// from column `i + 2` on.
    fn qt(&self) -> Result<&DynMatrix<T>, LinalgError>;
    /// Reflector scales, one per reduction step.
    fn gammas(&self) -> Result<&[T::Real], LinalgError>;
    /// Largest relative imaginary part of the rank-2 correction `alpha`,
    /// which is real in exact arithmetic for Hermitian input.
    fn max_alpha_imag(&self) -> Result<T::Real, LinalgError>;
}

// ── Boxed trait objects ─────────────────────────────────────────────

impl<T: LinalgScalar, D: Decomposition<T> + ?Sized> Decomposition<T> for Box<D> {
    fn decompose(&mut self, a: &DynMatrix<T>) -> Result<(), LinalgError> {
        (**self).decompose(a)
    }

    fn decompose_owned(&mut self, a: DynMatrix<T>) -> Result<(), LinalgError> {
        (**self).decompose_owned(a)
    }

    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    fn ncols(&self) -> usize {
        (**self).ncols()
    }
}

impl<T: LinalgScalar, D: QrDecomposition<T> + ?Sized> QrDecomposition<T> for Box<D> {
    fn q(&self) -> Result<DynMatrix<T>, LinalgError> {
        (**self).q()
    }

    fn r(&self) -> Result<DynMatrix<T>, LinalgError> {
        (**self).r()
    }

    fn q_thin(&self) -> Result<DynMatrix<T>, LinalgError> {
        (**self).q_thin()
    }

    fn r_thin(&self) -> Result<DynMatrix<T>, LinalgError> {
        (**self).r_thin()
    }

    fn gammas(&self) -> Result<&[T::Real], LinalgError> {
        (**self).gammas()
    }
}

impl<T: LinalgScalar, D: TridiagonalDecomposition<T> + ?Sized> TridiagonalDecomposition<T>
    for Box<D>
{
    fn t(&self) -> Result<DynMatrix<T>, LinalgError> {
        (**self).t()
    }

    fn q(&self) -> Result<DynMatrix<T>, LinalgError> {
        (**self).q()
    }

    fn qt(&self) -> Result<&DynMatrix<T>, LinalgError> {
        (**self).qt()
    }

    fn gammas(&self) -> Result<&[T::Real], LinalgError> {
        (**self).gammas()
    }

    fn max_alpha_imag(&self) -> Result<T::Real, LinalgError> {
        (**self).max_alpha_imag()
    }
}
