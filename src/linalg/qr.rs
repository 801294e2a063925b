use alloc::vec::Vec;
use core::cell::OnceCell;

use crate::dynmatrix::DynMatrix;
use crate::linalg::householder::{apply_left, make_reflector};
use crate::linalg::{Decomposition, DecompositionState, LinalgError, QrDecomposition};
use crate::traits::{LinalgScalar, MatrixMut};

/// QR decomposition in place using Householder reflections.
///
/// On return, `a` contains the packed factorization:
/// - upper triangle (including diagonal): R
/// - strictly lower triangle: reflector tails `u[1..]` (the leading 1 is implicit)
///
/// `gammas` receives one scale per column `0..min(m, n)`. `u` and `v` are
/// scratch; all three vectors are cleared and refilled, never shrunk.
///
/// Works on tall, square and wide matrices. The whole matrix is checked for
/// non-finite values at the end, so an `Inf` sitting in a trailing column of a
/// wide matrix is reported too.
pub fn qr_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    gammas: &mut Vec<T::Real>,
    u: &mut Vec<T>,
    v: &mut Vec<T>,
) -> Result<(), LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    gammas.clear();

    for i in 0..m.min(n) {
        u.clear();
        u.extend((i..m).map(|r| *a.get(r, i)));
        let h = make_reflector(u.as_mut_slice())?;

        apply_left(a, u, h.gamma, i, i + 1, n, v);

        *a.get_mut(i, i) = h.beta;
        for (r, &x) in (i + 1..m).zip(&u[1..]) {
            *a.get_mut(r, i) = x;
        }
        gammas.push(h.gamma);
    }

    for r in 0..m {
        if !a.row_as_slice(r, 0).iter().all(|x| x.is_finite()) {
            return Err(LinalgError::NonFinite);
        }
    }
    Ok(())
}

/// Reusable Householder QR decomposition of a dynamically-sized matrix.
///
/// `A = Q R` with `Q` orthogonal (unitary for complex `T`) and `R` upper
/// triangular. The instance keeps its working matrix and scratch vectors
/// between calls, so decomposing many matrices of similar size allocates only
/// on the first one.
///
/// # Example
///
/// ```
/// use householder::{DynMatrix, QrHouseholder};
///
/// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 1.0, 2.0, 3.0]);
/// let mut qr = QrHouseholder::new();
/// qr.decompose(&a).unwrap();
///
/// let q = qr.q().unwrap();
/// let r = qr.r().unwrap();
/// assert!(q.orthogonality_error() < 1e-12);
/// assert!((&(q * &r) - &a).frobenius_norm() < 1e-12);
/// assert!(r.is_upper_triangular(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct QrHouseholder<T: LinalgScalar> {
    qr: DynMatrix<T>,
    gammas: Vec<T::Real>,
    u: Vec<T>,
    v: Vec<T>,
    state: DecompositionState,
    q_cache: OnceCell<DynMatrix<T>>,
}

impl<T: LinalgScalar> Default for QrHouseholder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LinalgScalar> QrHouseholder<T> {
    /// Empty instance; buffers grow on the first `decompose`.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Instance with buffers preallocated for `nrows x ncols` inputs.
    pub fn with_capacity(nrows: usize, ncols: usize) -> Self {
        Self {
            qr: DynMatrix::zeros(nrows, ncols),
            gammas: Vec::with_capacity(nrows.min(ncols)),
            u: Vec::with_capacity(nrows),
            v: Vec::with_capacity(ncols),
            state: DecompositionState::Empty,
            q_cache: OnceCell::new(),
        }
    }

    /// Decompose a copy of `a`; `a` itself is left untouched.
    pub fn decompose(&mut self, a: &DynMatrix<T>) -> Result<(), LinalgError> {
        self.qr.copy_from(a);
        self.factor()
    }

    /// Decompose `a` in its own buffer, which the instance keeps.
    pub fn decompose_owned(&mut self, a: DynMatrix<T>) -> Result<(), LinalgError> {
        self.qr = a;
        self.factor()
    }

    fn factor(&mut self) -> Result<(), LinalgError> {
        self.state = DecompositionState::Failed;
        self.q_cache.take();
        qr_in_place(&mut self.qr, &mut self.gammas, &mut self.u, &mut self.v)?;
        self.state = DecompositionState::Decomposed;
        Ok(())
    }

    #[inline]
    fn check(&self) -> Result<(), LinalgError> {
        match self.state {
            DecompositionState::Decomposed => Ok(()),
            _ => Err(LinalgError::NotDecomposed),
        }
    }

    /// Where this instance is in its lifecycle.
    #[inline]
    pub fn state(&self) -> DecompositionState {
        self.state
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.qr.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.qr.ncols()
    }

    /// Apply the reflectors in reverse to the first `cols` columns of the
    /// identity. Reflector `i` only touches rows and columns from `i` on.
    fn accumulate_q(&self, cols: usize) -> DynMatrix<T> {
        let m = self.qr.nrows();
        let mut q = DynMatrix::eye_rect(m, cols);
        let mut u = Vec::with_capacity(m);
        let mut scratch = Vec::with_capacity(cols);
        for (i, &gamma) in self.gammas.iter().enumerate().rev() {
            u.clear();
            u.push(T::one());
            u.extend((i + 1..m).map(|r| self.qr[(r, i)]));
            apply_left(&mut q, &u, gamma, i, i, cols, &mut scratch);
        }
        q
    }

    /// Full `m x m` orthogonal factor.
    ///
    /// Built on first access and cached until the next `decompose`.
    pub fn q(&self) -> Result<&DynMatrix<T>, LinalgError> {
        self.check()?;
        Ok(self
            .q_cache
            .get_or_init(|| self.accumulate_q(self.qr.nrows())))
    }

    /// Thin `m x min(m, n)` factor with orthonormal columns.
    pub fn q_thin(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.check()?;
        Ok(self.accumulate_q(self.qr.nrows().min(self.qr.ncols())))
    }

    /// Full `m x n` upper-triangular factor.
    ///
    /// ```
    /// use householder::{DynMatrix, QrHouseholder};
    /// let a = DynMatrix::from_rows(3, 3, &[12.0_f64, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0]);
    /// let mut qr = QrHouseholder::new();
    /// qr.decompose(&a).unwrap();
    /// let r = qr.r().unwrap();
    /// assert!((r[(0, 0)] + 14.0).abs() < 1e-12);
    /// assert_eq!(r[(1, 0)], 0.0);
    /// ```
    pub fn r(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.upper(self.qr.nrows())
    }

    /// Thin `min(m, n) x n` upper-triangular factor.
    pub fn r_thin(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.upper(self.qr.nrows().min(self.qr.ncols()))
    }

    fn upper(&self, rows: usize) -> Result<DynMatrix<T>, LinalgError> {
        self.check()?;
        let n = self.qr.ncols();
        let mut r = DynMatrix::zeros(rows, n);
        for i in 0..rows.min(self.qr.nrows()) {
            for j in i..n {
                r[(i, j)] = self.qr[(i, j)];
            }
        }
        Ok(r)
    }

    /// Packed factorization: R on and above the diagonal, reflector tails below.
    pub fn packed(&self) -> Result<&DynMatrix<T>, LinalgError> {
        self.check()?;
        Ok(&self.qr)
    }

    /// Transpose of [`packed`](Self::packed): reflector `i` runs along row `i`.
    pub fn qt(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.check()?;
        Ok(self.qr.transpose())
    }

    /// Reflector scales, one per column `0..min(m, n)`.
    pub fn gammas(&self) -> Result<&[T::Real], LinalgError> {
        self.check()?;
        Ok(&self.gammas)
    }
}

impl<T: LinalgScalar> Decomposition<T> for QrHouseholder<T> {
    fn decompose(&mut self, a: &DynMatrix<T>) -> Result<(), LinalgError> {
        QrHouseholder::decompose(self, a)
    }

    fn decompose_owned(&mut self, a: DynMatrix<T>) -> Result<(), LinalgError> {
        QrHouseholder::decompose_owned(self, a)
    }

    fn nrows(&self) -> usize {
        QrHouseholder::nrows(self)
    }

    fn ncols(&self) -> usize {
        QrHouseholder::ncols(self)
    }
}

impl<T: LinalgScalar> QrDecomposition<T> for QrHouseholder<T> {
    fn q(&self) -> Result<DynMatrix<T>, LinalgError> {
        QrHouseholder::q(self).cloned()
    }

    fn r(&self) -> Result<DynMatrix<T>, LinalgError> {
        QrHouseholder::r(self)
    }

    fn q_thin(&self) -> Result<DynMatrix<T>, LinalgError> {
        QrHouseholder::q_thin(self)
    }

    fn r_thin(&self) -> Result<DynMatrix<T>, LinalgError> {
        QrHouseholder::r_thin(self)
    }

    fn gammas(&self) -> Result<&[T::Real], LinalgError> {
        QrHouseholder::gammas(self)
    }
}
