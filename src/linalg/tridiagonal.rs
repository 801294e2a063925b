use alloc::vec::Vec;
use core::cell::OnceCell;

use num_traits::{One, Zero};

use crate::dynmatrix::DynMatrix;
use crate::linalg::householder::{apply_left, make_row_reflector};
use crate::linalg::{Decomposition, DecompositionState, LinalgError, TridiagonalDecomposition};
use crate::traits::{LinalgScalar, MatrixMut};

/// Householder tridiagonalization in place: reduce a symmetric (Hermitian)
/// matrix to tridiagonal form by unitary similarity.
///
/// Step `i` builds a reflector from the row segment `a[i, i+1..]`, which for
/// Hermitian input is the conjugate of the column below the diagonal and is
/// contiguous in row-major storage. The trailing block is updated with the
/// rank-2 form `B += w u^H + u w^H` on its upper triangle and then mirrored,
/// so it stays exactly Hermitian whatever the rounding.
///
/// On return:
/// - the band of `a` holds `T`
/// - row `i`, columns `i+2..` hold `conj(u_i[1..])`
/// - `a[i+2.., i]` is zero
/// - `gammas` has one scale per step (`n - 2` of them, none for `n < 3`)
///
/// Returns the largest relative imaginary part discarded from the
/// `alpha = -gamma/2 u^H v` correction, zero for real or exactly Hermitian
/// input.
///
/// Only the upper triangle of each trailing block feeds later steps once it
/// has been updated; non-Hermitian input gives an unspecified result.
pub fn tridiagonalize_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    gammas: &mut Vec<T::Real>,
    u: &mut Vec<T>,
    w: &mut Vec<T>,
) -> Result<T::Real, LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "tridiagonal decomposition requires a square matrix");
    gammas.clear();

    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();
    let two = one + one;
    let half = one / two;
    let mut max_alpha_imag = zero;

    for i in 0..n.saturating_sub(2) {
        let s = n - i - 1;
        u.clear();
        u.extend_from_slice(a.row_as_slice(i, i + 1));
        let h = make_row_reflector(u.as_mut_slice())?;

        if !h.is_identity() {
            let g = T::from_real(h.gamma);

            // v = -gamma B u
            w.clear();
            for r in 0..s {
                let row = &a.row_as_slice(i + 1 + r, i + 1)[..s];
                let mut acc = T::zero();
                for (&b, &uk) in row.iter().zip(u.iter()) {
                    acc = acc + b * uk;
                }
                w.push(T::zero() - g * acc);
            }

            let mut uhv = T::zero();
            for (&uk, &vk) in u.iter().zip(w.iter()) {
                uhv = uhv + uk.conj() * vk;
            }
            let alpha = T::zero() - T::from_real(half * h.gamma) * uhv;
            let alpha_mod = alpha.modulus();
            if alpha_mod > zero {
                let rel = alpha.im().modulus() / alpha_mod;
                if rel > max_alpha_imag {
                    max_alpha_imag = rel;
                }
            }
            let alpha = T::from_real(alpha.re());

            // w = v + alpha u
            for (wk, &uk) in w.iter_mut().zip(u.iter()) {
                *wk = *wk + alpha * uk;
            }

            for r in 0..s {
                let (wr, ur) = (w[r], u[r]);
                let row = &mut a.row_as_mut_slice(i + 1 + r, i + 1 + r)[..s - r];
                row[0] = row[0] + T::from_real(two * (wr * ur.conj()).re());
                for (k, x) in row.iter_mut().enumerate().skip(1) {
                    let c = r + k;
                    *x = *x + wr * u[c].conj() + ur * w[c].conj();
                }
            }
            for r in 0..s {
                for c in r + 1..s {
                    let x = *a.get(i + 1 + r, i + 1 + c);
                    *a.get_mut(i + 1 + c, i + 1 + r) = x.conj();
                }
            }
        }

        *a.get_mut(i + 1, i) = h.beta;
        *a.get_mut(i, i + 1) = h.beta.conj();
        for (x, &uk) in a.row_as_mut_slice(i, i + 2).iter_mut().zip(&u[1..]) {
            *x = uk.conj();
        }
        for r in i + 2..n {
            *a.get_mut(r, i) = T::zero();
        }
        gammas.push(h.gamma);
    }

    for r in 0..n {
        if !a.row_as_slice(r, 0).iter().all(|x| x.is_finite()) {
            return Err(LinalgError::NonFinite);
        }
    }
    Ok(max_alpha_imag)
}

/// Real symmetric form of a Hermitian tridiagonal matrix.
///
/// `T = D T_real D^H` with `D = diag(phases)`, `|phases[k]| = 1`. `T_real` has
/// `diag` on the diagonal and the non-negative `off_diag` on both off
/// diagonals.
#[derive(Debug, Clone, PartialEq)]
pub struct RealTridiagonal<T: LinalgScalar> {
    pub diag: Vec<T::Real>,
    pub off_diag: Vec<T::Real>,
    pub phases: Vec<T>,
}

impl<T: LinalgScalar> RealTridiagonal<T> {
    /// Explicit `T_real` as a matrix over the real type.
    pub fn to_matrix(&self) -> DynMatrix<T::Real> {
        let n = self.diag.len();
        let mut m = DynMatrix::zeros(n, n);
        for (k, &d) in self.diag.iter().enumerate() {
            m[(k, k)] = d;
        }
        for (k, &e) in self.off_diag.iter().enumerate() {
            m[(k + 1, k)] = e;
            m[(k, k + 1)] = e;
        }
        m
    }
}

/// Reusable Householder reduction of a symmetric / Hermitian matrix to
/// tridiagonal form, `A = Q T Q^H`.
///
/// # Example
///
/// ```
/// use householder::{DynMatrix, TridiagonalHouseholder};
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     4.0_f64, 1.0, -2.0,
///     1.0, 2.0, 0.0,
///     -2.0, 0.0, 3.0,
/// ]);
/// let mut tri = TridiagonalHouseholder::new();
/// tri.decompose(&a).unwrap();
///
/// let t = tri.t().unwrap();
/// let q = tri.q().unwrap();
/// assert!(t.is_tridiagonal(0.0));
/// assert!((&(q * &t).mul_adjoint(q) - &a).frobenius_norm() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalHouseholder<T: LinalgScalar> {
    qt: DynMatrix<T>,
    gammas: Vec<T::Real>,
    u: Vec<T>,
    w: Vec<T>,
    max_alpha_imag: T::Real,
    state: DecompositionState,
    q_cache: OnceCell<DynMatrix<T>>,
}

impl<T: LinalgScalar> Default for TridiagonalHouseholder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LinalgScalar> TridiagonalHouseholder<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Instance with buffers preallocated for `n x n` inputs.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            qt: DynMatrix::zeros(n, n),
            gammas: Vec::with_capacity(n.saturating_sub(2)),
            u: Vec::with_capacity(n),
            w: Vec::with_capacity(n),
            max_alpha_imag: <T::Real as Zero>::zero(),
            state: DecompositionState::Empty,
            q_cache: OnceCell::new(),
        }
    }

    /// Decompose a copy of `a`. Panics if `a` is not square.
    pub fn decompose(&mut self, a: &DynMatrix<T>) -> Result<(), LinalgError> {
        assert!(a.is_square(), "tridiagonal decomposition requires a square matrix");
        self.qt.copy_from(a);
        self.factor()
    }

    /// Decompose `a` in its own buffer. Panics if `a` is not square.
    pub fn decompose_owned(&mut self, a: DynMatrix<T>) -> Result<(), LinalgError> {
        assert!(a.is_square(), "tridiagonal decomposition requires a square matrix");
        self.qt = a;
        self.factor()
    }

    fn factor(&mut self) -> Result<(), LinalgError> {
        self.state = DecompositionState::Failed;
        self.q_cache.take();
        self.max_alpha_imag = <T::Real as Zero>::zero();
        self.max_alpha_imag =
            tridiagonalize_in_place(&mut self.qt, &mut self.gammas, &mut self.u, &mut self.w)?;
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

    #[inline]
    pub fn state(&self) -> DecompositionState {
        self.state
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.qt.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.qt.ncols()
    }

    /// Reflector `i` in column form, `[1, conj(qt[i, i+2..])]`.
    fn load_reflector(&self, i: usize, u: &mut Vec<T>) {
        u.clear();
        u.push(T::one());
        u.extend(self.qt.row_slice(i)[i + 2..].iter().map(|x| x.conj()));
    }

    /// Explicit tridiagonal `T` (Hermitian, complex off-diagonals allowed).
    pub fn t(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.check()?;
        let n = self.qt.nrows();
        let mut t = DynMatrix::zeros(n, n);
        for i in 0..n {
            t[(i, i)] = self.qt[(i, i)];
            if i + 1 < n {
                t[(i + 1, i)] = self.qt[(i + 1, i)];
                t[(i, i + 1)] = self.qt[(i, i + 1)];
            }
        }
        Ok(t)
    }

    /// Unitary `Q` with `A = Q T Q^H`, cached until the next `decompose`.
    pub fn q(&self) -> Result<&DynMatrix<T>, LinalgError> {
        self.check()?;
        Ok(self.q_cache.get_or_init(|| {
            let n = self.qt.nrows();
            let mut q = DynMatrix::eye(n);
            let mut u = Vec::with_capacity(n);
            let mut scratch = Vec::with_capacity(n);
            for (i, &gamma) in self.gammas.iter().enumerate().rev() {
                self.load_reflector(i, &mut u);
                apply_left(&mut q, &u, gamma, i + 1, i + 1, n, &mut scratch);
            }
            q
        }))
    }

    /// `Q^H`, accumulated front to back without forming `Q`.
    pub fn q_adjoint(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.check()?;
        let n = self.qt.nrows();
        let mut qh = DynMatrix::eye(n);
        let mut u = Vec::with_capacity(n);
        let mut scratch = Vec::with_capacity(n);
        for (i, &gamma) in self.gammas.iter().enumerate() {
            self.load_reflector(i, &mut u);
            apply_left(&mut qh, &u, gamma, i + 1, 0, n, &mut scratch);
        }
        Ok(qh)
    }

    /// Packed form: `T` on the band, reflector `i` conjugated along row `i`
    /// from column `i + 2`.
    pub fn qt(&self) -> Result<&DynMatrix<T>, LinalgError> {
        self.check()?;
        Ok(&self.qt)
    }

    pub fn gammas(&self) -> Result<&[T::Real], LinalgError> {
        self.check()?;
        Ok(&self.gammas)
    }

    /// Diagonal (real part) and sub-diagonal `T[k+1, k]`.
    pub fn diagonal(&self) -> Result<(Vec<T::Real>, Vec<T>), LinalgError> {
        self.check()?;
        let n = self.qt.nrows();
        let diag = (0..n).map(|i| self.qt[(i, i)].re()).collect();
        let sub = (0..n.saturating_sub(1)).map(|i| self.qt[(i + 1, i)]).collect();
        Ok((diag, sub))
    }

    /// Phase-normalized real form of `T`.
    ///
    /// ```
    /// use householder::{DynMatrix, TridiagonalHouseholder};
    /// let a = DynMatrix::from_rows(3, 3, &[2.0_f64, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
    /// let mut tri = TridiagonalHouseholder::new();
    /// tri.decompose(&a).unwrap();
    /// let rt = tri.real_tridiagonal().unwrap();
    /// assert_eq!(rt.off_diag, vec![1.0, 1.0]);
    /// assert_eq!(rt.phases, vec![1.0, -1.0, 1.0]);
    /// ```
    pub fn real_tridiagonal(&self) -> Result<RealTridiagonal<T>, LinalgError> {
        let (diag, sub) = self.diagonal()?;
        let mut off_diag = Vec::with_capacity(sub.len());
        let mut phases = Vec::with_capacity(diag.len());
        if !diag.is_empty() {
            phases.push(T::one());
        }
        for (k, &e) in sub.iter().enumerate() {
            let m = e.modulus();
            let phase = if m.is_zero() { T::one() } else { e / T::from_real(m) };
            phases.push(phase * phases[k]);
            off_diag.push(m);
        }
        Ok(RealTridiagonal { diag, off_diag, phases })
    }

    /// Largest relative imaginary part discarded from a rank-2 correction.
    ///
    /// Zero for real input; of the order of machine epsilon for Hermitian
    /// input. Large values mean the input was not Hermitian.
    pub fn max_alpha_imag(&self) -> Result<T::Real, LinalgError> {
        self.check()?;
        Ok(self.max_alpha_imag)
    }
}

impl<T: LinalgScalar> Decomposition<T> for TridiagonalHouseholder<T> {
    fn decompose(&mut self, a: &DynMatrix<T>) -> Result<(), LinalgError> {
        TridiagonalHouseholder::decompose(self, a)
    }

    fn decompose_owned(&mut self, a: DynMatrix<T>) -> Result<(), LinalgError> {
        TridiagonalHouseholder::decompose_owned(self, a)
    }

    fn nrows(&self) -> usize {
        TridiagonalHouseholder::nrows(self)
    }

    fn ncols(&self) -> usize {
        TridiagonalHouseholder::ncols(self)
    }
}

impl<T: LinalgScalar> TridiagonalDecomposition<T> for TridiagonalHouseholder<T> {
    fn t(&self) -> Result<DynMatrix<T>, LinalgError> {
        TridiagonalHouseholder::t(self)
    }

    fn q(&self) -> Result<DynMatrix<T>, LinalgError> {
        TridiagonalHouseholder::q(self).cloned()
    }

    fn qt(&self) -> Result<&DynMatrix<T>, LinalgError> {
        TridiagonalHouseholder::qt(self)
    }

    fn gammas(&self) -> Result<&[T::Real], LinalgError> {
        TridiagonalHouseholder::gammas(self)
    }

    fn max_alpha_imag(&self) -> Result<T::Real, LinalgError> {
        TridiagonalHouseholder::max_alpha_imag(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::householder::reflector_matrix;

    const TOL: f64 = 1e-10;

    fn check_similarity<T: LinalgScalar<Real = f64>>(a: &DynMatrix<T>) -> TridiagonalHouseholder<T> {
        let mut tri = TridiagonalHouseholder::new();
        tri.decompose(a).unwrap();
        let t = tri.t().unwrap();
        let q = tri.q().unwrap();
        assert!(t.is_tridiagonal(0.0));
        assert!(t.is_hermitian(TOL));
        assert!(q.orthogonality_error() < TOL);
        let back = (q * &t).mul_adjoint(q);
        assert!((&back - a).frobenius_norm() < TOL * a.frobenius_norm().max(1.0));
        tri
    }

    /// Apply the stored reflectors one by one as explicit `H A H`.
    fn rebuild_t<T: LinalgScalar>(tri: &TridiagonalHouseholder<T>, a: &DynMatrix<T>) -> DynMatrix<T> {
        let n = a.nrows();
        let qt = tri.qt().unwrap();
        let mut m = a.clone();
        for (i, &gamma) in tri.gammas().unwrap().iter().enumerate() {
            let mut u = alloc::vec![T::one()];
            u.extend(qt.row_slice(i)[i + 2..].iter().map(|x| x.conj()));
            let mut h = DynMatrix::eye(n);
            h.set_block(i + 1, i + 1, &reflector_matrix(&u, gamma));
            m = &(&h * &m) * &h;
        }
        m
    }

    #[test]
    fn tridiagonal_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[
            4.0, 1.0, -2.0,
            1.0, 2.0, 0.0,
            -2.0, 0.0, 3.0,
        ]);
        let tri = check_similarity(&a);
        let t = tri.t().unwrap();
        assert!((t[(1, 0)] + 5.0_f64.sqrt()).abs() < TOL);
        assert_eq!(t[(0, 0)], 4.0);
        assert!((t.trace() - 9.0).abs() < TOL);
        assert_eq!(tri.gammas().unwrap().len(), 1);
        assert!((&rebuild_t(&tri, &a) - &t).frobenius_norm() < TOL);
    }

    #[test]
    fn tridiagonal_5x5() {
        let a = DynMatrix::from_fn(5, 5, |i, j| {
            let (i, j) = (i.min(j) as f64, i.max(j) as f64);
            1.0 / (1.0 + i + 2.0 * j) - 0.1 * i
        });
        let tri = check_similarity(&a);
        assert_eq!(tri.gammas().unwrap().len(), 3);
        assert_eq!(tri.max_alpha_imag().unwrap(), 0.0);
        assert!((&rebuild_t(&tri, &a) - &tri.t().unwrap()).frobenius_norm() < TOL);

        let qh = tri.q_adjoint().unwrap();
        assert!((&qh - &tri.q().unwrap().adjoint()).frobenius_norm() < TOL);
    }

    #[test]
    fn two_by_two_is_already_tridiagonal() {
        let a = DynMatrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let tri = check_similarity(&a);
        assert_eq!(tri.t().unwrap(), a);
        assert!(tri.gammas().unwrap().is_empty());
        assert_eq!(tri.q().unwrap(), &DynMatrix::eye(2));
    }

    #[test]
    fn identity_and_zero() {
        let eye = DynMatrix::<f64>::eye(4);
        let tri = check_similarity(&eye);
        assert_eq!(tri.t().unwrap(), eye);
        assert_eq!(tri.q().unwrap(), &eye);

        let zero = DynMatrix::<f64>::zeros(4, 4);
        let tri = check_similarity(&zero);
        assert_eq!(tri.t().unwrap(), zero);
        assert_eq!(tri.q().unwrap(), &eye);
    }

    #[test]
    fn one_by_one() {
        let a = DynMatrix::from_rows(1, 1, &[7.5_f64]);
        let tri = check_similarity(&a);
        assert_eq!(tri.t().unwrap(), a);
        let rt = tri.real_tridiagonal().unwrap();
        assert_eq!(rt.diag, alloc::vec![7.5]);
        assert!(rt.off_diag.is_empty());
    }

    #[test]
    fn tridiagonal_input_unchanged() {
        let a = DynMatrix::from_rows(4, 4, &[
            1.0, 2.0, 0.0, 0.0,
            2.0, 3.0, -1.0, 0.0,
            0.0, -1.0, 4.0, 0.5,
            0.0, 0.0, 0.5, 2.0,
        ]);
        let tri = check_similarity(&a);
        assert_eq!(tri.t().unwrap(), a);
    }

    #[test]
    #[should_panic(expected = "square")]
    fn non_square_panics() {
        let mut tri = TridiagonalHouseholder::<f64>::new();
        let _ = tri.decompose(&DynMatrix::zeros(2, 3));
    }

    #[test]
    fn non_hermitian_does_not_panic() {
        let a = DynMatrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
        let mut tri = TridiagonalHouseholder::new();
        assert!(tri.decompose(&a).is_ok());
        assert!(tri.t().unwrap().is_tridiagonal(0.0));
    }

    #[test]
    fn non_finite_fails() {
        let mut tri = TridiagonalHouseholder::new();
        tri.decompose(&DynMatrix::<f64>::eye(3)).unwrap();
        let mut bad = DynMatrix::<f64>::eye(3);
        bad[(0, 2)] = f64::NAN;
        bad[(2, 0)] = f64::NAN;
        assert_eq!(tri.decompose(&bad), Err(LinalgError::NonFinite));
        assert_eq!(tri.t().unwrap_err(), LinalgError::NotDecomposed);
    }

    #[test]
    fn real_tridiagonal_negative_offdiag() {
        let a = DynMatrix::from_rows(3, 3, &[
            4.0, 1.0, -2.0,
            1.0, 2.0, 0.0,
            -2.0, 0.0, 3.0,
        ]);
        let mut tri = TridiagonalHouseholder::new();
        tri.decompose(&a).unwrap();
        let rt = tri.real_tridiagonal().unwrap();
        assert!(rt.off_diag.iter().all(|&e| e >= 0.0));

        let d = DynMatrix::from_fn(3, 3, |i, j| if i == j { rt.phases[i] } else { 0.0 });
        let t = (&d * &rt.to_matrix()).mul_adjoint(&d);
        assert!((&t - &tri.t().unwrap()).frobenius_norm() < TOL);
    }

    #[cfg(feature = "complex")]
    mod complex {
        use super::*;
        use num_complex::Complex;

        fn hermitian_4x4() -> DynMatrix<Complex<f64>> {
            let c = |re, im| Complex::new(re, im);
            DynMatrix::from_rows(4, 4, &[
                c(2.0, 0.0), c(1.0, -1.0), c(0.5, 2.0), c(0.0, 1.0),
                c(1.0, 1.0), c(-1.0, 0.0), c(3.0, 0.0), c(1.0, -0.5),
                c(0.5, -2.0), c(3.0, 0.0), c(4.0, 0.0), c(-2.0, 1.0),
                c(0.0, -1.0), c(1.0, 0.5), c(-2.0, -1.0), c(1.5, 0.0),
            ])
        }

        #[test]
        fn hermitian_similarity() {
            let a = hermitian_4x4();
            assert!(a.is_hermitian(0.0));
            let tri = check_similarity(&a);
            assert!(tri.max_alpha_imag().unwrap() < 1e-12);
            assert!((&rebuild_t(&tri, &a) - &tri.t().unwrap()).frobenius_norm() < TOL);

            let t = tri.t().unwrap();
            for i in 0..4 {
                assert_eq!(t[(i, i)].im, 0.0);
            }
        }

        #[test]
        fn real_form_reconstructs() {
            let a = hermitian_4x4();
            let mut tri = TridiagonalHouseholder::new();
            tri.decompose(&a).unwrap();
            let rt = tri.real_tridiagonal().unwrap();
            for p in &rt.phases {
                assert!((p.norm() - 1.0).abs() < TOL);
            }
            let t_real = rt.to_matrix().map(|x| Complex::new(x, 0.0));
            let d = DynMatrix::from_fn(4, 4, |i, j| {
                if i == j { rt.phases[i] } else { Complex::new(0.0, 0.0) }
            });
            let t = (&d * &t_real).mul_adjoint(&d);
            assert!((&t - &tri.t().unwrap()).frobenius_norm() < TOL);
        }
    }
}
