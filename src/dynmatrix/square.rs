use crate::traits::LinalgScalar;

use super::DynMatrix;

// ── Structural predicates ───────────────────────────────────────────
//
// All take an absolute tolerance on element moduli so they can be used
// directly as post-hoc checks on decomposition output.

impl<T: LinalgScalar> DynMatrix<T> {
    /// Check `|a[i][j] - conj(a[j][i])| <= tol` for all pairs.
    ///
    /// ```
    /// use householder::DynMatrix;
    /// let sym = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_hermitian(0.0));
    /// ```
    pub fn is_hermitian(&self, tol: T::Real) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in i..n {
                if (self[(i, j)] - self[(j, i)].conj()).modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Check that everything below the main diagonal is within `tol` of zero.
    pub fn is_upper_triangular(&self, tol: T::Real) -> bool {
        for i in 1..self.nrows {
            for j in 0..i.min(self.ncols) {
                if self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Check that a square matrix only has entries on the main diagonal and
    /// its two neighbours.
    ///
    /// ```
    /// use householder::DynMatrix;
    /// let t = DynMatrix::from_rows(3, 3, &[
    ///     2.0_f64, 1.0, 0.0,
    ///     1.0, 2.0, 1.0,
    ///     0.0, 1.0, 2.0,
    /// ]);
    /// assert!(t.is_tridiagonal(0.0));
    /// ```
    pub fn is_tridiagonal(&self, tol: T::Real) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in 0..n {
                if (i as isize - j as isize).abs() > 1 && self[(i, j)].modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Check `|a - I| <= tol` element-wise (rectangular identity allowed).
    pub fn is_identity(&self, tol: T::Real) -> bool {
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                let expected = if i == j { T::one() } else { T::zero() };
                if (self[(i, j)] - expected).modulus() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Main diagonal as a `Vec`.
    pub fn diagonal(&self) -> alloc::vec::Vec<T> {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> T {
        let mut s = T::zero();
        for i in 0..self.nrows.min(self.ncols) {
            s = s + self[(i, i)];
        }
        s
    }

    /// Frobenius norm of `A^H A - I`, the departure from orthonormal columns.
    pub fn orthogonality_error(&self) -> T::Real {
        let mut g = self.adjoint_mul(self);
        for i in 0..g.nrows {
            g[(i, i)] = g[(i, i)] - T::one();
        }
        g.frobenius_norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hermitian_tolerance() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0 + 1e-12, 3.0]);
        assert!(!a.is_hermitian(0.0));
        assert!(a.is_hermitian(1e-10));
        let rect = DynMatrix::<f64>::zeros(2, 3);
        assert!(!rect.is_hermitian(1.0));
    }

    #[test]
    fn upper_triangular_rectangular() {
        let tall = DynMatrix::from_rows(3, 2, &[1.0_f64, 2.0, 0.0, 3.0, 0.0, 0.0]);
        assert!(tall.is_upper_triangular(0.0));
        let wide = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 1e-3, 4.0, 5.0]);
        assert!(!wide.is_upper_triangular(1e-6));
    }

    #[test]
    fn tridiagonal_detects_fill() {
        let mut t = DynMatrix::<f64>::eye(4);
        t[(0, 1)] = 1.0;
        t[(3, 2)] = 1.0;
        assert!(t.is_tridiagonal(0.0));
        t[(0, 2)] = 0.5;
        assert!(!t.is_tridiagonal(0.1));
    }

    #[test]
    fn identity_and_trace() {
        let id = DynMatrix::<f64>::eye_rect(3, 2);
        assert!(id.is_identity(0.0));
        assert_eq!(id.trace(), 2.0);
        assert_eq!(id.diagonal(), [1.0, 1.0]);
        assert_eq!(id.orthogonality_error(), 0.0);
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_hermitian() {
        use num_complex::Complex;
        let c = |re, im| Complex::new(re, im);
        let h = DynMatrix::from_rows(2, 2, &[c(4.0_f64, 0.0), c(2.0, 1.0), c(2.0, -1.0), c(5.0, 0.0)]);
        assert!(h.is_hermitian(0.0));
        let s = DynMatrix::from_rows(2, 2, &[c(4.0_f64, 0.0), c(2.0, 1.0), c(2.0, 1.0), c(5.0, 0.0)]);
        assert!(!s.is_hermitian(1e-6));
    }
}
