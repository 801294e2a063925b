use num_traits::Zero;

use crate::traits::LinalgScalar;

use super::DynMatrix;

impl<T: LinalgScalar> DynMatrix<T> {
    /// Frobenius norm (square root of sum of squared moduli).
    ///
    /// ```
    /// use householder::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        let mut sum = <T::Real as Zero>::zero();
        for &x in &self.data {
            sum = sum + x.modulus_sq();
        }
        sum.lsqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frobenius_norm() {
        let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_norm_is_zero() {
        let m = DynMatrix::<f64>::zeros(0, 3);
        assert_eq!(m.frobenius_norm(), 0.0);
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_frobenius() {
        use num_complex::Complex;
        let m = DynMatrix::from_rows(1, 2, &[Complex::new(3.0_f64, 4.0), Complex::new(0.0, 0.0)]);
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
    }
}
