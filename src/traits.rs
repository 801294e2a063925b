use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
/// Gammas, norms and tolerances are all expressed in this type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for matrix elements that support the decompositions.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). Every reflector routine is written once against this trait;
/// for reals `conj` is the identity and `im` is zero, so the complex code path
/// collapses to the classic real algorithm.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Imaginary part (zero for reals).
    fn im(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// Build a value from real and imaginary parts. Reals drop `im`.
    fn from_parts(re: Self::Real, im: Self::Real) -> Self;

    /// `true` if neither component is NaN or infinite.
    fn is_finite(self) -> bool;

    /// Squared modulus `|z|^2`, without the square root.
    #[inline]
    fn modulus_sq(self) -> Self::Real {
        (self * self.conj()).re()
    }
}

/// Concrete impls for real floats: plain delegation.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn im(self) -> $t { <$t as Zero>::zero() }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
                #[inline] fn from_parts(re: $t, _im: $t) -> $t { re }
                #[inline] fn is_finite(self) -> bool { Float::is_finite(self) }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn im(self) -> T {
        self.im
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }

    #[inline]
    fn from_parts(re: T, im: T) -> Self {
        Complex::new(re, im)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Float::is_finite(self.re) && Float::is_finite(self.im)
    }

    #[inline]
    fn modulus_sq(self) -> T {
        self.norm_sqr()
    }
}

/// Read-only access to a matrix-like type.
///
/// Storage is row-major, so a row tail is the contiguous slice algorithms
/// reach for first.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Contiguous slice `m[row, col_start..ncols]`.
    fn row_as_slice(&self, row: usize, col_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// reflector updates to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Contiguous mutable slice `m[row, col_start..ncols]`.
    fn row_as_mut_slice(&mut self, row: usize, col_start: usize) -> &mut [T];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_scalar_parts() {
        assert_eq!((-3.0_f64).modulus(), 3.0);
        assert_eq!(2.5_f64.conj(), 2.5);
        assert_eq!(2.5_f64.im(), 0.0);
        assert_eq!(f64::from_parts(1.5, 7.0), 1.5);
        assert_eq!((-2.0_f64).modulus_sq(), 4.0);
        assert!(!f64::NAN.is_finite());
        assert!(!LinalgScalar::is_finite(f64::INFINITY));
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_scalar_arithmetic() {
        let a = Complex::new(3.0_f64, 4.0);
        let b = Complex::new(1.0_f64, -2.0);
        assert_eq!(a.modulus(), 5.0);
        assert_eq!(a.modulus_sq(), 25.0);
        assert_eq!(LinalgScalar::conj(a), Complex::new(3.0, -4.0));
        assert_eq!(a + b, Complex::new(4.0, 2.0));
        // (3+4i)(1-2i) = 3 - 6i + 4i + 8 = 11 - 2i
        assert_eq!(a * b, Complex::new(11.0, -2.0));
        assert_eq!(LinalgScalar::re(a), 3.0);
        assert_eq!(LinalgScalar::im(a), 4.0);
        assert_eq!(Complex::<f64>::from_parts(1.0, 2.0), Complex::new(1.0, 2.0));
        assert!(!LinalgScalar::is_finite(Complex::new(1.0, f64::NAN)));
    }
}
