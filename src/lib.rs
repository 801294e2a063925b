//! # householder
//!
//! Householder-reflector decompositions for dense real and complex matrices,
//! no-std compatible (with `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use householder::{DynMatrix, QrHouseholder, TridiagonalHouseholder};
//!
//! // A = Q R
//! let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! let mut qr = QrHouseholder::new();
//! qr.decompose(&a).unwrap();
//! let r = qr.r().unwrap();
//! assert!(r.is_upper_triangular(0.0));
//!
//! // A = Q T Q^H
//! let s = DynMatrix::from_rows(3, 3, &[2.0_f64, 1.0, 1.0, 1.0, 3.0, 0.5, 1.0, 0.5, 4.0]);
//! let mut tri = TridiagonalHouseholder::new();
//! tri.decompose(&s).unwrap();
//! assert!(tri.t().unwrap().is_tridiagonal(0.0));
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions.
//!   `Vec<T>` row-major storage. Implements [`MatrixRef`] / [`MatrixMut`], so
//!   the reflector routines work on it directly. Arithmetic, adjoint, norms,
//!   block copies and structural predicates used to check results.
//!
//! - [`linalg`]: Reflector construction and application
//!   ([`linalg::householder`]), reusable [`QrHouseholder`] and
//!   [`TridiagonalHouseholder`] instances, and the [`Decomposition`] /
//!   [`QrDecomposition`] / [`TridiagonalDecomposition`] traits they implement.
//!   Free functions `qr_in_place` / `tridiagonalize_in_place` operate on
//!   `&mut impl MatrixMut<T>`.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, the type of gammas, norms and tolerances
//!   - [`LinalgScalar`]: real floats and complex numbers, used by every decomposition
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! - [`verify`]: Property suites (orthogonality, reconstruction, structure,
//!   determinism, degenerate inputs) run against any decomposition factory.
//!   Requires `verify` feature.
//!
//! ## Complex matrices
//!
//! With the `complex` feature, every decomposition accepts `Complex<f32>` /
//! `Complex<f64>`. Reflectors keep a real `gamma`, so the same `H` serves on
//! both sides of a similarity and Hermitian input stays exactly Hermitian.
//! [`TridiagonalHouseholder::real_tridiagonal`] removes the remaining phases
//! from the off-diagonal.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | `std::error::Error` for `LinalgError`; required by `verify` |
//! | `libm`    | baseline | Pure-Rust software float fallback |
//! | `complex` | yes      | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `verify`  | yes      | Property suites in [`verify`], implies `std`, pulls in `rand` |
//! | `all`     | no       | All features: `std` + `complex` + `verify` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
pub mod traits;
#[cfg(feature = "verify")]
pub mod verify;

pub use dynmatrix::{DynMatrix, DynMatrixf32, DynMatrixf64};
#[cfg(feature = "complex")]
pub use dynmatrix::{DynMatrixz32, DynMatrixz64};
pub use linalg::qr::qr_in_place;
pub use linalg::tridiagonal::tridiagonalize_in_place;
pub use linalg::{
    Decomposition, DecompositionState, LinalgError, QrDecomposition, QrHouseholder,
    RealTridiagonal, TridiagonalDecomposition, TridiagonalHouseholder,
};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
