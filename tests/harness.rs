#![cfg(feature = "verify")]

use householder::verify::{random_hermitian, random_matrix, verify_qr, verify_tridiagonal, VerifyConfig};
use householder::{
    DynMatrix, QrDecomposition, QrHouseholder, TridiagonalDecomposition, TridiagonalHouseholder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn qr_f64_default_config() {
    let report = verify_qr(QrHouseholder::<f64>::new, &VerifyConfig::default());
    assert!(report.is_ok(), "{}", report);
}

#[test]
fn tridiagonal_f64_default_config() {
    let report = verify_tridiagonal(TridiagonalHouseholder::<f64>::new, &VerifyConfig::default());
    assert!(report.is_ok(), "{}", report);
}

#[cfg(feature = "complex")]
#[test]
fn qr_complex_default_config() {
    use householder::Complex;
    let report = verify_qr(QrHouseholder::<Complex<f64>>::new, &VerifyConfig::default());
    assert!(report.is_ok(), "{}", report);
}

#[cfg(feature = "complex")]
#[test]
fn tridiagonal_complex_default_config() {
    use householder::Complex;
    let report = verify_tridiagonal(
        TridiagonalHouseholder::<Complex<f64>>::new,
        &VerifyConfig::default(),
    );
    assert!(report.is_ok(), "{}", report);
}

#[cfg(feature = "complex")]
#[test]
fn complex_boxed_trait_objects() {
    use householder::Complex;
    let config = VerifyConfig {
        seed: 7,
        sizes: vec![2, 5, 9],
        ..VerifyConfig::default()
    };

    let qr = verify_qr(
        || -> Box<dyn QrDecomposition<Complex<f64>>> { Box::new(QrHouseholder::new()) },
        &config,
    );
    assert!(qr.is_ok(), "{}", qr);

    let tri = verify_tridiagonal(
        || -> Box<dyn TridiagonalDecomposition<Complex<f64>>> {
            Box::new(TridiagonalHouseholder::new())
        },
        &config,
    );
    assert!(tri.is_ok(), "{}", tri);
}

#[test]
fn boxed_trait_objects() {
    let config = VerifyConfig {
        seed: 99,
        ..VerifyConfig::default()
    };

    let qr = verify_qr(
        || -> Box<dyn QrDecomposition<f64>> { Box::new(QrHouseholder::new()) },
        &config,
    );
    assert!(qr.is_ok(), "{}", qr);

    let tri = verify_tridiagonal(
        || -> Box<dyn TridiagonalDecomposition<f64>> { Box::new(TridiagonalHouseholder::new()) },
        &config,
    );
    assert!(tri.is_ok(), "{}", tri);
}

#[test]
fn tighter_tolerance_still_holds() {
    let config = VerifyConfig {
        sizes: vec![3, 10, 20],
        tol: 1e-11,
        ..VerifyConfig::default()
    };
    assert!(verify_qr(QrHouseholder::<f64>::new, &config).is_ok());
    assert!(verify_tridiagonal(TridiagonalHouseholder::<f64>::new, &config).is_ok());
}

#[test]
fn impossible_tolerance_reports_failures() {
    let config = VerifyConfig {
        sizes: vec![6],
        tol: 0.0,
        ..VerifyConfig::default()
    };
    let report = verify_qr(QrHouseholder::<f64>::new, &config);
    assert!(!report.is_ok());
    assert!(report.failures().all(|o| o.failure.is_some()));
    assert!(report.to_string().contains("checks passed"));
}

#[test]
fn caller_matrix_untouched() {
    let mut rng = StdRng::seed_from_u64(3);
    let a: DynMatrix<f64> = random_matrix(&mut rng, 6, 4);
    let before = a.clone();
    let mut qr = QrHouseholder::new();
    qr.decompose(&a).unwrap();
    assert_eq!(a, before);

    let h: DynMatrix<f64> = random_hermitian(&mut rng, 5);
    let before = h.clone();
    let mut tri = TridiagonalHouseholder::new();
    tri.decompose(&h).unwrap();
    assert_eq!(h, before);
}

#[test]
fn one_instance_many_matrices() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut tri = TridiagonalHouseholder::with_capacity(16);
    for n in [16, 3, 9, 1, 12] {
        let a: DynMatrix<f64> = random_hermitian(&mut rng, n);
        tri.decompose(&a).unwrap();
        let q = tri.q().unwrap();
        let t = tri.t().unwrap();
        let back = (q * &t).mul_adjoint(q);
        assert!((&back - &a).frobenius_norm() < 1e-12 * a.frobenius_norm().max(1.0) * 10.0);
        assert_eq!(tri.gammas().unwrap().len(), n.saturating_sub(2));
    }
}
