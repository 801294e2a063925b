//! Property suites for decomposition implementations.
//!
//! Each suite takes a factory closure producing fresh instances, so the same
//! checks run against [`QrHouseholder`](crate::QrHouseholder), a boxed trait
//! object, or any other type implementing the decomposition traits.
//!
//! ```
//! use householder::QrHouseholder;
//! use householder::verify::{verify_qr, VerifyConfig};
//!
//! let report = verify_qr(QrHouseholder::<f64>::new, &VerifyConfig::default());
//! assert!(report.is_ok(), "{}", report);
//! ```

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dynmatrix::DynMatrix;
use crate::linalg::householder::reflector_matrix;
use crate::linalg::{Decomposition, LinalgError, QrDecomposition, TridiagonalDecomposition};
use crate::traits::LinalgScalar;

/// Run `decompose`, turning both an `Err` and a panic into `false`.
pub fn safe_decompose<T, D>(d: &mut D, a: &DynMatrix<T>) -> bool
where
    T: LinalgScalar,
    D: Decomposition<T> + ?Sized,
{
    matches!(catch_unwind(AssertUnwindSafe(|| d.decompose(a))), Ok(Ok(())))
}

/// [`safe_decompose`] for `decompose_owned`.
pub fn safe_decompose_owned<T, D>(d: &mut D, a: DynMatrix<T>) -> bool
where
    T: LinalgScalar,
    D: Decomposition<T> + ?Sized,
{
    matches!(
        catch_unwind(AssertUnwindSafe(|| d.decompose_owned(a))),
        Ok(Ok(()))
    )
}

/// Knobs for the property suites.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyConfig {
    /// Seed for the random test matrices.
    pub seed: u64,
    /// Base sizes; QR also runs a tall and a wide shape per size.
    pub sizes: Vec<usize>,
    /// Absolute tolerance on orthogonality, relative (to `max(1, ||A||)`)
    /// on reconstruction.
    pub tol: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        let mut sizes: Vec<usize> = (1..=8).collect();
        sizes.push(12);
        Self {
            seed: 0x5eed_2024,
            sizes,
            tol: 1e-8,
        }
    }
}

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub check: &'static str,
    pub nrows: usize,
    pub ncols: usize,
    /// `None` when every property held.
    pub failure: Option<String>,
}

impl CheckOutcome {
    #[inline]
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}x{}: ", self.check, self.nrows, self.ncols)?;
        match &self.failure {
            None => write!(f, "ok"),
            Some(msg) => write!(f, "FAILED ({})", msg),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    fn record(&mut self, check: &'static str, a: &DynMatrix<impl Sized>, result: Result<(), String>) {
        self.outcomes.push(CheckOutcome {
            check,
            nrows: a.nrows(),
            ncols: a.ncols(),
            failure: result.err(),
        });
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        write!(
            f,
            "{}/{} checks passed",
            self.outcomes.len() - failed,
            self.outcomes.len()
        )?;
        for o in self.failures() {
            write!(f, "\n  {}", o)?;
        }
        Ok(())
    }
}

// ── Test matrices ───────────────────────────────────────────────────

/// Entries with real and imaginary parts uniform in `[-1, 1)`.
/// Real types ignore the imaginary draw.
pub fn random_matrix<T: LinalgScalar<Real = f64>>(
    rng: &mut impl Rng,
    nrows: usize,
    ncols: usize,
) -> DynMatrix<T> {
    let data = (0..nrows * ncols)
        .map(|_| T::from_parts(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    DynMatrix::from_vec(nrows, ncols, data)
}

/// Random Hermitian (symmetric for reals) matrix with a real diagonal.
pub fn random_hermitian<T: LinalgScalar<Real = f64>>(rng: &mut impl Rng, n: usize) -> DynMatrix<T> {
    let mut a = DynMatrix::zeros(n, n);
    for i in 0..n {
        a[(i, i)] = T::from_real(rng.gen_range(-1.0..1.0));
        for j in i + 1..n {
            let x = T::from_parts(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            a[(i, j)] = x;
            a[(j, i)] = x.conj();
        }
    }
    a
}

fn random_upper<T: LinalgScalar<Real = f64>>(rng: &mut impl Rng, n: usize) -> DynMatrix<T> {
    let mut a = random_matrix(rng, n, n);
    for i in 1..n {
        for j in 0..i {
            a[(i, j)] = T::zero();
        }
    }
    a
}

fn random_tridiagonal<T: LinalgScalar<Real = f64>>(rng: &mut impl Rng, n: usize) -> DynMatrix<T> {
    let mut a = random_hermitian(rng, n);
    for i in 0..n {
        for j in 0..n {
            if i.abs_diff(j) > 1 {
                a[(i, j)] = T::zero();
            }
        }
    }
    a
}

// ── Property helpers ────────────────────────────────────────────────

fn within(what: &str, err: f64, bound: f64) -> Result<(), String> {
    if err <= bound {
        Ok(())
    } else {
        Err(format!("{}: {:.3e} > {:.3e}", what, err, bound))
    }
}

fn ensure(cond: bool, what: &str) -> Result<(), String> {
    if cond {
        Ok(())
    } else {
        Err(what.to_string())
    }
}

fn shape<T>(what: &str, m: &DynMatrix<T>, nrows: usize, ncols: usize) -> Result<(), String> {
    if (m.nrows(), m.ncols()) == (nrows, ncols) {
        Ok(())
    } else {
        Err(format!(
            "{} is {}x{}, expected {}x{}",
            what,
            m.nrows(),
            m.ncols(),
            nrows,
            ncols
        ))
    }
}

/// Run one scenario; a panic in any call it makes becomes its failure.
fn guarded(scenario: impl FnOnce() -> Result<(), String>) -> Result<(), String> {
    catch_unwind(AssertUnwindSafe(scenario)).unwrap_or_else(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string payload".to_string());
        Err(format!("panicked: {}", msg))
    })
}

fn err_str(e: LinalgError) -> String {
    e.to_string()
}

fn scale<T: LinalgScalar<Real = f64>>(a: &DynMatrix<T>, tol: f64) -> f64 {
    tol * a.frobenius_norm().max(1.0)
}

fn moduli<T: LinalgScalar<Real = f64>>(a: &DynMatrix<T>) -> DynMatrix<f64> {
    a.map(|x| x.modulus())
}

fn decomposed<T, D, F>(factory: &mut F, a: &DynMatrix<T>) -> Result<D, String>
where
    T: LinalgScalar,
    D: Decomposition<T>,
    F: FnMut() -> D,
{
    let mut d = factory();
    if safe_decompose(&mut d, a) {
        Ok(d)
    } else {
        Err("decompose failed".to_string())
    }
}

// ── QR ──────────────────────────────────────────────────────────────

/// Core QR properties shared by every scenario.
fn qr_core<T, D>(d: &D, a: &DynMatrix<T>, tol: f64) -> Result<(DynMatrix<T>, DynMatrix<T>), String>
where
    T: LinalgScalar<Real = f64>,
    D: QrDecomposition<T>,
{
    let (m, n) = (a.nrows(), a.ncols());
    let k = m.min(n);
    let q = d.q().map_err(err_str)?;
    let r = d.r().map_err(err_str)?;
    shape("Q", &q, m, m)?;
    shape("R", &r, m, n)?;
    ensure((d.nrows(), d.ncols()) == (m, n), "reported dimensions")?;

    let s = scale(a, tol);
    within("orthogonality", q.orthogonality_error(), tol)?;
    within("reconstruction", (&(&q * &r) - a).frobenius_norm(), s)?;
    ensure(r.is_upper_triangular(s), "R not upper triangular")?;

    let q1 = d.q_thin().map_err(err_str)?;
    let r1 = d.r_thin().map_err(err_str)?;
    shape("thin Q", &q1, m, k)?;
    shape("thin R", &r1, k, n)?;
    within("thin orthogonality", q1.orthogonality_error(), tol)?;
    within("thin reconstruction", (&(&q1 * &r1) - a).frobenius_norm(), s)?;

    ensure(d.q().map_err(err_str)? == q, "second q() differs")?;
    ensure(d.r().map_err(err_str)? == r, "second r() differs")?;
    Ok((q, r))
}

fn qr_random<T, D, F>(factory: &mut F, reused: &mut D, a: &DynMatrix<T>, tol: f64) -> Result<(), String>
where
    T: LinalgScalar<Real = f64>,
    D: QrDecomposition<T>,
    F: FnMut() -> D,
{
    let d = decomposed(factory, a)?;
    let (q, r) = qr_core(&d, a, tol)?;

    let e = decomposed(factory, a)?;
    ensure(
        e.q().map_err(err_str)? == q && e.r().map_err(err_str)? == r,
        "fresh instances disagree",
    )?;
    ensure(
        d.gammas().map_err(err_str)? == e.gammas().map_err(err_str)?,
        "fresh instances disagree on gammas",
    )?;

    ensure(safe_decompose(reused, a), "reused instance failed")?;
    ensure(
        reused.q().map_err(err_str)? == q && reused.r().map_err(err_str)? == r,
        "reused instance disagrees with a fresh one",
    )?;

    let mut o = factory();
    ensure(safe_decompose_owned(&mut o, a.clone()), "decompose_owned failed")?;
    ensure(o.r().map_err(err_str)? == r, "decompose_owned disagrees")
}

fn qr_expect<T, D, F>(
    factory: &mut F,
    a: &DynMatrix<T>,
    tol: f64,
    q_expected: &DynMatrix<T>,
    r_expected: &DynMatrix<T>,
) -> Result<(), String>
where
    T: LinalgScalar<Real = f64>,
    D: QrDecomposition<T>,
    F: FnMut() -> D,
{
    let d = decomposed(factory, a)?;
    let (q, r) = qr_core(&d, a, tol)?;
    within("Q", (&q - q_expected).frobenius_norm(), tol)?;
    within("R", (&r - r_expected).frobenius_norm(), scale(a, tol))
}

fn qr_upper<T, D, F>(factory: &mut F, a: &DynMatrix<T>, tol: f64) -> Result<(), String>
where
    T: LinalgScalar<Real = f64>,
    D: QrDecomposition<T>,
    F: FnMut() -> D,
{
    let d = decomposed(factory, a)?;
    let (_, r) = qr_core(&d, a, tol)?;
    // Only signs (phases) may change.
    within("|R| vs |A|", (&moduli(&r) - &moduli(a)).frobenius_norm(), scale(a, tol))
}

/// Run the QR property suite against instances built by `factory`.
pub fn verify_qr<T, D, F>(mut factory: F, config: &VerifyConfig) -> VerifyReport
where
    T: LinalgScalar<Real = f64>,
    D: QrDecomposition<T>,
    F: FnMut() -> D,
{
    let tol = config.tol;
    let mut report = VerifyReport::default();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut reused = factory();

    for &s in &config.sizes {
        let extra = s / 2 + 1;
        for (m, n) in [(s + extra, s), (s, s), (s, s + extra)] {
            let a = random_matrix::<T>(&mut rng, m, n);
            let result = guarded(|| qr_random(&mut factory, &mut reused, &a, tol));
            report.record("qr random", &a, result);
        }

        let eye = DynMatrix::<T>::eye(s);
        let result = guarded(|| qr_expect(&mut factory, &eye, tol, &eye, &eye));
        report.record("qr identity", &eye, result);

        let zero = DynMatrix::<T>::zeros(s, s);
        let result = guarded(|| qr_expect(&mut factory, &zero, tol, &eye, &zero));
        report.record("qr zero", &zero, result);

        let upper = random_upper::<T>(&mut rng, s);
        let result = guarded(|| qr_upper(&mut factory, &upper, tol));
        report.record("qr upper triangular", &upper, result);
    }

    let one = random_matrix::<T>(&mut rng, 1, 1);
    let result = guarded(|| qr_expect(&mut factory, &one, tol, &DynMatrix::eye(1), &one));
    report.record("qr 1x1", &one, result);

    report
}

// ── Tridiagonal ─────────────────────────────────────────────────────

/// `H_k ... H_0 A H_0 ... H_k` from the packed reflectors, each embedded
/// after the first `i + 1` rows and columns.
fn apply_packed_reflectors<T: LinalgScalar>(
    a: &DynMatrix<T>,
    qt: &DynMatrix<T>,
    gammas: &[T::Real],
) -> DynMatrix<T> {
    let n = a.nrows();
    let mut m = a.clone();
    for (i, &gamma) in gammas.iter().enumerate() {
        let mut u = Vec::with_capacity(n - i - 1);
        u.push(T::one());
        u.extend(qt.row_slice(i)[i + 2..].iter().map(|x| x.conj()));
        let mut h = DynMatrix::eye(n);
        h.set_block(i + 1, i + 1, &reflector_matrix(&u, gamma));
        m = &(&h * &m) * &h;
    }
    m
}

fn tri_core<T, D>(d: &D, a: &DynMatrix<T>, tol: f64) -> Result<DynMatrix<T>, String>
where
    T: LinalgScalar<Real = f64>,
    D: TridiagonalDecomposition<T>,
{
    let n = a.nrows();
    let t = d.t().map_err(err_str)?;
    let q = d.q().map_err(err_str)?;
    shape("T", &t, n, n)?;
    shape("Q", &q, n, n)?;

    let s = scale(a, tol);
    ensure(t.is_tridiagonal(s), "T not tridiagonal")?;
    ensure(t.is_hermitian(s), "T not Hermitian")?;
    within("orthogonality", q.orthogonality_error(), tol)?;
    within("alpha imaginary part", d.max_alpha_imag().map_err(err_str)?, tol)?;
    within(
        "reconstruction",
        (&(&q * &t).mul_adjoint(&q) - a).frobenius_norm(),
        s,
    )?;

    let qt = d.qt().map_err(err_str)?;
    let gammas = d.gammas().map_err(err_str)?;
    ensure(gammas.len() == n.saturating_sub(2), "gamma count")?;
    let rebuilt = apply_packed_reflectors(a, qt, gammas);
    let mut band = rebuilt.clone();
    for i in 0..n {
        for j in 0..n {
            if i.abs_diff(j) > 1 {
                band[(i, j)] = T::zero();
            }
        }
    }
    within("reflectors reproduce T", (&band - &t).frobenius_norm(), s)?;
    within("reflectors eliminate", (&rebuilt - &band).frobenius_norm(), s)?;
    Ok(t)
}

fn tri_random<T, D, F>(factory: &mut F, a: &DynMatrix<T>, tol: f64) -> Result<(), String>
where
    T: LinalgScalar<Real = f64>,
    D: TridiagonalDecomposition<T>,
    F: FnMut() -> D,
{
    let d = decomposed(factory, a)?;
    let t = tri_core(&d, a, tol)?;
    let e = decomposed(factory, a)?;
    ensure(
        e.t().map_err(err_str)? == t && e.q().map_err(err_str)? == d.q().map_err(err_str)?,
        "fresh instances disagree",
    )?;

    let mut o = factory();
    ensure(safe_decompose_owned(&mut o, a.clone()), "decompose_owned failed")?;
    ensure(o.t().map_err(err_str)? == t, "decompose_owned disagrees")
}

/// `T` must equal `a` up to the phase of each entry.
fn tri_unchanged<T, D, F>(factory: &mut F, a: &DynMatrix<T>, tol: f64) -> Result<(), String>
where
    T: LinalgScalar<Real = f64>,
    D: TridiagonalDecomposition<T>,
    F: FnMut() -> D,
{
    let d = decomposed(factory, a)?;
    let t = tri_core(&d, a, tol)?;
    within("|T| vs |A|", (&moduli(&t) - &moduli(a)).frobenius_norm(), scale(a, tol))
}

/// Run the tridiagonalization property suite against instances built by
/// `factory`.
pub fn verify_tridiagonal<T, D, F>(mut factory: F, config: &VerifyConfig) -> VerifyReport
where
    T: LinalgScalar<Real = f64>,
    D: TridiagonalDecomposition<T>,
    F: FnMut() -> D,
{
    let tol = config.tol;
    let mut report = VerifyReport::default();
    let mut rng = StdRng::seed_from_u64(config.seed);

    for &s in &config.sizes {
        let a = random_hermitian::<T>(&mut rng, s);
        let result = guarded(|| tri_random(&mut factory, &a, tol));
        report.record("tridiagonal random", &a, result);

        let eye = DynMatrix::<T>::eye(s);
        let result = guarded(|| tri_unchanged(&mut factory, &eye, tol));
        report.record("tridiagonal identity", &eye, result);

        let zero = DynMatrix::<T>::zeros(s, s);
        let result = guarded(|| tri_unchanged(&mut factory, &zero, tol));
        report.record("tridiagonal zero", &zero, result);

        let band = random_tridiagonal::<T>(&mut rng, s);
        let result = guarded(|| tri_unchanged(&mut factory, &band, tol));
        report.record("tridiagonal already tridiagonal", &band, result);
    }

    let one = random_hermitian::<T>(&mut rng, 1);
    let result = guarded(|| tri_unchanged(&mut factory, &one, tol));
    report.record("tridiagonal 1x1", &one, result);

    let two = random_hermitian::<T>(&mut rng, 2);
    let result = guarded(|| {
        let d = decomposed(&mut factory, &two)?;
        let t = tri_core(&d, &two, tol)?;
        within("T = A", (&t - &two).frobenius_norm(), scale(&two, tol))
    });
    report.record("tridiagonal 2x2", &two, result);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QrHouseholder, TridiagonalHouseholder};

    fn small() -> VerifyConfig {
        VerifyConfig {
            sizes: vec![1, 2, 3, 5],
            ..VerifyConfig::default()
        }
    }

    #[test]
    fn default_config() {
        let c = VerifyConfig::default();
        assert_eq!(c.sizes, vec![1, 2, 3, 4, 5, 6, 7, 8, 12]);
        assert_eq!(c.tol, 1e-8);
    }

    #[test]
    fn qr_suite_passes() {
        let report = verify_qr(QrHouseholder::<f64>::new, &small());
        assert!(report.is_ok(), "{}", report);
        // 3 shapes + identity + zero + upper per size, plus 1x1
        assert_eq!(report.outcomes.len(), 4 * 6 + 1);
    }

    #[test]
    fn tridiagonal_suite_passes() {
        let report = verify_tridiagonal(TridiagonalHouseholder::<f64>::new, &small());
        assert!(report.is_ok(), "{}", report);
    }

    #[test]
    fn random_hermitian_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        let a: DynMatrix<f64> = random_hermitian(&mut rng, 6);
        assert!(a.is_hermitian(0.0));
        let b: DynMatrix<f64> = random_tridiagonal(&mut rng, 6);
        assert!(b.is_tridiagonal(0.0));
    }

    #[test]
    fn same_seed_same_matrices() {
        let a: DynMatrix<f64> = random_matrix(&mut StdRng::seed_from_u64(1), 3, 4);
        let b: DynMatrix<f64> = random_matrix(&mut StdRng::seed_from_u64(1), 3, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn safe_decompose_catches_panics() {
        let mut tri = TridiagonalHouseholder::<f64>::new();
        assert!(!safe_decompose(&mut tri, &DynMatrix::zeros(2, 3)));
        let mut qr = QrHouseholder::<f64>::new();
        assert!(!safe_decompose(&mut qr, &DynMatrix::from_rows(1, 1, &[f64::NAN])));
        assert!(safe_decompose(&mut qr, &DynMatrix::eye(2)));

        assert!(!safe_decompose_owned(&mut tri, DynMatrix::zeros(3, 2)));
        assert!(safe_decompose_owned(&mut tri, DynMatrix::eye(3)));
    }

    /// A broken QR that reports the identity for `Q` must be caught.
    struct IdentityQ(QrHouseholder<f64>);

    impl Decomposition<f64> for IdentityQ {
        fn decompose(&mut self, a: &DynMatrix<f64>) -> Result<(), LinalgError> {
            self.0.decompose(a)
        }
        fn decompose_owned(&mut self, a: DynMatrix<f64>) -> Result<(), LinalgError> {
            self.0.decompose_owned(a)
        }
        fn nrows(&self) -> usize {
            self.0.nrows()
        }
        fn ncols(&self) -> usize {
            self.0.ncols()
        }
    }

    impl QrDecomposition<f64> for IdentityQ {
        fn q(&self) -> Result<DynMatrix<f64>, LinalgError> {
            Ok(DynMatrix::eye(self.0.nrows()))
        }
        fn r(&self) -> Result<DynMatrix<f64>, LinalgError> {
            self.0.r()
        }
        fn q_thin(&self) -> Result<DynMatrix<f64>, LinalgError> {
            self.0.q_thin()
        }
        fn r_thin(&self) -> Result<DynMatrix<f64>, LinalgError> {
            self.0.r_thin()
        }
        fn gammas(&self) -> Result<&[f64], LinalgError> {
            self.0.gammas()
        }
    }

    #[test]
    fn broken_implementation_reported() {
        let report = verify_qr(|| IdentityQ(QrHouseholder::new()), &small());
        assert!(!report.is_ok());
        let first = report.failures().next().unwrap();
        assert_eq!(first.check, "qr random");
        assert!(first.failure.as_deref().unwrap().contains("reconstruction"));
        assert!(report.to_string().contains("FAILED (reconstruction"));
    }

    /// Delegates to `QrHouseholder` but panics in the selected method.
    struct Faulty {
        inner: QrHouseholder<f64>,
        owned_panics: bool,
        q_panics: bool,
    }

    impl Faulty {
        fn new(owned_panics: bool, q_panics: bool) -> Self {
            Self {
                inner: QrHouseholder::new(),
                owned_panics,
                q_panics,
            }
        }
    }

    impl Decomposition<f64> for Faulty {
        fn decompose(&mut self, a: &DynMatrix<f64>) -> Result<(), LinalgError> {
            self.inner.decompose(a)
        }
        fn decompose_owned(&mut self, a: DynMatrix<f64>) -> Result<(), LinalgError> {
            if self.owned_panics {
                panic!("owned buffer fault");
            }
            self.inner.decompose_owned(a)
        }
        fn nrows(&self) -> usize {
            self.inner.nrows()
        }
        fn ncols(&self) -> usize {
            self.inner.ncols()
        }
    }

    impl QrDecomposition<f64> for Faulty {
        fn q(&self) -> Result<DynMatrix<f64>, LinalgError> {
            if self.q_panics {
                panic!("q fault");
            }
            QrDecomposition::q(&self.inner)
        }
        fn r(&self) -> Result<DynMatrix<f64>, LinalgError> {
            self.inner.r()
        }
        fn q_thin(&self) -> Result<DynMatrix<f64>, LinalgError> {
            self.inner.q_thin()
        }
        fn r_thin(&self) -> Result<DynMatrix<f64>, LinalgError> {
            self.inner.r_thin()
        }
        fn gammas(&self) -> Result<&[f64], LinalgError> {
            self.inner.gammas()
        }
    }

    #[test]
    fn panic_in_decompose_owned_fails_only_its_scenarios() {
        let report = verify_qr(|| Faulty::new(true, false), &small());
        assert_eq!(report.outcomes.len(), 4 * 6 + 1);
        // three random shapes per size exercise decompose_owned
        assert_eq!(report.failures().count(), 3 * 4);
        for o in report.failures() {
            assert_eq!(o.check, "qr random");
            assert_eq!(o.failure.as_deref(), Some("decompose_owned failed"));
        }
    }

    #[test]
    fn panic_in_accessor_becomes_failure() {
        let report = verify_qr(|| Faulty::new(false, true), &small());
        assert_eq!(report.outcomes.len(), 4 * 6 + 1);
        assert_eq!(report.failures().count(), report.outcomes.len());
        for o in report.failures() {
            assert_eq!(o.failure.as_deref(), Some("panicked: q fault"));
        }
    }
}
