//! Paraunitary (bosonic Bogoliubov) diagonalisation.
//!
//! A bosonic quadratic Hamiltonian cannot be diagonalised by a plain unitary
//! transform without destroying the commutation relations. Instead, for a
//! positive-definite $H$:
//!
//! 1. factor $H = L L^\dagger$ (Cholesky, lower-triangular $L$),
//! 2. form $H' = L^\dagger g L$ with the signature matrix
//!    $g = \mathrm{diag}(+1 \times N, -1 \times N)$,
//! 3. eigen-decompose $H'$; its (real) eigenvalues are the magnon energies,
//!    N creation and N annihilation branches.
//!
//! A Hamiltonian that is not positive-definite signals an unstable ground
//! state at this Q. That is an expected physical outcome, not a bug: the
//! factorisation is retried a few times with a small diagonal shift (which
//! rescues positive-*semi*definite points such as Goldstone modes), and if
//! that fails the point reports [`SolverError::Instability`].
//!
//! Spectral weights are recovered by back-transforming the eigenvectors
//! through the Cholesky factor, $T = (L^\dagger)^{-1} U \sqrt{g E}$; the
//! squared norm of the first-N block of each column is the branch weight.

use log::warn;
use ndarray::Array2;
use num_complex::Complex64;

use crate::solver::SolverError;
use crate::types::{EnergyAndWeight, QVec};

use super::LswtSolver;

/// Lower-triangular Cholesky factor of a Hermitian matrix, `H = L L†`.
///
/// Returns `None` if a pivot is non-positive, i.e. the matrix is not
/// positive-definite.
fn cholesky_lower(h: &Array2<Complex64>) -> Option<Array2<Complex64>> {
    let dim = h.nrows();
    let mut l = Array2::<Complex64>::zeros((dim, dim));

    for j in 0..dim {
        let mut pivot = h[[j, j]].re;
        for k in 0..j {
            pivot -= l[[j, k]].norm_sqr();
        }
        if pivot <= 0.0 || !pivot.is_finite() {
            return None;
        }
        let diag = pivot.sqrt();
        l[[j, j]] = Complex64::from(diag);

        for i in (j + 1)..dim {
            let mut acc = h[[i, j]];
            for k in 0..j {
                acc -= l[[i, k]] * l[[j, k]].conj();
            }
            l[[i, j]] = acc / diag;
        }
    }

    Some(l)
}

/// Cholesky with the diagonal-shift retry loop.
///
/// Each failed attempt adds `chol_delta` to every diagonal element; this
/// lifts positive-semidefinite Hamiltonians (Goldstone modes) into the
/// factorisable regime while leaving genuinely indefinite ones to fail.
fn cholesky_with_retries(
    h: &Array2<Complex64>,
    q: QVec,
    solver: &LswtSolver,
) -> Result<Array2<Complex64>, SolverError> {
    let mut shifted = h.clone();
    for attempt in 0..solver.chol_max_tries.max(1) {
        if let Some(l) = cholesky_lower(&shifted) {
            if attempt > 0 {
                warn!(
                    "Cholesky needed {attempt} diagonal correction(s) at Q = ({:.4}, {:.4}, {:.4})",
                    q[0], q[1], q[2]
                );
            }
            return Ok(l);
        }
        for d in 0..shifted.nrows() {
            shifted[[d, d]] += Complex64::from(solver.chol_delta);
        }
    }
    Err(SolverError::Instability { q })
}

/// Invert a lower-triangular matrix by forward substitution.
fn invert_lower_triangular(l: &Array2<Complex64>) -> Array2<Complex64> {
    let dim = l.nrows();
    let mut inv = Array2::<Complex64>::zeros((dim, dim));
    for c in 0..dim {
        inv[[c, c]] = Complex64::from(1.0) / l[[c, c]];
        for r in (c + 1)..dim {
            let mut acc = Complex64::new(0.0, 0.0);
            for k in c..r {
                acc += l[[r, k]] * inv[[k, c]];
            }
            inv[[r, c]] = -acc / l[[r, r]];
        }
    }
    inv
}

/// Congruence transform $H' = L^\dagger g L$.
fn signature_congruence(l: &Array2<Complex64>, n: usize) -> Array2<Complex64> {
    let dim = 2 * n;
    let mut hp = Array2::<Complex64>::zeros((dim, dim));
    for a in 0..dim {
        for b in 0..dim {
            let mut acc = Complex64::new(0.0, 0.0);
            for k in 0..dim {
                let sign = if k < n { 1.0 } else { -1.0 };
                acc += l[[k, a]].conj() * sign * l[[k, b]];
            }
            hp[[a, b]] = acc;
        }
    }
    hp
}

/// Diagonalise the Hamiltonian and extract energies (and, optionally, weights).
pub fn paraunitary_spectrum(
    h: &Array2<Complex64>,
    q: QVec,
    solver: &LswtSolver,
    with_weights: bool,
) -> Result<Vec<EnergyAndWeight>, SolverError> {
    let dim = h.nrows();
    let n = dim / 2;

    let l = cholesky_with_retries(h, q, solver)?;
    let hp = signature_congruence(&l, n);

    let faer_hp = faer::Mat::<faer::complex_native::c64>::from_fn(dim, dim, |r, c| {
        let z = hp[[r, c]];
        faer::complex_native::c64::new(z.re, z.im)
    });

    if !with_weights {
        // Energies only: skip the eigenvector computation entirely.
        let evals = faer_hp.eigenvalues::<faer::complex_native::c64>();
        let mut energies = Vec::with_capacity(dim);
        let mut max_imag = 0.0_f64;
        for ev in evals {
            if !ev.re.is_finite() {
                return Err(SolverError::Eigen { q });
            }
            max_imag = max_imag.max(ev.im.abs());
            energies.push(ev.re);
        }
        if max_imag > solver.imag_tol {
            return Err(SolverError::NumericalDegeneracy { q, max_imag });
        }
        energies.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        return Ok(energies
            .into_iter()
            .map(|energy| EnergyAndWeight {
                energy,
                weight: 0.0,
            })
            .collect());
    }

    let evd = faer_hp.eigendecomposition::<faer::complex_native::c64>();
    let evals = evd.s().column_vector();
    let evecs = evd.u();

    let mut max_imag = 0.0_f64;
    let mut energies = Vec::with_capacity(dim);
    for r in 0..dim {
        let ev = evals.read(r);
        if !ev.re.is_finite() {
            return Err(SolverError::Eigen { q });
        }
        max_imag = max_imag.max(ev.im.abs());
        energies.push(ev.re);
    }
    if max_imag > solver.imag_tol {
        return Err(SolverError::NumericalDegeneracy { q, max_imag });
    }

    // Sort branches by descending energy: creation first, then annihilation.
    let mut order: Vec<usize> = (0..dim).collect();
    order.sort_by(|&a, &b| {
        energies[b]
            .partial_cmp(&energies[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Back-transform through the Cholesky factor: T = (L†)⁻¹ U √(gE).
    let l_inv = invert_lower_triangular(&l);

    let mut spectrum = Vec::with_capacity(dim);
    for (slot, &r) in order.iter().enumerate() {
        let sign: f64 = if slot < n { 1.0 } else { -1.0 };
        // √(g_r E_r); clipped at zero so near-degenerate branches cannot
        // produce NaN from a slightly negative product.
        let e_sqrt = (sign * energies[r]).max(0.0).sqrt();

        let mut weight = 0.0;
        for a in 0..n {
            // T[a, r] = Σ_k (L⁻¹)†[a, k] U[k, r] · √(gE)
            let mut t = Complex64::new(0.0, 0.0);
            for k in 0..dim {
                let u_kr = evecs.read(k, r);
                t += l_inv[[k, a]].conj() * Complex64::new(u_kr.re, u_kr.im);
            }
            weight += (t * e_sqrt).norm_sqr();
        }

        spectrum.push(EnergyAndWeight {
            energy: energies[r],
            weight,
        });
    }

    Ok(spectrum)
}
