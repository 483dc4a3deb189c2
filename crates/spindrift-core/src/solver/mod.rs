//! Spin-wave solver abstraction and implementations.
//!
//! The [`SpinWaveSolver`] trait defines the per-Q interface that all
//! solver implementations must provide. The LSWT Bogoliubov solver is the
//! first implementation; future methods (e.g. an incommensurate rotating
//! frame) would implement the same trait.

pub mod lswt;

use thiserror::Error;

use crate::model::Model;
use crate::types::{EnergyAndWeight, QVec};

/// Per-Q numerical failures.
///
/// These are recoverable and local to one momentum transfer: a dispersion
/// scan records them in the affected point's result and continues with its
/// siblings. The variants are `Clone` so scans can store them as data.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// Cholesky factorisation failed even after diagonal-shift retries:
    /// the Hamiltonian is not positive-definite, i.e. the assumed ground
    /// state is not a stable small-amplitude spin-wave regime at this Q.
    #[error("ground state unstable at Q = ({:.4}, {:.4}, {:.4}): Hamiltonian not positive-definite", .q[0], .q[1], .q[2])]
    Instability { q: QVec },

    /// Eigenvalues carried imaginary parts beyond tolerance.
    #[error("eigenvalues at Q = ({:.4}, {:.4}, {:.4}) have residual imaginary part {max_imag:.3e} above tolerance", .q[0], .q[1], .q[2])]
    NumericalDegeneracy { q: QVec, max_imag: f64 },

    /// The eigen-decomposition itself failed to produce a usable basis.
    #[error("eigen-decomposition failed at Q = ({:.4}, {:.4}, {:.4})", .q[0], .q[1], .q[2])]
    Eigen { q: QVec },
}

/// The core trait all spin-wave solvers implement.
///
/// Implementations must be pure with respect to the model: every call reads
/// only the immutable [`Model`] and one Q value and returns a self-contained
/// result. This is what makes scan points embarrassingly parallel — the
/// execution strategy (serial, thread pool, distributed) is chosen entirely
/// by the caller.
pub trait SpinWaveSolver: Send + Sync {
    /// Compute the magnon energies at a single momentum transfer.
    fn compute_energies(&self, model: &Model, q: QVec) -> Result<Vec<f64>, SolverError>;

    /// Compute magnon energies together with their spectral weights.
    fn compute_spectrum(
        &self,
        model: &Model,
        q: QVec,
    ) -> Result<Vec<EnergyAndWeight>, SolverError>;

    /// Human-readable name of the solver method.
    fn method_name(&self) -> &str;
}
