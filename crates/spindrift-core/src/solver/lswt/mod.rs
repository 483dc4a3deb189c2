//! Linear spin-wave theory (LSWT) solver.
//!
//! This module implements the Toth & Lake formalism: per-site rotation
//! frames, Fourier-transformed couplings, assembly of the $2N \times 2N$
//! bosonic Hamiltonian, and its paraunitary diagonalisation.
//!
//! # Pipeline
//!
//! - [`frame`] — local spin-rotation frames `(u, v)` per site.
//! - [`fourier`] — reciprocal coupling matrices `J(Q)`, `J(0)`.
//! - [`hamilton`] — Hamiltonian assembly from frames and couplings.
//! - [`bogoliubov`] — Cholesky + signature congruence + eigen-decomposition.

pub mod bogoliubov;
pub mod fourier;
pub mod frame;
pub mod hamilton;

use crate::model::Model;
use crate::types::{EnergyAndWeight, QVec};

use super::{SolverError, SpinWaveSolver};

/// The LSWT solver, holding the numerical policy for the method.
///
/// All tolerances are explicit and public; there are no hidden
/// full-precision comparisons anywhere in the pipeline.
#[derive(Debug, Clone)]
pub struct LswtSolver {
    /// Tolerance below which two energies count as degenerate (used by the
    /// optional branch merging).
    pub eps: f64,
    /// Maximum tolerated imaginary residual on eigenvalues before the point
    /// fails with [`SolverError::NumericalDegeneracy`].
    pub imag_tol: f64,
    /// Maximum number of Cholesky attempts, each preceded by a diagonal shift.
    pub chol_max_tries: usize,
    /// Diagonal shift added per failed Cholesky attempt. Kept small so that
    /// rescued Goldstone modes stay near zero energy.
    pub chol_delta: f64,
    /// Merge branches whose energies agree within `eps`, summing weights.
    pub unite_degenerate: bool,
}

impl Default for LswtSolver {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            imag_tol: 1e-6,
            chol_max_tries: 8,
            chol_delta: 1e-6,
            unite_degenerate: false,
        }
    }
}

impl LswtSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable merging of degenerate branches.
    pub fn with_degenerate_merging(mut self) -> Self {
        self.unite_degenerate = true;
        self
    }
}

/// Collapse branches with equal energies (within `eps`) into one, summing
/// their weights.
fn unite_degenerate_branches(spectrum: Vec<EnergyAndWeight>, eps: f64) -> Vec<EnergyAndWeight> {
    let mut merged: Vec<EnergyAndWeight> = Vec::with_capacity(spectrum.len());
    for branch in spectrum {
        match merged
            .iter_mut()
            .find(|m| (m.energy - branch.energy).abs() <= eps)
        {
            Some(m) => m.weight += branch.weight,
            None => merged.push(branch),
        }
    }
    merged
}

impl SpinWaveSolver for LswtSolver {
    fn compute_energies(&self, model: &Model, q: QVec) -> Result<Vec<f64>, SolverError> {
        let h = hamilton::assemble_hamiltonian(model, q);
        let spectrum = bogoliubov::paraunitary_spectrum(&h, q, self, false)?;
        Ok(spectrum.into_iter().map(|s| s.energy).collect())
    }

    fn compute_spectrum(
        &self,
        model: &Model,
        q: QVec,
    ) -> Result<Vec<EnergyAndWeight>, SolverError> {
        let h = hamilton::assemble_hamiltonian(model, q);
        let spectrum = bogoliubov::paraunitary_spectrum(&h, q, self, true)?;
        if self.unite_degenerate {
            Ok(unite_degenerate_branches(spectrum, self.eps))
        } else {
            Ok(spectrum)
        }
    }

    fn method_name(&self) -> &str {
        "Linear spin-wave theory (LSWT)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unite_degenerate_branches_sums_weights() {
        let spectrum = vec![
            EnergyAndWeight {
                energy: 2.0,
                weight: 0.5,
            },
            EnergyAndWeight {
                energy: 2.0 + 1e-9,
                weight: 0.25,
            },
            EnergyAndWeight {
                energy: -2.0,
                weight: 0.0,
            },
        ];
        let merged = unite_degenerate_branches(spectrum, 1e-6);
        assert_eq!(merged.len(), 2);
        assert!((merged[0].weight - 0.75).abs() < 1e-12);
    }
}
