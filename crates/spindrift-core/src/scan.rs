//! Dispersion scans along linear Q paths.
//!
//! A scan evaluates the solver at `num_points` momentum transfers linearly
//! interpolated between a start and end Q (both inclusive). Every point is
//! independent; this module provides the serial reference implementation,
//! and `spindrift-compute` fans the same per-point closure out over a
//! thread pool. Per-point numerical failures are recorded in that point's
//! result — they never abort the rest of the scan.

use crate::model::Model;
use crate::solver::{SolverError, SpinWaveSolver};
use crate::types::{EnergyAndWeight, QVec};

/// The dispersion at a single momentum transfer.
#[derive(Debug, Clone)]
pub struct QPoint {
    /// The momentum transfer this point was evaluated at.
    pub q: QVec,
    /// The magnon branches, or the per-point error (instability at this Q,
    /// numerical degeneracy). Errors here are data, not control flow.
    pub result: Result<Vec<EnergyAndWeight>, SolverError>,
}

/// Linearly interpolated Q path from `start` to `end`, both ends inclusive.
pub fn q_path(start: QVec, end: QVec, num_points: usize) -> Vec<QVec> {
    let denom = num_points.saturating_sub(1).max(1) as f64;
    (0..num_points)
        .map(|i| {
            let t = i as f64 / denom;
            [
                start[0] + (end[0] - start[0]) * t,
                start[1] + (end[1] - start[1]) * t,
                start[2] + (end[2] - start[2]) * t,
            ]
        })
        .collect()
}

/// Evaluate one scan point; shared between the serial and parallel paths.
pub fn scan_point(solver: &dyn SpinWaveSolver, model: &Model, q: QVec) -> QPoint {
    QPoint {
        q,
        result: solver.compute_spectrum(model, q),
    }
}

/// Serial dispersion scan. Results are in path order.
pub fn compute_dispersion(
    solver: &dyn SpinWaveSolver,
    model: &Model,
    start: QVec,
    end: QVec,
    num_points: usize,
) -> Vec<QPoint> {
    q_path(start, end, num_points)
        .into_iter()
        .map(|q| scan_point(solver, model, q))
        .collect()
}
