//! Scan backend trait and device abstraction.
//!
//! The [`ScanBackend`] trait abstracts over execution environments (serial,
//! thread pool, distributed) so that the physics code in `spindrift-core`
//! remains strategy-agnostic. A backend receives an immutable model, a
//! solver, and a Q path; it must return one [`QPoint`] per path entry, in
//! path order, regardless of completion order. Per-point solver failures are
//! carried inside the points; a backend never turns them into its own
//! errors.

use spindrift_core::model::Model;
use spindrift_core::scan::QPoint;
use spindrift_core::solver::SpinWaveSolver;
use spindrift_core::types::QVec;

/// Describes the capabilities of a backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend_type: BackendType,
    pub compute_units: Option<usize>,
}

/// The type of compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Serial,
    Cpu,
    Distributed,
}

/// Abstraction over scan execution strategies.
pub trait ScanBackend: Send + Sync {
    /// Return information about the backend.
    fn device_info(&self) -> DeviceInfo;

    /// Evaluate the solver at every Q of `path`.
    ///
    /// The returned vector has the same length and order as `path`; entry
    /// `i` is the result for `path[i]` even when points complete out of
    /// order.
    fn scan(&self, solver: &dyn SpinWaveSolver, model: &Model, path: &[QVec]) -> Vec<QPoint>;
}
