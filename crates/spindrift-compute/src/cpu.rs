//! CPU scan backend using Rayon for shared-memory parallelism.
//!
//! Every scan point reads only the immutable model and its own Q value, so
//! the fan-out needs no locking; an indexed parallel map keeps the results
//! in submission order no matter which points finish first.

use log::debug;
use rayon::prelude::*;

use spindrift_core::model::Model;
use spindrift_core::scan::{scan_point, QPoint};
use spindrift_core::solver::SpinWaveSolver;
use spindrift_core::types::QVec;

use crate::backend::{BackendType, DeviceInfo, ScanBackend};

/// CPU backend that parallelises scan points across threads via Rayon.
pub struct CpuBackend {
    num_threads: usize,
}

impl CpuBackend {
    /// Create a new CPU backend using all available threads.
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
        }
    }

    /// Create a CPU backend with a specified thread count.
    pub fn with_threads(num_threads: usize) -> Self {
        Self { num_threads }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} threads)", self.num_threads),
            backend_type: BackendType::Cpu,
            compute_units: Some(self.num_threads),
        }
    }

    fn scan(&self, solver: &dyn SpinWaveSolver, model: &Model, path: &[QVec]) -> Vec<QPoint> {
        debug!(
            "scanning {} Q points on {} threads",
            path.len(),
            self.num_threads
        );
        path.par_iter()
            .map(|&q| scan_point(solver, model, q))
            .collect()
    }
}
