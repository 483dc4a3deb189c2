//! Serial backend: evaluates scan points one after another.
//!
//! The baseline strategy, useful for debugging and for small scans where
//! thread-pool startup would dominate. Also the reference the parallel
//! backends are tested against.

use spindrift_core::model::Model;
use spindrift_core::scan::{scan_point, QPoint};
use spindrift_core::solver::SpinWaveSolver;
use spindrift_core::types::QVec;

use crate::backend::{BackendType, DeviceInfo, ScanBackend};

/// Backend that runs every point on the calling thread.
#[derive(Debug, Default)]
pub struct SerialBackend;

impl SerialBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ScanBackend for SerialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Serial (single thread)".into(),
            backend_type: BackendType::Serial,
            compute_units: Some(1),
        }
    }

    fn scan(&self, solver: &dyn SpinWaveSolver, model: &Model, path: &[QVec]) -> Vec<QPoint> {
        path.iter().map(|&q| scan_point(solver, model, q)).collect()
    }
}
