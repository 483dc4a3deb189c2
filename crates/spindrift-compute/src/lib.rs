//! # Spindrift Compute
//!
//! Execution backends for Spindrift dispersion scans. This crate provides a
//! [`ScanBackend`](backend::ScanBackend) trait that isolates the physics code
//! in `spindrift-core` from the execution strategy: the core exposes a pure
//! per-Q solve, and the backend decides how scan points are fanned out.
//!
//! ## Available backends
//!
//! | Backend | Feature flag | Status |
//! |---------|-------------|--------|
//! | Serial | always | Implemented |
//! | CPU (Rayon) | `cpu` (default) | Implemented |
//! | Distributed (MPI) | `distributed` | Stub |

pub mod backend;
pub mod serial;

#[cfg(feature = "cpu")]
pub mod cpu;

#[cfg(feature = "distributed")]
pub mod distributed;

pub use backend::{BackendType, DeviceInfo, ScanBackend};
pub use serial::SerialBackend;

#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
