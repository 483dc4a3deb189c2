//! Distributed (MPI) scan backend for HPC clusters.
//!
//! **Status: Stub for future implementation.**
//!
//! This backend will distribute scan points across nodes:
//!
//! - **Block distribution**: each rank owns a contiguous slice of the Q path
//!   and solves its points locally.
//! - **Gather**: results are gathered back to rank 0 in path order.
//! - **Hybrid MPI+Rayon**: within each node, Rayon parallelises across cores.
//!
//! Gated behind the `distributed` feature flag.

// This module is intentionally left as a stub.
