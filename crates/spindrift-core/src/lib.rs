//! # Spindrift Core
//!
//! The numerical backbone of the Spindrift framework. This crate implements
//! linear spin-wave theory (LSWT) for computing magnon dispersions and
//! neutron-scattering intensity weights of ordered magnetic structures.
//!
//! ## Architecture
//!
//! A magnetic [`model::Model`] (sites, exchange couplings, optional external
//! field) is built once and frozen; every solve borrows it immutably. All
//! solvers implement the [`solver::SpinWaveSolver`] trait, which provides a
//! uniform per-Q interface for computing magnon energies and spectral
//! weights. The primary implementation is the bosonic Bogoliubov
//! diagonalisation ([`solver::lswt::LswtSolver`]).
//!
//! ## Modules
//!
//! - [`types`] — Core data structures (sites, couplings, spectra).
//! - [`model`] — Model builder, validation, and frozen model store.
//! - [`solver`] — Spin-wave solver trait and LSWT implementation.
//! - [`scan`] — Dispersion scans along linear Q paths.

pub mod model;
pub mod scan;
pub mod solver;
pub mod types;
