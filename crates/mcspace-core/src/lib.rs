//! # mcspace Core Library
//!
//! Simulation containers for Monte Carlo molecular simulation: boundary conditions,
//! minimum-image distances, containment tests, uniform random placement inside
//! arbitrarily shaped volumes, and volume rescaling for pressure-coupled ensembles.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Value types (`Point`, `Particle`, `Ensemble`), the
//!   closed set of container shapes behind the [`core::geometry::Container`] contract,
//!   and the explicit random source every sampling routine consumes.
//!
//! - **[`engine`]: The Logic Core.** Configuration builders, errors, progress reporting,
//!   the macro/micro loop counter, thread-shared geometry, trial-then-revert volume
//!   transactions, collision-free particle insertion and bulk sampling.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built from the two layers
//!   below, such as the hard-sphere NPT run.

pub mod core;
pub mod engine;
pub mod workflows;
