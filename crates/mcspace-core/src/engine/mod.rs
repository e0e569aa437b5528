//! # Engine Module
//!
//! The machinery Monte Carlo procedures are assembled from: typed configuration, the
//! error hierarchy, progress events, loop bookkeeping, and the operations that combine a
//! container with a particle configuration.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Geometry, loop, move and particle settings with builders
//! - **Error Handling** ([`error`]) - The aggregate [`error::EngineError`]
//! - **Progress Monitoring** ([`progress`]) - Event callbacks for front ends
//! - **Loop Counting** ([`mcloop`]) - Macro/micro step counters, rate and ETA
//! - **Shared State** ([`shared`]) - A geometry readable from many threads and resizable in one step
//! - **Volume Moves** ([`volume`]) - Trial volume changes with exact revert on rejection
//! - **Placement** ([`placement`]) - Collision- and overlap-free particle insertion
//! - **Sampling** ([`sampling`]) - Bulk parallel position sampling and axis histograms

pub mod config;
pub mod error;
pub mod mcloop;
pub mod placement;
pub mod progress;
pub mod sampling;
pub mod shared;
pub mod volume;
