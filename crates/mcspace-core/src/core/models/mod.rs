//! # Models Module
//!
//! Data structures for the simulated particles.
//!
//! - [`point`] - The three-component coordinate/vector value type
//! - [`particle`] - A point with charge, radius, mass and species
//! - [`species`] - The closed set of particle species tags
//! - [`ensemble`] - The slot-keyed collection of particles in one replica
//! - [`ids`] - Stable keys for ensemble members

pub mod ensemble;
pub mod ids;
pub mod particle;
pub mod point;
pub mod species;
