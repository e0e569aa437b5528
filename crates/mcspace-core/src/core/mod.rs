//! # Core Module
//!
//! The stateless foundation of mcspace: coordinate and particle models, the simulation
//! container shapes, and the random source consumed by every sampling routine.
//!
//! ## Architecture
//!
//! - **Particle Representation** ([`models`]) - Points, particles, species tags and the
//!   slot-keyed ensemble that owns them
//! - **Containers** ([`geometry`]) - Sphere, Cuboid, Slab, Cylinder and Clutch volumes
//!   sharing one capability set: collision, boundary folding, distances, sampling and
//!   volume rescaling
//! - **Randomness** ([`random`]) - The uniform random source contract and its
//!   single-owner and serialized implementations
//!
//! ## Conventions
//!
//! - Lengths are in Angstroms and volumes in cubic Angstroms.
//! - Periodic cells are centered at the origin; the Cylinder spans `z` in `[0, length]`.
//! - Points exactly on a hard wall are inside (collision uses a strict `>`).

pub mod geometry;
pub mod models;
pub mod random;
