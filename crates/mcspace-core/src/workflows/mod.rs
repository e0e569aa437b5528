//! # Workflows Module
//!
//! Complete simulation procedures built on the core and engine layers. A workflow takes a
//! validated configuration and a progress reporter, and returns plain result values.
//!
//! - **Hard-sphere Monte Carlo** ([`hard_spheres`]) - Random insertion followed by
//!   translation and (optionally) isobaric volume moves, one run per replica.

pub mod hard_spheres;
