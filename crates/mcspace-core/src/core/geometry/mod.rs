//! # Geometry Module
//!
//! Simulation containers: the volume the particles live in, its boundary conditions,
//! and the distance metric those conditions imply.
//!
//! ## Overview
//!
//! Every shape implements the [`Container`] capability set. Callers that do not care
//! about the concrete shape hold a [`Geometry`], a closed sum type over the five
//! variants, and call the same operations on it.
//!
//! | Variant      | Defining parameters          | Boundary                              |
//! |--------------|------------------------------|---------------------------------------|
//! | [`Sphere`]   | radius                       | hard wall                             |
//! | [`Cuboid`]   | side length                  | periodic in x, y, z (minimum image)   |
//! | [`Slab`]     | side length                  | periodic in x, y; hard wall in z      |
//! | [`Cylinder`] | radius, length               | hard wall radially and at z = 0, len  |
//! | [`Clutch`]   | radius, zmin, zmax           | hard wall plus an excluded z band     |
//!
//! ## Volume mutation
//!
//! Each shape is a small `Copy` value whose cached quantities (half lengths, inverse
//! lengths, squared radii) are computed only in its constructor. [`Container::set_volume`]
//! builds a complete new value and assigns it over the old one, so the cache can never
//! disagree with the defining parameters. Keeping the previous value around is all a
//! trial-then-revert volume move needs.
//!
//! Each shape also remembers its *scale origin*, the linear dimension it had before
//! the latest volume change. [`Container::scale`] maps coordinates expressed in that
//! old frame onto a new linear dimension.

mod cell;
mod clutch;
mod cuboid;
mod cylinder;
mod sampling;
mod slab;
mod sphere;

pub use clutch::Clutch;
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use slab::Slab;
pub use sphere::Sphere;

use crate::core::models::point::Point;
use crate::core::random::RandomSource;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attempt cap for rejection sampling when the caller does not choose one.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum GeometryError {
    #[error("Invalid {name}: {value} (must be positive and finite)")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Invalid exclusion band: zmin ({zmin}) must be finite and below zmax ({zmax})")]
    InvalidExclusionBand { zmin: f64, zmax: f64 },

    #[error("Cannot set volume to {0}: volume must be positive and finite")]
    InvalidVolume(f64),

    #[error("Container has no accessible volume to rescale")]
    EmptyVolume,

    #[error("Random placement failed after {attempts} attempts")]
    SamplingExhausted { attempts: usize },
}

/// The capability set shared by every simulation container.
pub trait Container {
    /// True if `point` lies outside the allowed volume, including excluded interior
    /// regions. Points exactly on a wall are inside.
    fn collision(&self, point: &Point) -> bool;

    /// Folds `point` into the central periodic cell along periodic axes.
    ///
    /// A no-op along hard-walled axes. Applying it twice gives the same result as once.
    fn boundary(&self, point: &mut Point);

    /// Squared distance between `a` and the nearest periodic image of `b`.
    fn sqdist(&self, a: &Point, b: &Point) -> f64;

    /// Distance between `a` and the nearest periodic image of `b`; `sqrt(sqdist)`.
    #[inline]
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        self.sqdist(a, b).sqrt()
    }

    /// A point uniformly distributed over the allowed volume.
    ///
    /// Shapes that sample by rejection give up after `max_attempts` draws.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SamplingExhausted`] when no accepted point was found.
    fn random_position_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Point, GeometryError>;

    /// [`Container::random_position_with`] capped at [`DEFAULT_MAX_ATTEMPTS`].
    fn random_position<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Point, GeometryError> {
        self.random_position_with(rng, DEFAULT_MAX_ATTEMPTS)
    }

    /// Accessible volume in cubic Angstroms, projected from the defining parameters.
    fn volume(&self) -> f64;

    /// Rescales the container to `volume`, replacing all cached quantities at once.
    ///
    /// On error the container is left exactly as it was.
    fn set_volume(&mut self, volume: f64) -> Result<(), GeometryError>;

    /// The length that [`Container::scale`] works in: side length, radius or
    /// cylinder length depending on the shape.
    fn linear_dimension(&self) -> f64;

    /// The linear dimension before the most recent volume change.
    fn scale_origin(&self) -> f64;

    /// Which axes (x, y, z) are periodic.
    fn periodicity(&self) -> [bool; 3];

    fn info(&self) -> String;

    /// Maps a point from the scale-origin frame onto linear dimension `new_len`.
    #[inline]
    fn scale(&self, point: &Point, new_len: f64) -> Point {
        *point * (new_len / self.scale_origin())
    }

    /// A copy of this container resized to `volume`.
    fn with_volume(&self, volume: f64) -> Result<Self, GeometryError>
    where
        Self: Sized + Clone,
    {
        let mut resized = self.clone();
        resized.set_volume(volume)?;
        Ok(resized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Sphere,
    Cuboid,
    Slab,
    Cylinder,
    Clutch,
}

impl GeometryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Sphere => "sphere",
            GeometryKind::Cuboid => "cuboid",
            GeometryKind::Slab => "slab",
            GeometryKind::Cylinder => "cylinder",
            GeometryKind::Clutch => "clutch",
        }
    }
}

impl FromStr for GeometryKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" | "cell" => Ok(GeometryKind::Sphere),
            "cuboid" | "cube" | "box" => Ok(GeometryKind::Cuboid),
            "slab" | "slit" => Ok(GeometryKind::Slab),
            "cylinder" => Ok(GeometryKind::Cylinder),
            "clutch" => Ok(GeometryKind::Clutch),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five container shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Cuboid(Cuboid),
    Slab(Slab),
    Cylinder(Cylinder),
    Clutch(Clutch),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Sphere(_) => GeometryKind::Sphere,
            Geometry::Cuboid(_) => GeometryKind::Cuboid,
            Geometry::Slab(_) => GeometryKind::Slab,
            Geometry::Cylinder(_) => GeometryKind::Cylinder,
            Geometry::Clutch(_) => GeometryKind::Clutch,
        }
    }

    pub fn is_periodic(&self) -> bool {
        self.periodicity().iter().any(|&p| p)
    }

    /// Smallest axis-aligned box `(lower, upper)` containing the allowed volume.
    pub fn bounding_box(&self) -> (Point, Point) {
        let cube = |h: f64| (Point::new(-h, -h, -h), Point::new(h, h, h));
        match self {
            Geometry::Sphere(g) => cube(g.radius()),
            Geometry::Cuboid(g) => cube(0.5 * g.len()),
            Geometry::Slab(g) => cube(g.wall()),
            Geometry::Cylinder(g) => {
                let r = g.radius();
                (Point::new(-r, -r, 0.0), Point::new(r, r, g.length()))
            }
            Geometry::Clutch(g) => cube(g.radius()),
        }
    }
}

impl Container for Geometry {
    #[inline]
    fn collision(&self, point: &Point) -> bool {
        match self {
            Geometry::Sphere(g) => g.collision(point),
            Geometry::Cuboid(g) => g.collision(point),
            Geometry::Slab(g) => g.collision(point),
            Geometry::Cylinder(g) => g.collision(point),
            Geometry::Clutch(g) => g.collision(point),
        }
    }

    #[inline]
    fn boundary(&self, point: &mut Point) {
        match self {
            Geometry::Sphere(g) => g.boundary(point),
            Geometry::Cuboid(g) => g.boundary(point),
            Geometry::Slab(g) => g.boundary(point),
            Geometry::Cylinder(g) => g.boundary(point),
            Geometry::Clutch(g) => g.boundary(point),
        }
    }

    #[inline]
    fn sqdist(&self, a: &Point, b: &Point) -> f64 {
        match self {
            Geometry::Sphere(g) => g.sqdist(a, b),
            Geometry::Cuboid(g) => g.sqdist(a, b),
            Geometry::Slab(g) => g.sqdist(a, b),
            Geometry::Cylinder(g) => g.sqdist(a, b),
            Geometry::Clutch(g) => g.sqdist(a, b),
        }
    }

    fn random_position_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Point, GeometryError> {
        match self {
            Geometry::Sphere(g) => g.random_position_with(rng, max_attempts),
            Geometry::Cuboid(g) => g.random_position_with(rng, max_attempts),
            Geometry::Slab(g) => g.random_position_with(rng, max_attempts),
            Geometry::Cylinder(g) => g.random_position_with(rng, max_attempts),
            Geometry::Clutch(g) => g.random_position_with(rng, max_attempts),
        }
    }

    fn volume(&self) -> f64 {
        match self {
            Geometry::Sphere(g) => g.volume(),
            Geometry::Cuboid(g) => g.volume(),
            Geometry::Slab(g) => g.volume(),
            Geometry::Cylinder(g) => g.volume(),
            Geometry::Clutch(g) => g.volume(),
        }
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), GeometryError> {
        match self {
            Geometry::Sphere(g) => g.set_volume(volume),
            Geometry::Cuboid(g) => g.set_volume(volume),
            Geometry::Slab(g) => g.set_volume(volume),
            Geometry::Cylinder(g) => g.set_volume(volume),
            Geometry::Clutch(g) => g.set_volume(volume),
        }
    }

    fn linear_dimension(&self) -> f64 {
        match self {
            Geometry::Sphere(g) => g.linear_dimension(),
            Geometry::Cuboid(g) => g.linear_dimension(),
            Geometry::Slab(g) => g.linear_dimension(),
            Geometry::Cylinder(g) => g.linear_dimension(),
            Geometry::Clutch(g) => g.linear_dimension(),
        }
    }

    fn scale_origin(&self) -> f64 {
        match self {
            Geometry::Sphere(g) => g.scale_origin(),
            Geometry::Cuboid(g) => g.scale_origin(),
            Geometry::Slab(g) => g.scale_origin(),
            Geometry::Cylinder(g) => g.scale_origin(),
            Geometry::Clutch(g) => g.scale_origin(),
        }
    }

    fn periodicity(&self) -> [bool; 3] {
        match self {
            Geometry::Sphere(g) => g.periodicity(),
            Geometry::Cuboid(g) => g.periodicity(),
            Geometry::Slab(g) => g.periodicity(),
            Geometry::Cylinder(g) => g.periodicity(),
            Geometry::Clutch(g) => g.periodicity(),
        }
    }

    fn info(&self) -> String {
        match self {
            Geometry::Sphere(g) => g.info(),
            Geometry::Cuboid(g) => g.info(),
            Geometry::Slab(g) => g.info(),
            Geometry::Cylinder(g) => g.info(),
            Geometry::Clutch(g) => g.info(),
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info())
    }
}

impl From<Sphere> for Geometry {
    fn from(g: Sphere) -> Self {
        Geometry::Sphere(g)
    }
}

impl From<Cuboid> for Geometry {
    fn from(g: Cuboid) -> Self {
        Geometry::Cuboid(g)
    }
}

impl From<Slab> for Geometry {
    fn from(g: Slab) -> Self {
        Geometry::Slab(g)
    }
}

impl From<Cylinder> for Geometry {
    fn from(g: Cylinder) -> Self {
        Geometry::Cylinder(g)
    }
}

impl From<Clutch> for Geometry {
    fn from(g: Clutch) -> Self {
        Geometry::Clutch(g)
    }
}

/// Validates a defining length or radius.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidParameter { name, value })
    }
}

pub(crate) fn require_volume(volume: f64) -> Result<f64, GeometryError> {
    if volume.is_finite() && volume > 0.0 {
        Ok(volume)
    } else {
        Err(GeometryError::InvalidVolume(volume))
    }
}

/// Renders the shared `info()` layout: a header line and aligned `key = value` rows.
pub(crate) fn format_info(shape: &str, rows: &[(&str, String)]) -> String {
    let mut out = format!("Geometry: {}\n", shape);
    for (key, value) in rows {
        out.push_str(&format!("  {:<18} = {}\n", key, value));
    }
    out
}
