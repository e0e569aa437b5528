use super::point::Point;
use super::species::Species;
use std::ops::Deref;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum ParticleError {
    #[error("Particle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("Particle mass must be finite and non-negative, got {0}")]
    InvalidMass(f64),
    #[error("Particle charge must be finite, got {0}")]
    InvalidCharge(f64),
}

/// A point-like particle with the physical attributes a Monte Carlo move or energy
/// evaluation needs.
///
/// The coordinates are readable directly on the particle (`particle.x`) through
/// `Deref<Target = Point>`. They can only be replaced as a whole, either by
/// [`Particle::set_position`], which leaves every physical attribute untouched, or by
/// [`Particle::copy_from`], which copies everything. There is no way to change a single
/// attribute from outside, so the radius and mass invariants hold for the particle's
/// entire lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Point,
    charge: f64,
    radius: f64,
    mass: f64,
    species: Species,
}

impl Particle {
    /// Creates a particle at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError`] if the radius or mass is negative or non-finite, or the
    /// charge is non-finite.
    pub fn new(
        species: Species,
        charge: f64,
        radius: f64,
        mass: f64,
    ) -> Result<Self, ParticleError> {
        if !charge.is_finite() {
            return Err(ParticleError::InvalidCharge(charge));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(ParticleError::InvalidRadius(radius));
        }
        if !(mass.is_finite() && mass >= 0.0) {
            return Err(ParticleError::InvalidMass(mass));
        }
        Ok(Self {
            position: Point::origin(),
            charge,
            radius,
            mass,
            species,
        })
    }

    /// A point particle: zero charge, radius and mass.
    pub fn point(species: Species) -> Self {
        Self {
            position: Point::origin(),
            charge: 0.0,
            radius: 0.0,
            mass: 0.0,
            species,
        }
    }

    /// Returns the same particle placed at `position`.
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn position(&self) -> &Point {
        &self.position
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Coordinate-only assignment: copies `position` and nothing else.
    #[inline]
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Full assignment: copies position and every physical attribute of `other`.
    pub fn copy_from(&mut self, other: &Particle) {
        self.clone_from(other);
    }

    /// Hard-sphere overlap test.
    ///
    /// True iff the squared center distance is strictly below the squared sum of radii,
    /// so touching spheres do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Particle) -> bool {
        let contact = self.radius + other.radius;
        self.position.sqdist(&other.position) < contact * contact
    }

    /// Same test as [`Particle::overlaps`], for a squared distance the caller has
    /// already computed (e.g. under the minimum image convention).
    #[inline]
    pub fn overlaps_at_sqdist(&self, other: &Particle, sqdist: f64) -> bool {
        let contact = self.radius + other.radius;
        sqdist < contact * contact
    }

    /// Electrostatic potential of this particle observed at `point`, `charge / r`.
    ///
    /// Not multiplied by the Bjerrum length. `point` must not coincide with the particle.
    #[inline]
    pub fn potential_at(&self, point: &Point) -> f64 {
        self.charge * self.position.invdist(point)
    }
}

impl Deref for Particle {
    type Target = Point;

    #[inline]
    fn deref(&self) -> &Point {
        &self.position
    }
}
