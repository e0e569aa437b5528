use super::error::EngineError;
use crate::core::geometry::{Container, Geometry};
use crate::core::models::ensemble::Ensemble;
use crate::core::models::ids::ParticleId;
use crate::core::models::particle::Particle;
use crate::core::random::RandomSource;
use tracing::debug;

/// True if `candidate` overlaps any particle of `ensemble` other than `skip`, measuring
/// distances the way `geometry` does (minimum image for periodic axes).
pub fn overlaps_any(
    ensemble: &Ensemble,
    geometry: &Geometry,
    candidate: &Particle,
    skip: Option<ParticleId>,
) -> bool {
    ensemble.iter().any(|(id, other)| {
        Some(id) != skip
            && candidate
                .overlaps_at_sqdist(other, geometry.sqdist(candidate.position(), other.position()))
    })
}

/// True if `candidate` is inside the container and overlaps nothing but `skip`.
pub fn fits(
    ensemble: &Ensemble,
    geometry: &Geometry,
    candidate: &Particle,
    skip: Option<ParticleId>,
) -> bool {
    !geometry.collision(candidate.position()) && !overlaps_any(ensemble, geometry, candidate, skip)
}

/// Inserts a copy of `template` at a random position where it fits.
///
/// # Errors
///
/// - [`EngineError::Placement`] if no free spot was found in `max_attempts` tries.
/// - [`EngineError::Geometry`] if the container itself cannot produce a position.
pub fn insert_particle<R: RandomSource + ?Sized>(
    ensemble: &mut Ensemble,
    geometry: &Geometry,
    template: &Particle,
    rng: &mut R,
    max_attempts: usize,
) -> Result<ParticleId, EngineError> {
    for _ in 0..max_attempts {
        let position = geometry.random_position_with(rng, max_attempts)?;
        let candidate = template.clone().at(position);
        if fits(ensemble, geometry, &candidate, None) {
            return Ok(ensemble.insert(candidate));
        }
    }
    debug!(
        species = %template.species(),
        particles = ensemble.len(),
        "No free position found for particle."
    );
    Err(EngineError::Placement {
        species: template.species(),
        attempts: max_attempts,
    })
}

/// True if no particle lies outside the container and no two particles overlap.
pub fn is_valid_configuration(ensemble: &Ensemble, geometry: &Geometry) -> bool {
    let particles: Vec<_> = ensemble.iter().collect();
    particles.iter().enumerate().all(|(i, (_, a))| {
        !geometry.collision(a.position())
            && particles[i + 1..].iter().all(|(_, b)| {
                !a.overlaps_at_sqdist(b, geometry.sqdist(a.position(), b.position()))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Cuboid, Sphere};
    use crate::core::models::point::Point;
    use crate::core::models::species::Species;
    use crate::core::random::UniformRng;

    fn hard_sphere(radius: f64) -> Particle {
        Particle::new(Species::Ion, 0.0, radius, 1.0).unwrap()
    }

    #[test]
    fn overlap_check_uses_minimum_image() {
        let geometry: Geometry = Cuboid::new(10.0).unwrap().into();
        let mut ensemble = Ensemble::new();
        ensemble.insert(hard_sphere(0.5).at(Point::new(4.8, 0.0, 0.0)));

        let across_wall = hard_sphere(0.5).at(Point::new(-4.8, 0.0, 0.0));
        assert!(overlaps_any(&ensemble, &geometry, &across_wall, None));

        let sphere: Geometry = Sphere::new(10.0).unwrap().into();
        assert!(!overlaps_any(&ensemble, &sphere, &across_wall, None));
    }

    #[test]
    fn skip_excludes_the_moving_particle_itself() {
        let geometry: Geometry = Sphere::new(10.0).unwrap().into();
        let mut ensemble = Ensemble::new();
        let id = ensemble.insert(hard_sphere(1.0));
        ensemble.insert(hard_sphere(1.0).at(Point::new(3.0, 0.0, 0.0)));
        let moved = hard_sphere(1.0).at(Point::new(0.5, 0.0, 0.0));

        assert!(fits(&ensemble, &geometry, &moved, Some(id)));
        assert!(!fits(&ensemble, &geometry, &moved, None));

        let too_close = hard_sphere(1.0).at(Point::new(1.5, 0.0, 0.0));
        assert!(overlaps_any(&ensemble, &geometry, &too_close, Some(id)));
    }

    #[test]
    fn insert_particle_fills_container_without_overlaps() {
        let geometry: Geometry = Sphere::new(15.0).unwrap().into();
        let mut ensemble = Ensemble::new();
        let mut rng = UniformRng::seeded(99);
        for _ in 0..40 {
            insert_particle(&mut ensemble, &geometry, &hard_sphere(1.5), &mut rng, 1000).unwrap();
        }
        assert_eq!(ensemble.len(), 40);
        assert!(is_valid_configuration(&ensemble, &geometry));
    }

    #[test]
    fn insert_particle_reports_placement_failure_when_full() {
        let geometry: Geometry = Cuboid::new(2.0).unwrap().into();
        let mut ensemble = Ensemble::new();
        let mut rng = UniformRng::seeded(3);
        ensemble.insert(hard_sphere(5.0));

        let result = insert_particle(&mut ensemble, &geometry, &hard_sphere(5.0), &mut rng, 20);
        assert!(matches!(
            result,
            Err(EngineError::Placement {
                species: Species::Ion,
                attempts: 20
            })
        ));
        assert_eq!(ensemble.len(), 1);
    }

    #[test]
    fn is_valid_configuration_detects_overlap_and_escape() {
        let geometry: Geometry = Sphere::new(5.0).unwrap().into();
        let mut ensemble = Ensemble::new();
        ensemble.insert(hard_sphere(1.0).at(Point::new(-2.0, 0.0, 0.0)));
        ensemble.insert(hard_sphere(1.0).at(Point::new(2.0, 0.0, 0.0)));
        assert!(is_valid_configuration(&ensemble, &geometry));

        let id = ensemble.insert(hard_sphere(1.0).at(Point::new(0.0, 0.0, 0.0)));
        assert!(is_valid_configuration(&ensemble, &geometry));
        ensemble.set_position(id, Point::new(1.0, 0.0, 0.0));
        assert!(!is_valid_configuration(&ensemble, &geometry));
        ensemble.set_position(id, Point::new(0.0, 0.0, 6.0));
        assert!(!is_valid_configuration(&ensemble, &geometry));
    }
}
