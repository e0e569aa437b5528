use super::ids::ParticleId;
use super::particle::Particle;
use super::point::Point;
use slotmap::SlotMap;

/// The particles of one simulation replica, keyed by stable [`ParticleId`]s.
///
/// Removing a particle never invalidates the ids of the others.
#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    particles: SlotMap<ParticleId, Particle>,
}

impl Ensemble {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub fn insert(&mut self, particle: Particle) -> ParticleId {
        self.particles.insert(particle)
    }

    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        self.particles.remove(id)
    }

    #[inline]
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// Moves a particle without touching its other attributes.
    ///
    /// Returns `false` if `id` is not in the ensemble.
    pub fn set_position(&mut self, id: ParticleId, position: Point) -> bool {
        match self.particles.get_mut(id) {
            Some(particle) => {
                particle.set_position(position);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> {
        self.particles.iter_mut()
    }

    pub fn ids(&self) -> Vec<ParticleId> {
        self.particles.keys().collect()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.particles.values().map(|p| *p.position()).collect()
    }

    pub fn total_charge(&self) -> f64 {
        self.particles.values().map(Particle::charge).sum()
    }
}
