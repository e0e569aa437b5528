use crate::core::geometry::{Container, Geometry, GeometryError};
use crate::core::models::ensemble::Ensemble;
use crate::core::models::ids::ParticleId;
use crate::core::models::point::Point;

/// A proposed volume change: the geometry before and after, and the coordinate map
/// between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeTrial {
    previous: Geometry,
    proposed: Geometry,
}

impl VolumeTrial {
    pub fn propose(current: &Geometry, new_volume: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            previous: *current,
            proposed: current.with_volume(new_volume)?,
        })
    }

    pub fn previous(&self) -> &Geometry {
        &self.previous
    }

    pub fn proposed(&self) -> &Geometry {
        &self.proposed
    }

    pub fn old_volume(&self) -> f64 {
        self.previous.volume()
    }

    pub fn new_volume(&self) -> f64 {
        self.proposed.volume()
    }

    /// `ln(V_new / V_old)`.
    pub fn ln_volume_ratio(&self) -> f64 {
        (self.new_volume() / self.old_volume()).ln()
    }

    /// Maps a point of the old geometry onto the proposed one.
    #[inline]
    pub fn scale_point(&self, point: &Point) -> Point {
        self.proposed
            .scale(point, self.proposed.linear_dimension())
    }
}

/// Tries a volume change on a whole configuration.
///
/// Swaps in the resized geometry, rescales every particle position, then asks `decide`
/// whether to keep the result. On rejection the previous geometry and the exact previous
/// positions are put back. Returns whether the change was kept.
///
/// # Errors
///
/// Returns the geometry's error if it cannot take `new_volume`; nothing is modified.
pub fn volume_transaction<F>(
    geometry: &mut Geometry,
    ensemble: &mut Ensemble,
    new_volume: f64,
    decide: F,
) -> Result<bool, GeometryError>
where
    F: FnOnce(&VolumeTrial, &Ensemble) -> bool,
{
    // 1. Propose and record the current state.
    let trial = VolumeTrial::propose(geometry, new_volume)?;
    let saved: Vec<(ParticleId, Point)> = ensemble
        .iter()
        .map(|(id, particle)| (id, *particle.position()))
        .collect();

    // 2. Apply.
    *geometry = *trial.proposed();
    for (_, particle) in ensemble.iter_mut() {
        let scaled = trial.scale_point(particle.position());
        particle.set_position(scaled);
    }

    // 3. Keep or revert.
    if decide(&trial, ensemble) {
        return Ok(true);
    }
    *geometry = *trial.previous();
    for (id, position) in saved {
        ensemble.set_position(id, position);
    }
    Ok(false)
}
