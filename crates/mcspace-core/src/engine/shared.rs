use crate::core::geometry::{Container, Geometry, GeometryError};
use parking_lot::RwLock;
use std::sync::Arc;

/// A container shared between threads.
///
/// Readers (distance, collision and sampling queries) run concurrently. A volume change
/// takes the write lock and replaces the whole geometry value in one step, so no reader
/// ever sees a half-updated shape.
#[derive(Debug, Clone)]
pub struct SharedGeometry {
    inner: Arc<RwLock<Geometry>>,
}

impl SharedGeometry {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(geometry)),
        }
    }

    /// A copy of the current geometry.
    pub fn snapshot(&self) -> Geometry {
        *self.inner.read()
    }

    /// Runs `f` against the current geometry under the read lock.
    pub fn read<T>(&self, f: impl FnOnce(&Geometry) -> T) -> T {
        f(&self.inner.read())
    }

    /// Swaps in `geometry` and returns the previous one.
    pub fn replace(&self, geometry: Geometry) -> Geometry {
        std::mem::replace(&mut *self.inner.write(), geometry)
    }

    /// Resizes the shared geometry, returning the value it had before.
    ///
    /// On error nothing changes.
    pub fn try_set_volume(&self, volume: f64) -> Result<Geometry, GeometryError> {
        let mut guard = self.inner.write();
        let previous = *guard;
        guard.set_volume(volume)?;
        Ok(previous)
    }

    /// Puts back a value previously returned by [`SharedGeometry::try_set_volume`].
    pub fn restore(&self, previous: Geometry) {
        *self.inner.write() = previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Cuboid, Sphere};
    use crate::core::models::point::Point;
    use std::thread;

    #[test]
    fn try_set_volume_then_restore_returns_exact_previous_value() {
        let shared = SharedGeometry::new(Cuboid::new(10.0).unwrap().into());
        let before = shared.snapshot();

        let previous = shared.try_set_volume(8000.0).unwrap();
        assert_eq!(previous, before);
        assert!((shared.snapshot().linear_dimension() - 20.0).abs() < 1e-12);

        shared.restore(previous);
        assert_eq!(shared.snapshot(), before);
    }

    #[test]
    fn failed_volume_change_leaves_geometry_untouched() {
        let shared = SharedGeometry::new(Sphere::new(3.0).unwrap().into());
        let before = shared.snapshot();
        assert_eq!(
            shared.try_set_volume(-5.0),
            Err(GeometryError::InvalidVolume(-5.0))
        );
        assert_eq!(shared.snapshot(), before);
    }

    #[test]
    fn replace_swaps_whole_value() {
        let shared = SharedGeometry::new(Sphere::new(3.0).unwrap().into());
        let old = shared.replace(Cuboid::new(4.0).unwrap().into());
        assert_eq!(old, Geometry::from(Sphere::new(3.0).unwrap()));
        assert_eq!(shared.read(|g| g.linear_dimension()), 4.0);
    }

    #[test]
    fn readers_observe_consistent_geometry_while_volume_changes() {
        let shared = SharedGeometry::new(Cuboid::new(10.0).unwrap().into());
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 1..200 {
                    let len = 10.0 + (i % 7) as f64;
                    shared.try_set_volume(len * len * len).unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        shared.read(|g| {
                            let half = 0.5 * g.linear_dimension();
                            // Cached half length and defining length always agree.
                            assert!(!g.collision(&Point::new(half, 0.0, 0.0)));
                            assert!(g.collision(&Point::new(half * 1.0001, 0.0, 0.0)));
                        });
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
