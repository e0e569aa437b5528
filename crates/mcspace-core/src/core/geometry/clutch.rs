use super::sampling::rejection_sample;
use super::{Container, GeometryError, format_info, require_positive, require_volume};
use crate::core::models::point::Point;
use crate::core::random::RandomSource;
use std::f64::consts::PI;

/// A hard-walled sphere with the band `zmin < z < zmax` cut out of it.
///
/// Points on the band edges are allowed. The band may extend past the sphere; only the
/// part inside it removes volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clutch {
    radius: f64,
    radius_sq: f64,
    zmin: f64,
    zmax: f64,
    scale_origin: f64,
}

impl Clutch {
    pub fn new(radius: f64, zmin: f64, zmax: f64) -> Result<Self, GeometryError> {
        let radius = require_positive("radius", radius)?;
        if !(zmin.is_finite() && zmax.is_finite() && zmin < zmax) {
            return Err(GeometryError::InvalidExclusionBand { zmin, zmax });
        }
        Ok(Self::build(radius, zmin, zmax, radius))
    }

    fn build(radius: f64, zmin: f64, zmax: f64, scale_origin: f64) -> Self {
        Self {
            radius,
            radius_sq: radius * radius,
            zmin,
            zmax,
            scale_origin,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The excluded band as `(zmin, zmax)`.
    #[inline]
    pub fn band(&self) -> (f64, f64) {
        (self.zmin, self.zmax)
    }

    /// Volume of the sphere slice between `a` and `b`, both within `[-r, r]`.
    fn slice_volume(&self, a: f64, b: f64) -> f64 {
        let antiderivative = |z: f64| self.radius_sq * z - z * z * z / 3.0;
        PI * (antiderivative(b) - antiderivative(a))
    }

    fn sphere_volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    fn excluded_volume(&self) -> f64 {
        let a = self.zmin.max(-self.radius);
        let b = self.zmax.min(self.radius);
        if a < b { self.slice_volume(a, b) } else { 0.0 }
    }
}

impl Container for Clutch {
    #[inline]
    fn collision(&self, point: &Point) -> bool {
        (point.z > self.zmin && point.z < self.zmax) || point.norm_squared() > self.radius_sq
    }

    #[inline]
    fn boundary(&self, _point: &mut Point) {}

    #[inline]
    fn sqdist(&self, a: &Point, b: &Point) -> f64 {
        a.sqdist(b)
    }

    fn random_position_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Point, GeometryError> {
        let r = self.radius;
        rejection_sample(
            rng,
            max_attempts,
            &Point::new(-r, -r, -r),
            &Point::new(r, r, r),
            |p| self.collision(p),
        )
    }

    /// Sphere volume minus the part of the band inside it.
    fn volume(&self) -> f64 {
        (self.sphere_volume() - self.excluded_volume()).max(0.0)
    }

    /// Scales the radius and both band edges by the same factor.
    fn set_volume(&mut self, volume: f64) -> Result<(), GeometryError> {
        let volume = require_volume(volume)?;
        let current = self.volume();
        if current <= 1e-12 * self.sphere_volume() {
            return Err(GeometryError::EmptyVolume);
        }
        let factor = (volume / current).cbrt();
        let radius = require_positive("radius", self.radius * factor)?;
        *self = Self::build(radius, self.zmin * factor, self.zmax * factor, self.radius);
        Ok(())
    }

    fn linear_dimension(&self) -> f64 {
        self.radius
    }

    fn scale_origin(&self) -> f64 {
        self.scale_origin
    }

    fn periodicity(&self) -> [bool; 3] {
        [false; 3]
    }

    fn info(&self) -> String {
        format_info(
            "Clutch",
            &[
                ("Boundary", "hard wall".to_string()),
                ("Radius", format!("{:.3} Å", self.radius)),
                (
                    "Excluded band",
                    format!("{:.3} < z < {:.3} Å", self.zmin, self.zmax),
                ),
                ("Volume", format!("{:.3} Å³", self.volume())),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::UniformRng;

    fn f64_approx_equal(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn band_interior_collides_and_caps_do_not() {
        let clutch = Clutch::new(10.0, -1.0, 1.0).unwrap();
        assert!(clutch.collision(&Point::origin()));
        assert!(!clutch.collision(&Point::new(0.0, 0.0, 5.0)));
        assert!(!clutch.collision(&Point::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn band_edges_are_allowed() {
        let clutch = Clutch::new(10.0, -1.0, 1.0).unwrap();
        assert!(!clutch.collision(&Point::new(0.0, 0.0, 1.0)));
        assert!(!clutch.collision(&Point::new(0.0, 0.0, -1.0)));
        assert!(clutch.collision(&Point::new(0.0, 0.0, 0.9999)));
    }

    #[test]
    fn outer_sphere_still_applies() {
        let clutch = Clutch::new(10.0, -1.0, 1.0).unwrap();
        assert!(!clutch.collision(&Point::new(0.0, 0.0, 10.0)));
        assert!(clutch.collision(&Point::new(0.0, 0.0, 10.0001)));
    }

    #[test]
    fn new_rejects_inverted_or_empty_band() {
        assert_eq!(
            Clutch::new(10.0, 1.0, -1.0),
            Err(GeometryError::InvalidExclusionBand {
                zmin: 1.0,
                zmax: -1.0
            })
        );
        assert!(Clutch::new(10.0, 2.0, 2.0).is_err());
        assert!(Clutch::new(10.0, f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn volume_excludes_band_slice() {
        let clutch = Clutch::new(1.0, -1.0, 0.0).unwrap();
        let hemisphere = 2.0 / 3.0 * PI;
        assert!(f64_approx_equal(clutch.volume(), hemisphere, 1e-12));

        let outside = Clutch::new(1.0, 5.0, 6.0).unwrap();
        assert!(f64_approx_equal(outside.volume(), 4.0 / 3.0 * PI, 1e-12));
    }

    #[test]
    fn band_spanning_the_sphere_exhausts_sampling() {
        let clutch = Clutch::new(1.0, -1.0, 1.0).unwrap();
        let mut rng = UniformRng::seeded(4);
        assert_eq!(
            clutch.random_position_with(&mut rng, 500),
            Err(GeometryError::SamplingExhausted { attempts: 500 })
        );
        assert!(clutch.volume() < 1e-12);
    }

    #[test]
    fn set_volume_on_empty_clutch_fails_without_change() {
        let mut clutch = Clutch::new(1.0, -2.0, 2.0).unwrap();
        let before = clutch;
        assert_eq!(clutch.set_volume(10.0), Err(GeometryError::EmptyVolume));
        assert_eq!(clutch, before);
    }

    #[test]
    fn set_volume_scales_radius_and_band() {
        let mut clutch = Clutch::new(10.0, -1.0, 1.0).unwrap();
        clutch.set_volume(clutch.volume() * 8.0).unwrap();
        assert!(f64_approx_equal(clutch.radius(), 20.0, 1e-9));
        let (zmin, zmax) = clutch.band();
        assert!(f64_approx_equal(zmin, -2.0, 1e-9));
        assert!(f64_approx_equal(zmax, 2.0, 1e-9));
        assert_eq!(clutch.scale_origin(), 10.0);
    }

    #[test]
    fn random_positions_avoid_the_band() {
        let clutch = Clutch::new(5.0, -2.0, 1.0).unwrap();
        let mut rng = UniformRng::seeded(6);
        for _ in 0..5000 {
            let p = clutch.random_position(&mut rng).unwrap();
            assert!(p.z <= -2.0 || p.z >= 1.0);
            assert!(p.norm_squared() <= 25.0);
        }
    }
}
