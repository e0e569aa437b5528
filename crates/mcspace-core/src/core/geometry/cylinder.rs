use super::sampling::rejection_sample;
use super::{Container, GeometryError, format_info, require_positive, require_volume};
use crate::core::models::point::Point;
use crate::core::random::RandomSource;
use std::f64::consts::PI;

/// A hard-walled cylinder along z, of radius `radius`, spanning `0 <= z <= length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    radius: f64,
    radius_sq: f64,
    length: f64,
    scale_origin: f64,
}

impl Cylinder {
    pub fn new(radius: f64, length: f64) -> Result<Self, GeometryError> {
        let radius = require_positive("radius", radius)?;
        let length = require_positive("length", length)?;
        Ok(Self::build(radius, length, length))
    }

    fn build(radius: f64, length: f64, scale_origin: f64) -> Self {
        Self {
            radius,
            radius_sq: radius * radius,
            length,
            scale_origin,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }
}

impl Container for Cylinder {
    #[inline]
    fn collision(&self, point: &Point) -> bool {
        point.x * point.x + point.y * point.y > self.radius_sq
            || point.z < 0.0
            || point.z > self.length
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
            &Point::new(-r, -r, 0.0),
            &Point::new(r, r, self.length),
            |p| self.collision(p),
        )
    }

    fn volume(&self) -> f64 {
        PI * self.radius_sq * self.length
    }

    /// Scales radius and length by the same factor.
    fn set_volume(&mut self, volume: f64) -> Result<(), GeometryError> {
        let volume = require_volume(volume)?;
        let factor = (volume / self.volume()).cbrt();
        let radius = require_positive("radius", self.radius * factor)?;
        let length = require_positive("length", self.length * factor)?;
        *self = Self::build(radius, length, self.length);
        Ok(())
    }

    fn linear_dimension(&self) -> f64 {
        self.length
    }

    fn scale_origin(&self) -> f64 {
        self.scale_origin
    }

    fn periodicity(&self) -> [bool; 3] {
        [false; 3]
    }

    fn info(&self) -> String {
        format_info(
            "Cylinder",
            &[
                ("Boundary", "hard wall".to_string()),
                ("Radius", format!("{:.3} Å", self.radius)),
                ("Length", format!("{:.3} Å", self.length)),
                ("Volume", format!("{:.3} Å³", self.volume())),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::UniformRng;

    #[test]
    fn collision_checks_radial_wall_and_end_caps() {
        let cyl = Cylinder::new(5.0, 20.0).unwrap();
        assert!(!cyl.collision(&Point::new(3.0, 4.0, 0.0)));
        assert!(!cyl.collision(&Point::new(0.0, 0.0, 20.0)));
        assert!(cyl.collision(&Point::new(3.0, 4.0001, 10.0)));
        assert!(cyl.collision(&Point::new(0.0, 0.0, -0.0001)));
        assert!(cyl.collision(&Point::new(0.0, 0.0, 20.0001)));
    }

    #[test]
    fn volume_is_base_area_times_length() {
        let cyl = Cylinder::new(2.0, 10.0).unwrap();
        assert!((cyl.volume() - 40.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn set_volume_scales_radius_and_length_together() {
        let mut cyl = Cylinder::new(2.0, 10.0).unwrap();
        cyl.set_volume(cyl.volume() * 27.0).unwrap();
        assert!((cyl.radius() - 6.0).abs() < 1e-9);
        assert!((cyl.length() - 30.0).abs() < 1e-9);
        assert_eq!(cyl.scale_origin(), 10.0);
    }

    #[test]
    fn random_positions_cover_the_full_length() {
        let cyl = Cylinder::new(1.0, 10.0).unwrap();
        let mut rng = UniformRng::seeded(31);
        let mut lower_half = 0;
        let n = 20_000;
        for _ in 0..n {
            let p = cyl.random_position(&mut rng).unwrap();
            assert!(!cyl.collision(&p));
            if p.z < 5.0 {
                lower_half += 1;
            }
        }
        let fraction = lower_half as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.02);
    }

    #[test]
    fn new_rejects_invalid_dimensions() {
        assert!(matches!(
            Cylinder::new(1.0, 0.0),
            Err(GeometryError::InvalidParameter { name: "length", .. })
        ));
        assert!(matches!(
            Cylinder::new(-1.0, 1.0),
            Err(GeometryError::InvalidParameter { name: "radius", .. })
        ));
    }
}
