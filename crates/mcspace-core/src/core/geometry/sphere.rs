use super::sampling::rejection_sample;
use super::{Container, GeometryError, format_info, require_positive, require_volume};
use crate::core::models::point::Point;
use crate::core::random::RandomSource;
use std::f64::consts::PI;

/// A hard-walled sphere of radius `radius` centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    radius: f64,
    radius_sq: f64,
    scale_origin: f64,
}

impl Sphere {
    pub fn new(radius: f64) -> Result<Self, GeometryError> {
        let radius = require_positive("radius", radius)?;
        Ok(Self::build(radius, radius))
    }

    fn build(radius: f64, scale_origin: f64) -> Self {
        Self {
            radius,
            radius_sq: radius * radius,
            scale_origin,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Container for Sphere {
    #[inline]
    fn collision(&self, point: &Point) -> bool {
        point.norm_squared() > self.radius_sq
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

    fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), GeometryError> {
        let volume = require_volume(volume)?;
        let radius = require_positive("radius", (3.0 * volume / (4.0 * PI)).cbrt())?;
        *self = Self::build(radius, self.radius);
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
            "Sphere",
            &[
                ("Boundary", "hard wall".to_string()),
                ("Radius", format!("{:.3} Å", self.radius)),
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
    fn points_on_the_surface_are_inside() {
        let sphere = Sphere::new(5.0).unwrap();
        assert!(!sphere.collision(&Point::new(5.0, 0.0, 0.0)));
        assert!(!sphere.collision(&Point::new(0.0, -5.0, 0.0)));
        assert!(!sphere.collision(&Point::new(3.0, 4.0, 0.0)));
    }

    #[test]
    fn points_just_outside_collide() {
        let sphere = Sphere::new(5.0).unwrap();
        assert!(sphere.collision(&Point::new(5.0001, 0.0, 0.0)));
        assert!(sphere.collision(&Point::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn boundary_is_a_no_op() {
        let sphere = Sphere::new(5.0).unwrap();
        let mut p = Point::new(10.0, -20.0, 30.0);
        sphere.boundary(&mut p);
        assert_eq!(p, Point::new(10.0, -20.0, 30.0));
    }

    #[test]
    fn set_volume_recomputes_radius_and_remembers_old_one() {
        let mut sphere = Sphere::new(5.0).unwrap();
        let target = 4.0 / 3.0 * PI * 1000.0;
        sphere.set_volume(target).unwrap();
        assert!((sphere.radius() - 10.0).abs() < 1e-12);
        assert_eq!(sphere.scale_origin(), 5.0);
        assert!(!sphere.collision(&Point::new(9.9, 0.0, 0.0)));
    }

    #[test]
    fn random_positions_have_uniform_radial_distribution() {
        let sphere = Sphere::new(1.0).unwrap();
        let mut rng = UniformRng::seeded(77);
        let n = 50_000;
        // A uniform ball has P(r < 1/2) = 1/8.
        let inner = (0..n)
            .map(|_| sphere.random_position(&mut rng).unwrap())
            .filter(|p| p.norm() < 0.5)
            .count();
        let fraction = inner as f64 / n as f64;
        assert!((fraction - 0.125).abs() < 0.01);
    }

    #[test]
    fn zero_attempts_exhausts_immediately() {
        let sphere = Sphere::new(1.0).unwrap();
        let mut rng = UniformRng::seeded(1);
        assert_eq!(
            sphere.random_position_with(&mut rng, 0),
            Err(GeometryError::SamplingExhausted { attempts: 0 })
        );
    }

    #[test]
    fn new_rejects_invalid_radius() {
        assert_eq!(
            Sphere::new(-1.0),
            Err(GeometryError::InvalidParameter {
                name: "radius",
                value: -1.0
            })
        );
        assert!(Sphere::new(f64::NAN).is_err());
    }
}
