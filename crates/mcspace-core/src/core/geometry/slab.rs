use super::cell::PeriodicAxis;
use super::{Container, GeometryError, format_info};
use crate::core::models::point::Point;
use crate::core::random::RandomSource;

/// A cube of side `len` centered on the origin, periodic in x and y with hard walls
/// at `z = ±len/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    axis: PeriodicAxis,
    scale_origin: f64,
}

impl Slab {
    pub fn new(len: f64) -> Result<Self, GeometryError> {
        let axis = PeriodicAxis::new(len)?;
        Ok(Self {
            axis,
            scale_origin: axis.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> f64 {
        self.axis.len()
    }

    /// Position of the upper wall; the lower one sits at the negated value.
    #[inline]
    pub fn wall(&self) -> f64 {
        self.axis.len_half()
    }
}

impl Container for Slab {
    #[inline]
    fn collision(&self, point: &Point) -> bool {
        self.axis.outside(point.x) || self.axis.outside(point.y) || self.axis.outside(point.z)
    }

    #[inline]
    fn boundary(&self, point: &mut Point) {
        point.x = self.axis.wrap(point.x);
        point.y = self.axis.wrap(point.y);
    }

    #[inline]
    fn sqdist(&self, a: &Point, b: &Point) -> f64 {
        let dx = self.axis.minimum_image(a.x - b.x);
        let dy = self.axis.minimum_image(a.y - b.y);
        let dz = a.z - b.z;
        dx * dx + dy * dy + dz * dz
    }

    fn random_position_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        _max_attempts: usize,
    ) -> Result<Point, GeometryError> {
        let len = self.len();
        Ok(Point::new(rng.half() * len, rng.half() * len, rng.half() * len))
    }

    fn volume(&self) -> f64 {
        self.len().powi(3)
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), GeometryError> {
        let axis = PeriodicAxis::for_cube_volume(volume)?;
        *self = Self {
            axis,
            scale_origin: self.len(),
        };
        Ok(())
    }

    fn linear_dimension(&self) -> f64 {
        self.len()
    }

    fn scale_origin(&self) -> f64 {
        self.scale_origin
    }

    fn periodicity(&self) -> [bool; 3] {
        [true, true, false]
    }

    fn info(&self) -> String {
        format_info(
            "Slab",
            &[
                ("Boundary", "periodic x, y; walls in z".to_string()),
                ("Side length", format!("{:.3} Å", self.len())),
                ("Walls", format!("z = ±{:.3} Å", self.wall())),
                ("Volume", format!("{:.3} Å³", self.volume())),
            ],
        )
    }
}
