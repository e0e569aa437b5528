use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A Cartesian coordinate or displacement vector in Angstroms.
///
/// `Point` is a plain value type backed by [`nalgebra::Vector3`]. Its components are
/// reachable as `p.x`, `p.y` and `p.z` through `Deref`, and it converts to and from the
/// underlying nalgebra vector whenever linear algebra beyond the distance kernels is
/// needed.
///
/// The distance operations here are the plain Euclidean ones. Boundary-aware distances
/// belong to the container, see [`crate::core::geometry::Container`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point(Vector3<f64>);

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[inline]
    pub fn origin() -> Self {
        Self(Vector3::zeros())
    }

    #[inline]
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.0.dot(&other.0)
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Multiplies two vectors element by element.
    #[inline]
    pub fn component_mul(&self, other: &Point) -> Point {
        Self(self.0.component_mul(&other.0))
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Prefer this over [`Point::dist`] whenever distances are only compared or ranked.
    #[inline]
    pub fn sqdist(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn dist(&self, other: &Point) -> f64 {
        self.sqdist(other).sqrt()
    }

    /// Reciprocal distance, `1 / sqrt(sqdist)`, for kernels that need `1/r` directly.
    ///
    /// Coincident points give `f64::INFINITY`.
    #[inline]
    pub fn invdist(&self, other: &Point) -> f64 {
        self.sqdist(other).sqrt().recip()
    }
}

impl Deref for Point {
    type Target = Vector3<f64>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Point {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vector3<f64>> for Point {
    fn from(v: Vector3<f64>) -> Self {
        Self(v)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(p: Point) -> Self {
        p.0
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Self(-self.0)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, factor: f64) -> Point {
        Self(self.0 * factor)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    #[inline]
    fn mul(self, point: Point) -> Point {
        point * self
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.0 -= rhs.0;
    }
}

impl MulAssign<f64> for Point {
    #[inline]
    fn mul_assign(&mut self, factor: f64) {
        self.0 *= factor;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.p$}, {:.p$}, {:.p$})", self.x, self.y, self.z),
            None => write!(f, "({}, {}, {})", self.x, self.y, self.z),
        }
    }
}
