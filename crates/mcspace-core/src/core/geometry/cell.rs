use super::{GeometryError, require_positive, require_volume};

/// One periodic axis of length `len`, with the derived quantities cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PeriodicAxis {
    len: f64,
    len_half: f64,
    len_inv: f64,
}

impl PeriodicAxis {
    pub(crate) fn new(len: f64) -> Result<Self, GeometryError> {
        let len = require_positive("side length", len)?;
        Ok(Self {
            len,
            len_half: 0.5 * len,
            len_inv: 1.0 / len,
        })
    }

    /// The axis of a cube with the given volume.
    pub(crate) fn for_cube_volume(volume: f64) -> Result<Self, GeometryError> {
        Self::new(require_volume(volume)?.cbrt())
    }

    #[inline]
    pub(crate) fn len(&self) -> f64 {
        self.len
    }

    #[inline]
    pub(crate) fn len_half(&self) -> f64 {
        self.len_half
    }

    /// True if `x` lies beyond either wall of the central cell.
    #[inline]
    pub(crate) fn outside(&self, x: f64) -> bool {
        x.abs() > self.len_half
    }

    /// Minimum-image reduction of a separation.
    ///
    /// Separations of exactly half a cell are left as they are.
    #[inline]
    pub(crate) fn minimum_image(&self, d: f64) -> f64 {
        if d.abs() > self.len_half {
            d - self.len * (d * self.len_inv).round()
        } else {
            d
        }
    }

    /// Folds a coordinate into `[-len/2, len/2]`.
    #[inline]
    pub(crate) fn wrap(&self, x: f64) -> f64 {
        let folded = self.minimum_image(x);
        // Rounding of `x * len_inv` can leave the fold one ulp past the wall.
        if folded > self.len_half {
            folded - self.len
        } else if folded < -self.len_half {
            folded + self.len
        } else {
            folded
        }
    }
}
