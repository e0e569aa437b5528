use super::GeometryError;
use crate::core::models::point::Point;
use crate::core::random::RandomSource;

/// Uniform point in the axis-aligned box `[lower, upper)`.
#[inline]
pub(crate) fn uniform_in_box<R: RandomSource + ?Sized>(
    rng: &mut R,
    lower: &Point,
    upper: &Point,
) -> Point {
    let span = *upper - *lower;
    Point::new(
        lower.x + rng.uniform() * span.x,
        lower.y + rng.uniform() * span.y,
        lower.z + rng.uniform() * span.z,
    )
}

/// Draws from the enclosing box until `rejects` lets a point through.
pub(crate) fn rejection_sample<R, F>(
    rng: &mut R,
    max_attempts: usize,
    lower: &Point,
    upper: &Point,
    rejects: F,
) -> Result<Point, GeometryError>
where
    R: RandomSource + ?Sized,
    F: Fn(&Point) -> bool,
{
    for _ in 0..max_attempts {
        let candidate = uniform_in_box(rng, lower, upper);
        if !rejects(&candidate) {
            return Ok(candidate);
        }
    }
    Err(GeometryError::SamplingExhausted {
        attempts: max_attempts,
    })
}
