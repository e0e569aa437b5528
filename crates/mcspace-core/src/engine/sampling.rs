use super::error::EngineError;
use super::shared::SharedGeometry;
use crate::core::geometry::Container;
use crate::core::models::point::Point;
use crate::core::random::SharedRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Draws `count` independent uniform positions from a shared container.
///
/// With the `parallel` feature the draws are spread over the rayon pool; every worker
/// reads the geometry under its lock and pulls numbers from `rng` one at a time.
#[instrument(skip(geometry, rng), name = "sample_positions")]
pub fn sample_positions(
    geometry: &SharedGeometry,
    rng: &SharedRng,
    count: usize,
    max_attempts: usize,
) -> Result<Vec<Point>, EngineError> {
    let draw = |_: usize| {
        let mut source = rng;
        geometry.read(|g| g.random_position_with(&mut source, max_attempts))
    };

    let iterator = 0..count;

    #[cfg(feature = "parallel")]
    let iterator = iterator.into_par_iter();

    let points = iterator.map(draw).collect::<Result<Vec<_>, _>>()?;

    debug!(count = points.len(), "Sampled positions.");
    Ok(points)
}

/// Counts how many `points` fall into each of `bins` equal slices of `[lower, upper]`
/// along `axis` (0 = x, 1 = y, 2 = z).
///
/// A coordinate equal to `upper` lands in the last bin; coordinates outside the range
/// are not counted.
pub fn axis_histogram(
    points: &[Point],
    axis: usize,
    lower: f64,
    upper: f64,
    bins: usize,
) -> Vec<usize> {
    let mut counts = vec![0; bins];
    let width = upper - lower;
    if bins == 0 || width.is_nan() || width <= 0.0 || axis > 2 {
        return counts;
    }
    for p in points {
        let x = p[axis];
        if x < lower || x > upper {
            continue;
        }
        let bin = (((x - lower) / width) * bins as f64) as usize;
        counts[bin.min(bins - 1)] += 1;
    }
    counts
}
