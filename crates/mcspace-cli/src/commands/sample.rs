use crate::cli::SampleArgs;
use crate::config::PartialSimulationConfig;
use crate::error::{CliError, Result};
use mcspace::core::geometry::Geometry;
use mcspace::core::models::point::Point;
use mcspace::core::random::{SharedRng, UniformRng};
use mcspace::engine::error::EngineError;
use mcspace::engine::sampling::{axis_histogram, sample_positions};
use mcspace::engine::shared::SharedGeometry;
use serde::Serialize;
use std::path::Path;
use tracing::info;

const AXES: [&str; 3] = ["x", "y", "z"];
const BAR_WIDTH: usize = 40;

#[derive(Serialize)]
struct PositionRecord {
    x: f64,
    y: f64,
    z: f64,
}

pub fn run(args: SampleArgs) -> Result<()> {
    if args.bins == 0 {
        return Err(CliError::Argument("--bins must be at least 1".to_string()));
    }

    let mut partial = PartialSimulationConfig::from_file(&args.config)?;
    partial.override_seed(args.seed);
    let config = partial.resolve()?;

    let geometry = config.geometry.build().map_err(EngineError::from)?;
    let shared = SharedGeometry::new(geometry);
    let rng = match config.seed {
        Some(seed) => SharedRng::seeded(seed),
        None => SharedRng::new(UniformRng::from_entropy()),
    };

    info!(
        geometry = %geometry.kind(),
        count = args.count,
        "Sampling uniform positions."
    );
    let points = sample_positions(&shared, &rng, args.count, config.max_attempts)?;

    println!("Sampled {} position(s) in {}.", points.len(), geometry.kind());
    print!("{}", render_histograms(&geometry, &points, args.bins));

    if let Some(path) = &args.output {
        write_csv(path, &points)?;
        println!("✓ Positions written to: {}", path.display());
    }
    Ok(())
}

fn render_histograms(geometry: &Geometry, points: &[Point], bins: usize) -> String {
    let (lower, upper) = geometry.bounding_box();
    let mut out = String::new();
    for (axis, name) in AXES.iter().enumerate() {
        let counts = axis_histogram(points, axis, lower[axis], upper[axis], bins);
        let peak = counts.iter().copied().max().unwrap_or(0).max(1);
        let width = (upper[axis] - lower[axis]) / bins as f64;
        out.push_str(&format!(
            "Histogram along {} [{:.3}, {:.3}]\n",
            name, lower[axis], upper[axis]
        ));
        for (i, count) in counts.iter().enumerate() {
            let start = lower[axis] + i as f64 * width;
            out.push_str(&format!(
                "  {:>10.3} {:>8} {}\n",
                start,
                count,
                "#".repeat(count * BAR_WIDTH / peak)
            ));
        }
    }
    out
}

fn write_csv(path: &Path, points: &[Point]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for p in points {
        writer.serialize(PositionRecord {
            x: p.x,
            y: p.y,
            z: p.z,
        })?;
    }
    writer.flush()?;
    Ok(())
}
