use crate::cli::InfoArgs;
use crate::config::PartialSimulationConfig;
use crate::error::Result;
use mcspace::core::geometry::{Container, Geometry};
use mcspace::engine::config::SimulationConfig;
use mcspace::engine::error::EngineError;
use mcspace::engine::mcloop::McLoop;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    let config = PartialSimulationConfig::from_file(&args.config)?.resolve()?;
    let geometry = config.geometry.build().map_err(EngineError::from)?;
    info!(geometry = %geometry.kind(), "Configuration is valid.");

    print!("{}", render(&config, &geometry));
    Ok(())
}

fn render(config: &SimulationConfig, geometry: &Geometry) -> String {
    let (lower, upper) = geometry.bounding_box();
    let mut out = geometry.info();
    out.push_str(&format!(
        "  {:<18} = {} .. {}\n",
        "Bounding box", lower, upper
    ));
    out.push_str(&McLoop::new(&config.mcloop).info());

    out.push_str("Moves\n");
    out.push_str(&format!(
        "  {:<18} = {}\n",
        "Displacement", config.moves.displacement
    ));
    match config.moves.pressure {
        Some(pressure) => {
            out.push_str(&format!("  {:<18} = {}\n", "Pressure", pressure));
            out.push_str(&format!(
                "  {:<18} = {}\n",
                "ln V step", config.moves.volume_displacement
            ));
        }
        None => out.push_str(&format!("  {:<18} = {}\n", "Pressure", "off (NVT)")),
    }

    out.push_str("Particles\n");
    if config.particles.is_empty() {
        out.push_str("  (none)\n");
    }
    for spec in &config.particles {
        out.push_str(&format!(
            "  {:<6} x {:<6} radius {:.3}  charge {:+.3}  mass {:.3}\n",
            spec.species.symbol(), spec.count, spec.radius, spec.charge, spec.mass
        ));
    }
    out.push_str(&format!(
        "  {:<18} = {}\n  {:<18} = {}\n",
        "Replicas",
        config.replicas,
        "Seed",
        config
            .seed
            .map_or_else(|| "from entropy".to_string(), |s| s.to_string())
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcspace::core::models::species::Species;
    use mcspace::engine::config::{GeometryConfig, ParticleSpec, SimulationConfigBuilder};

    #[test]
    fn render_lists_geometry_loop_and_particles() {
        let config = SimulationConfigBuilder::new()
            .geometry(GeometryConfig::Cylinder {
                radius: 5.0,
                length: 20.0,
            })
            .particle(ParticleSpec {
                species: Species::Na,
                count: 3,
                radius: 1.0,
                charge: 1.0,
                mass: 22.99,
            })
            .seed(5)
            .build()
            .unwrap();
        let geometry = config.geometry.build().unwrap();
        let text = render(&config, &geometry);

        assert!(text.contains("Geometry: Cylinder"));
        assert!(text.contains("Bounding box"));
        assert!(text.contains("10 x 1000 = 10000"));
        assert!(text.contains("off (NVT)"));
        assert!(text.contains("NA"));
        assert!(text.contains("Seed"));
    }
}
