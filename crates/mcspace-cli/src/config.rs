mod defaults;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use mcspace::core::geometry::GeometryKind;
use mcspace::core::models::species::Species;
use mcspace::engine::config::{
    GeometryConfig, GeometryConfigBuilder, LoopConfig, MoveConfig, ParticleSpec,
    SimulationConfig, SimulationConfigBuilder,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGeometryConfig {
    #[serde(rename = "type")]
    kind: Option<String>,
    radius: Option<f64>,
    len: Option<f64>,
    length: Option<f64>,
    zmin: Option<f64>,
    zmax: Option<f64>,
}

impl PartialGeometryConfig {
    fn build(&self) -> Result<GeometryConfig> {
        let mut builder = GeometryConfigBuilder::new();
        if let Some(name) = &self.kind {
            let kind = GeometryKind::from_str(name).map_err(|_| {
                CliError::Config(format!(
                    "Unknown geometry type '{}'. Expected one of: sphere, cuboid, slab, cylinder, clutch.",
                    name
                ))
            })?;
            builder = builder.kind(kind);
        }
        if let Some(radius) = self.radius {
            builder = builder.radius(radius);
        }
        if let Some(len) = self.len {
            builder = builder.len(len);
        }
        if let Some(length) = self.length {
            builder = builder.length(length);
        }
        if let Some(zmin) = self.zmin {
            builder = builder.zmin(zmin);
        }
        if let Some(zmax) = self.zmax {
            builder = builder.zmax(zmax);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLoopConfig {
    #[serde(rename = "macro")]
    macro_steps: Option<usize>,
    #[serde(rename = "micro")]
    micro_steps: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMoveConfig {
    displacement: Option<f64>,
    #[serde(rename = "volume-displacement")]
    volume_displacement: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSamplingConfig {
    #[serde(rename = "max-attempts")]
    max_attempts: Option<usize>,
    seed: Option<u64>,
    replicas: Option<usize>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct PartialParticleSpec {
    species: String,
    count: usize,
    radius: Option<f64>,
    charge: Option<f64>,
    mass: Option<f64>,
}

impl PartialParticleSpec {
    fn into_spec(self, defaults: &DefaultsConfig) -> Result<ParticleSpec> {
        let species = Species::from_str(&self.species)
            .map_err(|e| CliError::Config(format!("Invalid particle entry: {}", e)))?;
        Ok(ParticleSpec {
            species,
            count: self.count,
            radius: self.radius.unwrap_or(defaults.particle_radius),
            charge: self.charge.unwrap_or(defaults.particle_charge),
            mass: self.mass.unwrap_or(defaults.particle_mass),
        })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSimulationConfig {
    geometry: Option<PartialGeometryConfig>,
    mcloop: Option<PartialLoopConfig>,
    moves: Option<PartialMoveConfig>,
    sampling: Option<PartialSamplingConfig>,
    particles: Option<Vec<PartialParticleSpec>>,
}

impl PartialSimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Replaces the seed from the file when `seed` is set.
    pub fn override_seed(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.sampling.get_or_insert_with(Default::default).seed = Some(seed);
        }
    }

    /// Applies the `run` command's flags and `--set` values on top of the file, then
    /// resolves the result.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<SimulationConfig> {
        self.apply_set_values(&args.set_values)?;
        self.override_seed(args.seed);

        let sampling = self.sampling.get_or_insert_with(Default::default);
        if let Some(replicas) = args.replicas {
            sampling.replicas = Some(replicas);
        }
        let mcloop = self.mcloop.get_or_insert_with(Default::default);
        if let Some(macro_steps) = args.macro_steps {
            mcloop.macro_steps = Some(macro_steps);
        }
        if let Some(micro_steps) = args.micro_steps {
            mcloop.micro_steps = Some(micro_steps);
        }
        if let Some(pressure) = args.pressure {
            self.moves.get_or_insert_with(Default::default).pressure = Some(pressure);
        }

        self.resolve()
    }

    /// Fills every open setting from [`DefaultsConfig`] and validates the result with the
    /// library builders.
    pub fn resolve(self) -> Result<SimulationConfig> {
        let defaults = DefaultsConfig::default();

        let geometry = self.geometry.unwrap_or_default().build()?;
        let mcloop = self.mcloop.unwrap_or_default();
        let moves = self.moves.unwrap_or_default();
        let sampling = self.sampling.unwrap_or_default();
        let particles = self
            .particles
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.into_spec(&defaults))
            .collect::<Result<Vec<_>>>()?;

        let mut builder = SimulationConfigBuilder::new()
            .geometry(geometry)
            .mcloop(LoopConfig {
                macro_steps: mcloop.macro_steps.unwrap_or(defaults.macro_steps),
                micro_steps: mcloop.micro_steps.unwrap_or(defaults.micro_steps),
            })
            .moves(MoveConfig {
                displacement: moves.displacement.unwrap_or(defaults.displacement),
                volume_displacement: moves
                    .volume_displacement
                    .unwrap_or(defaults.volume_displacement),
                pressure: moves.pressure,
            })
            .particles(particles)
            .max_attempts(sampling.max_attempts.unwrap_or(defaults.max_attempts))
            .replicas(sampling.replicas.unwrap_or(defaults.replicas));

        if let Some(seed) = sampling.seed {
            builder = builder.seed(seed);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
            if parts.len() != 2 {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            }
            let key = parts[0].trim();
            let value_str = parts[1].trim();

            match key {
                "geometry.type" => {
                    self.geometry.get_or_insert_with(Default::default).kind =
                        Some(value_str.to_string());
                }
                "geometry.radius" => {
                    self.geometry.get_or_insert_with(Default::default).radius =
                        Some(parse_value(key, value_str)?);
                }
                "geometry.len" => {
                    self.geometry.get_or_insert_with(Default::default).len =
                        Some(parse_value(key, value_str)?);
                }
                "geometry.length" => {
                    self.geometry.get_or_insert_with(Default::default).length =
                        Some(parse_value(key, value_str)?);
                }
                "geometry.zmin" => {
                    self.geometry.get_or_insert_with(Default::default).zmin =
                        Some(parse_value(key, value_str)?);
                }
                "geometry.zmax" => {
                    self.geometry.get_or_insert_with(Default::default).zmax =
                        Some(parse_value(key, value_str)?);
                }
                "mcloop.macro" => {
                    self.mcloop.get_or_insert_with(Default::default).macro_steps =
                        Some(parse_value(key, value_str)?);
                }
                "mcloop.micro" => {
                    self.mcloop.get_or_insert_with(Default::default).micro_steps =
                        Some(parse_value(key, value_str)?);
                }
                "moves.displacement" => {
                    self.moves.get_or_insert_with(Default::default).displacement =
                        Some(parse_value(key, value_str)?);
                }
                "moves.volume-displacement" => {
                    self.moves
                        .get_or_insert_with(Default::default)
                        .volume_displacement = Some(parse_value(key, value_str)?);
                }
                "moves.pressure" => {
                    self.moves.get_or_insert_with(Default::default).pressure =
                        Some(parse_value(key, value_str)?);
                }
                "sampling.max-attempts" => {
                    self.sampling.get_or_insert_with(Default::default).max_attempts =
                        Some(parse_value(key, value_str)?);
                }
                "sampling.seed" => {
                    self.sampling.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value_str)?);
                }
                "sampling.replicas" => {
                    self.sampling.get_or_insert_with(Default::default).replicas =
                        Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}
