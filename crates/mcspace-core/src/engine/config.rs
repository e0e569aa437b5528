use crate::core::geometry::{
    Clutch, Cuboid, Cylinder, DEFAULT_MAX_ATTEMPTS, Geometry, GeometryError, GeometryKind, Slab,
    Sphere,
};
use crate::core::models::particle::{Particle, ParticleError};
use crate::core::models::species::Species;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

/// Defining parameters of a container, before validation by the shape constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryConfig {
    Sphere { radius: f64 },
    Cuboid { len: f64 },
    Slab { len: f64 },
    Cylinder { radius: f64, length: f64 },
    Clutch { radius: f64, zmin: f64, zmax: f64 },
}

impl GeometryConfig {
    pub fn kind(&self) -> GeometryKind {
        match self {
            GeometryConfig::Sphere { .. } => GeometryKind::Sphere,
            GeometryConfig::Cuboid { .. } => GeometryKind::Cuboid,
            GeometryConfig::Slab { .. } => GeometryKind::Slab,
            GeometryConfig::Cylinder { .. } => GeometryKind::Cylinder,
            GeometryConfig::Clutch { .. } => GeometryKind::Clutch,
        }
    }

    pub fn build(&self) -> Result<Geometry, GeometryError> {
        Geometry::try_from(self)
    }
}

impl TryFrom<&GeometryConfig> for Geometry {
    type Error = GeometryError;

    fn try_from(config: &GeometryConfig) -> Result<Self, Self::Error> {
        Ok(match *config {
            GeometryConfig::Sphere { radius } => Sphere::new(radius)?.into(),
            GeometryConfig::Cuboid { len } => Cuboid::new(len)?.into(),
            GeometryConfig::Slab { len } => Slab::new(len)?.into(),
            GeometryConfig::Cylinder { radius, length } => Cylinder::new(radius, length)?.into(),
            GeometryConfig::Clutch { radius, zmin, zmax } => Clutch::new(radius, zmin, zmax)?.into(),
        })
    }
}

/// Collects loosely typed geometry parameters (as they come from a config file) and
/// checks that the ones the chosen shape needs are present.
#[derive(Default)]
pub struct GeometryConfigBuilder {
    kind: Option<GeometryKind>,
    radius: Option<f64>,
    len: Option<f64>,
    length: Option<f64>,
    zmin: Option<f64>,
    zmax: Option<f64>,
}

impl GeometryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: GeometryKind) -> Self {
        self.kind = Some(kind);
        self
    }
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn len(mut self, len: f64) -> Self {
        self.len = Some(len);
        self
    }
    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }
    pub fn zmin(mut self, zmin: f64) -> Self {
        self.zmin = Some(zmin);
        self
    }
    pub fn zmax(mut self, zmax: f64) -> Self {
        self.zmax = Some(zmax);
        self
    }

    pub fn build(self) -> Result<GeometryConfig, ConfigError> {
        let kind = self.kind.ok_or(ConfigError::MissingParameter("geometry.type"))?;
        let radius = || self.radius.ok_or(ConfigError::MissingParameter("geometry.radius"));
        Ok(match kind {
            GeometryKind::Sphere => GeometryConfig::Sphere { radius: radius()? },
            GeometryKind::Cuboid => GeometryConfig::Cuboid {
                len: self.len.ok_or(ConfigError::MissingParameter("geometry.len"))?,
            },
            GeometryKind::Slab => GeometryConfig::Slab {
                len: self.len.ok_or(ConfigError::MissingParameter("geometry.len"))?,
            },
            GeometryKind::Cylinder => GeometryConfig::Cylinder {
                radius: radius()?,
                length: self
                    .length
                    .ok_or(ConfigError::MissingParameter("geometry.length"))?,
            },
            GeometryKind::Clutch => GeometryConfig::Clutch {
                radius: radius()?,
                zmin: self.zmin.ok_or(ConfigError::MissingParameter("geometry.zmin"))?,
                zmax: self.zmax.ok_or(ConfigError::MissingParameter("geometry.zmax"))?,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub macro_steps: usize,
    pub micro_steps: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            macro_steps: 10,
            micro_steps: 1000,
        }
    }
}

/// Step sizes of the Monte Carlo moves. Energies are in units of kT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveConfig {
    /// Side of the cube a single-particle displacement is drawn from, in Angstroms.
    pub displacement: f64,
    /// Width of the uniform step in ln V.
    pub volume_displacement: f64,
    /// External pressure in kT/Å³. Volume moves are off when `None`.
    pub pressure: Option<f64>,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            displacement: 2.0,
            volume_displacement: 0.05,
            pressure: None,
        }
    }
}

/// `count` identical particles inserted at random positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    pub species: Species,
    pub count: usize,
    pub radius: f64,
    pub charge: f64,
    pub mass: f64,
}

impl ParticleSpec {
    pub fn template(&self) -> Result<Particle, ParticleError> {
        Particle::new(self.species, self.charge, self.radius, self.mass)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub geometry: GeometryConfig,
    pub mcloop: LoopConfig,
    pub moves: MoveConfig,
    pub particles: Vec<ParticleSpec>,
    pub max_attempts: usize,
    pub seed: Option<u64>,
    pub replicas: usize,
}

impl SimulationConfig {
    pub fn total_particles(&self) -> usize {
        self.particles.iter().map(|spec| spec.count).sum()
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    geometry: Option<GeometryConfig>,
    mcloop: Option<LoopConfig>,
    moves: Option<MoveConfig>,
    particles: Vec<ParticleSpec>,
    max_attempts: Option<usize>,
    seed: Option<u64>,
    replicas: Option<usize>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = Some(geometry);
        self
    }
    pub fn mcloop(mut self, mcloop: LoopConfig) -> Self {
        self.mcloop = Some(mcloop);
        self
    }
    pub fn moves(mut self, moves: MoveConfig) -> Self {
        self.moves = Some(moves);
        self
    }
    pub fn particle(mut self, spec: ParticleSpec) -> Self {
        self.particles.push(spec);
        self
    }
    pub fn particles(mut self, specs: Vec<ParticleSpec>) -> Self {
        self.particles = specs;
        self
    }
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn replicas(mut self, n: usize) -> Self {
        self.replicas = Some(n);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let geometry = self
            .geometry
            .ok_or(ConfigError::MissingParameter("geometry"))?;
        let moves = self.moves.unwrap_or_default();
        validate_moves(&moves)?;

        for spec in &self.particles {
            spec.template()
                .map_err(|e| invalid("particles", format!("{}: {}", spec.species, e)))?;
        }

        let max_attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(invalid("sampling.max-attempts", "must be at least 1"));
        }
        let replicas = self.replicas.unwrap_or(1);
        if replicas == 0 {
            return Err(invalid("sampling.replicas", "must be at least 1"));
        }

        Ok(SimulationConfig {
            geometry,
            mcloop: self.mcloop.unwrap_or_default(),
            moves,
            particles: self.particles,
            max_attempts,
            seed: self.seed,
            replicas,
        })
    }
}

fn validate_moves(moves: &MoveConfig) -> Result<(), ConfigError> {
    if !(moves.displacement.is_finite() && moves.displacement >= 0.0) {
        return Err(invalid(
            "moves.displacement",
            format!("expected a finite, non-negative length, got {}", moves.displacement),
        ));
    }
    if !(moves.volume_displacement.is_finite() && moves.volume_displacement >= 0.0) {
        return Err(invalid(
            "moves.volume-displacement",
            format!(
                "expected a finite, non-negative step, got {}",
                moves.volume_displacement
            ),
        ));
    }
    if let Some(pressure) = moves.pressure {
        if !(pressure.is_finite() && pressure >= 0.0) {
            return Err(invalid(
                "moves.pressure",
                format!("expected a finite, non-negative pressure, got {}", pressure),
            ));
        }
    }
    Ok(())
}
