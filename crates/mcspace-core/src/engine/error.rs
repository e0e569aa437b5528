use thiserror::Error;

use super::config::ConfigError;
use crate::core::geometry::GeometryError;
use crate::core::models::particle::ParticleError;
use crate::core::models::species::Species;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Geometry error: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Invalid particle: {source}")]
    Particle {
        #[from]
        source: ParticleError,
    },

    #[error("Failed to place a {species} particle after {attempts} attempts")]
    Placement { species: Species, attempts: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
