use mcspace::core::geometry::DEFAULT_MAX_ATTEMPTS;
use mcspace::engine::config::{LoopConfig, MoveConfig};

/// Values used for every setting the config file and the command line leave open.
pub struct DefaultsConfig {
    pub macro_steps: usize,
    pub micro_steps: usize,
    pub displacement: f64,
    pub volume_displacement: f64,
    pub max_attempts: usize,
    pub replicas: usize,
    pub particle_radius: f64,
    pub particle_charge: f64,
    pub particle_mass: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let mcloop = LoopConfig::default();
        let moves = MoveConfig::default();
        Self {
            macro_steps: mcloop.macro_steps,
            micro_steps: mcloop.micro_steps,
            displacement: moves.displacement,
            volume_displacement: moves.volume_displacement,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            replicas: 1,
            particle_radius: 0.0,
            particle_charge: 0.0,
            particle_mass: 1.0,
        }
    }
}
