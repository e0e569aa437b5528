use crate::core::geometry::{Container, Geometry, GeometryError};
use crate::core::models::ensemble::Ensemble;
use crate::core::models::ids::ParticleId;
use crate::core::models::point::Point;
use crate::core::random::{RandomSource, UniformRng};
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::mcloop::McLoop;
use crate::engine::placement::{fits, insert_particle, is_valid_configuration};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::volume::volume_transaction;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Acceptance {
    pub attempted: u64,
    pub accepted: u64,
}

impl Acceptance {
    fn record(&mut self, accepted: bool) {
        self.attempted += 1;
        if accepted {
            self.accepted += 1;
        }
    }

    /// Fraction of attempted moves that were accepted; zero if none were attempted.
    pub fn ratio(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}

/// Final state and statistics of one replica.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicaSummary {
    pub replica: usize,
    pub geometry: Geometry,
    pub positions: Vec<Point>,
    pub mean_volume: f64,
    pub translation: Acceptance,
    pub volume: Acceptance,
    pub micro_steps: u64,
}

impl ReplicaSummary {
    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn final_volume(&self) -> f64 {
        self.geometry.volume()
    }
}

/// Runs the hard-sphere Monte Carlo simulation described by `config`.
///
/// Every replica builds its own container, inserts the configured particles at random
/// non-overlapping positions and runs the macro/micro loop. A micro step is a single
/// particle translation or, when a pressure is set, a volume move with probability
/// `1 / (N + 1)`. Replicas run in parallel with the `parallel` feature and draw from
/// independent streams derived from `config.seed`, so a seeded run is reproducible.
#[instrument(skip_all, name = "hard_spheres_workflow")]
pub fn run(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ReplicaSummary>, EngineError> {
    let geometry = config.geometry.build()?;
    info!(
        geometry = %geometry.kind(),
        replicas = config.replicas,
        particles = config.total_particles(),
        pressure = ?config.moves.pressure,
        "Starting hard-sphere Monte Carlo."
    );

    reporter.report(Progress::PhaseStart {
        name: "Hard-sphere Monte Carlo",
    });
    reporter.report(Progress::TaskStart {
        total_steps: (config.replicas * config.mcloop.macro_steps) as u64,
    });

    let iterator = 0..config.replicas;

    #[cfg(feature = "parallel")]
    let iterator = iterator.into_par_iter();

    let summaries = iterator
        .map(|index| run_replica(index, geometry, config, reporter))
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(
        "Workflow complete. {} replica(s) finished.",
        summaries.len()
    );
    Ok(summaries)
}

fn replica_rng(config: &SimulationConfig, index: usize) -> UniformRng {
    match config.seed {
        Some(seed) => UniformRng::for_stream(seed, index as u64),
        None => UniformRng::from_entropy(),
    }
}

#[instrument(skip(geometry, config, reporter), name = "replica")]
fn run_replica(
    index: usize,
    mut geometry: Geometry,
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<ReplicaSummary, EngineError> {
    let mut rng = replica_rng(config, index);

    // === Phase 1: Insertion ===
    let mut ensemble = Ensemble::with_capacity(config.total_particles());
    for spec in &config.particles {
        let template = spec.template()?;
        for _ in 0..spec.count {
            insert_particle(
                &mut ensemble,
                &geometry,
                &template,
                &mut rng,
                config.max_attempts,
            )?;
        }
    }
    debug!(particles = ensemble.len(), "Inserted particles.");

    // === Phase 2: Sampling ===
    let ids = ensemble.ids();
    let moves = config.moves;
    let mut mc = McLoop::new(&config.mcloop);
    let mut translation = Acceptance::default();
    let mut volume = Acceptance::default();
    let mut volume_sum = 0.0;

    while mc.macro_step() {
        while mc.micro_step() {
            match moves.pressure {
                Some(pressure) if rng.range(0, ids.len() as i64) == 0 => {
                    let accepted = volume_move(
                        &mut ensemble,
                        &mut geometry,
                        pressure,
                        moves.volume_displacement,
                        &mut rng,
                    )?;
                    volume.record(accepted);
                }
                _ => {
                    if let Some(&id) = rng.choose(&ids) {
                        let accepted =
                            translate(&mut ensemble, &geometry, id, moves.displacement, &mut rng);
                        translation.record(accepted);
                    }
                }
            }
            volume_sum += geometry.volume();
        }
        reporter.report(Progress::TaskIncrement);
        debug!(volume = geometry.volume(), "{}", mc.timing());
    }

    let micro_steps = mc.total_micro_steps();
    let mean_volume = if micro_steps > 0 {
        volume_sum / micro_steps as f64
    } else {
        geometry.volume()
    };

    Ok(ReplicaSummary {
        replica: index,
        geometry,
        positions: ensemble.positions(),
        mean_volume,
        translation,
        volume,
        micro_steps,
    })
}

/// Displaces one particle uniformly within a cube of side `displacement`.
fn translate(
    ensemble: &mut Ensemble,
    geometry: &Geometry,
    id: ParticleId,
    displacement: f64,
    rng: &mut UniformRng,
) -> bool {
    let Some(particle) = ensemble.get(id) else {
        return false;
    };
    let step = Point::new(rng.half(), rng.half(), rng.half()) * displacement;
    let mut trial = *particle.position() + step;
    geometry.boundary(&mut trial);

    let candidate = particle.clone().at(trial);
    fits(ensemble, geometry, &candidate, Some(id)) && ensemble.set_position(id, trial)
}

/// Random walk in `ln V` under external `pressure` (kT/Å³).
fn volume_move(
    ensemble: &mut Ensemble,
    geometry: &mut Geometry,
    pressure: f64,
    step: f64,
    rng: &mut UniformRng,
) -> Result<bool, GeometryError> {
    let target = (geometry.volume().ln() + rng.half() * step).exp();
    let n = ensemble.len() as f64;

    volume_transaction(geometry, ensemble, target, |trial, rescaled| {
        if !is_valid_configuration(rescaled, trial.proposed()) {
            return false;
        }
        let exponent = -pressure * (trial.new_volume() - trial.old_volume())
            + (n + 1.0) * trial.ln_volume_ratio();
        metropolis(exponent, rng)
    })
}

#[inline]
fn metropolis(exponent: f64, rng: &mut UniformRng) -> bool {
    exponent >= 0.0 || rng.uniform() < exponent.exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::species::Species;
    use crate::engine::config::{
        GeometryConfig, LoopConfig, MoveConfig, ParticleSpec, SimulationConfigBuilder,
    };
    use std::sync::atomic::{AtomicU64, Ordering};

    fn spheres(count: usize, radius: f64) -> ParticleSpec {
        ParticleSpec {
            species: Species::Ion,
            count,
            radius,
            charge: 0.0,
            mass: 1.0,
        }
    }

    fn assert_no_overlap(summary: &ReplicaSummary, radius: f64) {
        let contact_sq = (2.0 * radius) * (2.0 * radius);
        for (i, a) in summary.positions.iter().enumerate() {
            assert!(!summary.geometry.collision(a), "{} escaped", a);
            for b in &summary.positions[i + 1..] {
                assert!(summary.geometry.sqdist(a, b) >= contact_sq);
            }
        }
    }

    fn small_config(geometry: GeometryConfig, pressure: Option<f64>) -> SimulationConfig {
        SimulationConfigBuilder::new()
            .geometry(geometry)
            .mcloop(LoopConfig {
                macro_steps: 3,
                micro_steps: 200,
            })
            .moves(MoveConfig {
                displacement: 1.0,
                volume_displacement: 0.1,
                pressure,
            })
            .particle(spheres(12, 1.0))
            .seed(2024)
            .replicas(2)
            .build()
            .unwrap()
    }

    #[test]
    fn constant_volume_run_keeps_geometry_and_valid_configuration() {
        let config = small_config(GeometryConfig::Sphere { radius: 12.0 }, None);
        let summaries = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(summaries.len(), 2);
        for (i, summary) in summaries.iter().enumerate() {
            assert_eq!(summary.replica, i);
            assert_eq!(summary.particle_count(), 12);
            assert_eq!(summary.micro_steps, 600);
            assert_eq!(summary.translation.attempted, 600);
            assert_eq!(summary.volume.attempted, 0);
            assert!(summary.translation.ratio() > 0.0);
            assert_eq!(summary.final_volume(), config.geometry.build().unwrap().volume());
            let volume = summary.final_volume();
            assert!((summary.mean_volume - volume).abs() < 1e-9 * volume);
            assert_no_overlap(summary, 1.0);
        }
    }

    #[test]
    fn pressure_run_attempts_volume_moves_and_stays_valid() {
        let config = small_config(GeometryConfig::Cuboid { len: 20.0 }, Some(0.01));
        let summaries = run(&config, &ProgressReporter::new()).unwrap();

        for summary in &summaries {
            assert!(summary.volume.attempted > 0);
            assert_eq!(
                summary.volume.attempted + summary.translation.attempted,
                summary.micro_steps
            );
            assert!(summary.final_volume() > 0.0);
            assert!(summary.mean_volume > 0.0);
            assert_no_overlap(summary, 1.0);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible_and_replicas_differ() {
        let config = small_config(
            GeometryConfig::Clutch {
                radius: 15.0,
                zmin: -2.0,
                zmax: 2.0,
            },
            Some(0.001),
        );
        let first = run(&config, &ProgressReporter::new()).unwrap();
        let second = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(first, second);
        assert_ne!(first[0].positions, first[1].positions);
    }

    #[test]
    fn slab_and_cylinder_runs_keep_particles_inside() {
        for geometry in [
            GeometryConfig::Slab { len: 15.0 },
            GeometryConfig::Cylinder {
                radius: 6.0,
                length: 20.0,
            },
        ] {
            let summaries = run(&small_config(geometry, Some(0.005)), &ProgressReporter::new())
                .unwrap();
            for summary in &summaries {
                assert_no_overlap(summary, 1.0);
            }
        }
    }

    #[test]
    fn overfull_container_fails_with_placement_error() {
        let config = SimulationConfigBuilder::new()
            .geometry(GeometryConfig::Sphere { radius: 3.0 })
            .particle(spheres(50, 2.0))
            .max_attempts(50)
            .seed(1)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Placement { .. })));
    }

    #[test]
    fn invalid_geometry_is_reported_before_any_work() {
        let config = SimulationConfigBuilder::new()
            .geometry(GeometryConfig::Cuboid { len: -1.0 })
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Geometry { .. })));
    }

    #[test]
    fn reporter_receives_one_increment_per_macro_step_and_replica() {
        let increments = AtomicU64::new(0);
        let total = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskIncrement => {
                increments.fetch_add(1, Ordering::Relaxed);
            }
            Progress::TaskStart { total_steps } => total.store(total_steps, Ordering::Relaxed),
            _ => {}
        }));

        let config = small_config(GeometryConfig::Sphere { radius: 12.0 }, None);
        run(&config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(total.into_inner(), 6);
        assert_eq!(increments.into_inner(), 6);
    }

    #[test]
    fn empty_system_with_pressure_only_makes_volume_moves() {
        let config = SimulationConfigBuilder::new()
            .geometry(GeometryConfig::Sphere { radius: 10.0 })
            .mcloop(LoopConfig {
                macro_steps: 1,
                micro_steps: 50,
            })
            .moves(MoveConfig {
                pressure: Some(0.001),
                ..MoveConfig::default()
            })
            .seed(3)
            .build()
            .unwrap();
        let summaries = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(summaries[0].volume.attempted, 50);
        assert_eq!(summaries[0].translation.attempted, 0);
        assert_eq!(summaries[0].particle_count(), 0);
    }

    #[test]
    fn acceptance_ratio_handles_no_attempts() {
        let mut acc = Acceptance::default();
        assert_eq!(acc.ratio(), 0.0);
        acc.record(true);
        acc.record(false);
        assert_eq!(acc.ratio(), 0.5);
    }
}
