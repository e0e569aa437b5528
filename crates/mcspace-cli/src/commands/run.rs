use crate::cli::RunArgs;
use crate::config::PartialSimulationConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use mcspace::core::geometry::Container;
use mcspace::engine::progress::ProgressReporter;
use mcspace::workflows::hard_spheres::{self, ReplicaSummary};
use tracing::info;

pub fn run(args: RunArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialSimulationConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Starting hard-sphere Monte Carlo: {} particle(s), {} replica(s), {}.",
        config.total_particles(),
        config.replicas,
        match config.moves.pressure {
            Some(p) => format!("P = {} kT/Å³", p),
            None => "constant volume".to_string(),
        }
    );

    let summaries = hard_spheres::run(&config, &reporter)?;
    info!("Workflow finished, received {} replica summary(ies).", summaries.len());

    for summary in &summaries {
        print!("{}", render_summary(summary));
    }
    Ok(())
}

fn render_summary(summary: &ReplicaSummary) -> String {
    let mut out = format!("Replica {}\n", summary.replica);
    out.push_str(&format!(
        "  {:<18} = {}\n",
        "Particles",
        summary.particle_count()
    ));
    out.push_str(&format!(
        "  {:<18} = {}\n",
        "Micro steps", summary.micro_steps
    ));
    out.push_str(&format!(
        "  {:<18} = {:.3} Å³\n",
        "Final volume",
        summary.final_volume()
    ));
    out.push_str(&format!(
        "  {:<18} = {:.3} Å³\n",
        "Mean volume", summary.mean_volume
    ));
    out.push_str(&format!(
        "  {:<18} = {:.2}% ({}/{})\n",
        "Translation acc.",
        100.0 * summary.translation.ratio(),
        summary.translation.accepted,
        summary.translation.attempted
    ));
    if summary.volume.attempted > 0 {
        out.push_str(&format!(
            "  {:<18} = {:.2}% ({}/{})\n",
            "Volume acc.",
            100.0 * summary.volume.ratio(),
            summary.volume.accepted,
            summary.volume.attempted
        ));
    }
    for line in summary.geometry.info().lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}
