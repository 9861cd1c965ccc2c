mod cli;
mod config;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use plugmd::engine::progress::{StepEnergies, StepReporter};
use plugmd::engine::simulation::Simulation;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("PlugMD v{} starting up", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let (sim_config, run_params) = config::resolve(&cli)?;
    info!(
        particles = sim_config.particles,
        box_size = sim_config.box_size,
        steps = run_params.steps,
        dt = run_params.dt,
        "run parameters resolved"
    );

    let mut simulation = Simulation::new(sim_config)?;
    simulation.attach_extension(&cli.extension)?;

    let reporter = StepReporter::with_callback(Box::new(report_step));
    simulation.run(run_params, &reporter)?;

    println!("Simulation completed.");
    Ok(())
}

fn report_step(energies: StepEnergies) {
    println!("Iteration {}", energies.step);
    println!("    Potential Energy: {}", energies.potential);
    println!("    Kinetic Energy:   {}", energies.kinetic);
    println!("    Total Energy:     {}", energies.total());
    println!();
}
