use crate::cli::Cli;
use crate::error::{CliError, Result};
use plugmd::engine::config::{RunParameters, SimulationConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_PARTICLES: usize = 1000;
pub const DEFAULT_BOX_SIZE: f64 = 20.0;
pub const DEFAULT_STEPS: usize = 100;
pub const DEFAULT_DT: f64 = 0.005;

/// On-disk run configuration. Every field is optional; precedence is
/// explicit CLI flag, then file value, then built-in default.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RunFile {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    pub particles: Option<usize>,
    #[serde(rename = "box-size")]
    pub box_size: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    pub steps: Option<usize>,
    pub dt: Option<f64>,
}

/// Merges CLI flags, the optional TOML file, and the built-in defaults into
/// the core configuration types.
pub fn resolve(cli: &Cli) -> Result<(SimulationConfig, RunParameters)> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => RunFile::default(),
    };

    let config = SimulationConfig {
        particles: cli
            .particles
            .or(file.simulation.particles)
            .unwrap_or(DEFAULT_PARTICLES),
        box_size: cli
            .box_size
            .or(file.simulation.box_size)
            .unwrap_or(DEFAULT_BOX_SIZE),
    };
    let params = RunParameters {
        steps: cli.steps.or(file.run.steps).unwrap_or(DEFAULT_STEPS),
        dt: cli.dt.or(file.run.dt).unwrap_or(DEFAULT_DT),
    };
    Ok((config, params))
}

fn load_file(path: &Path) -> Result<RunFile> {
    debug!(path = %path.display(), "loading run configuration file");
    let contents = std::fs::read_to_string(path).map_err(CliError::Io)?;
    toml::from_str(&contents).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
