use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "PlugMD - a molecular-dynamics time-stepping engine whose force computation is supplied by a dynamically loaded extension.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the force extension dynamic library to load for this run.
    #[arg(value_name = "EXTENSION")]
    pub extension: PathBuf,

    /// Number of particles to place on the initial lattice.
    #[arg(short = 'n', long, value_name = "INT")]
    pub particles: Option<usize>,

    /// Edge length of the cubic periodic cell, in reduced units.
    #[arg(short = 'b', long, value_name = "FLOAT")]
    pub box_size: Option<f64>,

    /// Number of time-integration steps to perform.
    #[arg(short = 's', long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Timestep size in reduced units.
    #[arg(long, value_name = "FLOAT")]
    pub dt: Option<f64>,

    /// Path to a run configuration file in TOML format.
    /// Explicit flags override values from the file.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_path_is_the_only_required_argument() {
        let cli = Cli::try_parse_from(["plugmd", "./libplugmd_lj.so"]).unwrap();
        assert_eq!(cli.extension, PathBuf::from("./libplugmd_lj.so"));
        assert_eq!(cli.particles, None);
        assert_eq!(cli.steps, None);
    }

    #[test]
    fn run_parameters_parse_from_flags() {
        let cli = Cli::try_parse_from([
            "plugmd",
            "ext.so",
            "-n",
            "500",
            "--box-size",
            "15.0",
            "--steps",
            "10",
            "--dt",
            "0.001",
        ])
        .unwrap();
        assert_eq!(cli.particles, Some(500));
        assert_eq!(cli.box_size, Some(15.0));
        assert_eq!(cli.steps, Some(10));
        assert_eq!(cli.dt, Some(0.001));
    }

    #[test]
    fn missing_extension_path_is_a_parse_error() {
        assert!(Cli::try_parse_from(["plugmd"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["plugmd", "ext.so", "-q", "-v"]).is_err());
    }
}
