use super::config::ConfigError;
use super::extension::ExtensionError;
use crate::core::registry::RegistryError;
use thiserror::Error;

/// Umbrella error for a simulation run.
///
/// Every variant is fatal: each stems from a misconfigured run, extension, or
/// registry contract rather than a transient condition, so nothing here is
/// retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid run parameters: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error("registry contract violated: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },
}
