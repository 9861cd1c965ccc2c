use crate::core::registry::StateRegistry;
use libloading::Library;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Calling signature shared by both required extension entry points. All
/// effects flow through mutation of the registry; there is no return value
/// and no other channel.
pub type ExtensionHook = unsafe extern "C" fn(&mut StateRegistry);

const INITIALIZE_SYMBOL: &str = "initialize";
const EVALUATE_FORCES_SYMBOL: &str = "evaluate_forces";

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("failed to load extension '{path}': {source}", path = path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("extension '{path}' does not export required symbol '{name}': {source}", path = path.display())]
    MissingSymbol {
        path: PathBuf,
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// A loaded force extension: the opaque library handle plus the two resolved
/// entry points.
///
/// Both required exports are resolved eagerly at load time, so a missing
/// symbol surfaces before the simulation enters its stepping loop. Dropping
/// the `Extension` unloads the library, exactly once, on every exit path —
/// including a resolution failure partway through [`Extension::load`], where
/// the already-opened library is released by drop.
#[derive(Debug)]
pub struct Extension {
    initialize: ExtensionHook,
    evaluate_forces: ExtensionHook,
    path: PathBuf,
    // Owns the loaded library; the resolved hooks above point into it and are
    // only valid while it is alive.
    _library: Library,
}

impl Extension {
    /// Opens the dynamic library at `path` and resolves the two required
    /// exports, `initialize` and `evaluate_forces`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExtensionError> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path) }.map_err(|source| ExtensionError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let initialize = resolve(&library, path, INITIALIZE_SYMBOL)?;
        let evaluate_forces = resolve(&library, path, EVALUATE_FORCES_SYMBOL)?;
        info!(path = %path.display(), "loaded force extension");

        Ok(Self {
            initialize,
            evaluate_forces,
            path: path.to_path_buf(),
            _library: library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Invokes the extension's `initialize` entry point. Called exactly once
    /// per run, after every engine-owned registry key has been registered.
    pub fn initialize(&self, state: &mut StateRegistry) {
        debug!(path = %self.path.display(), "calling extension initialize");
        // The hook points into the library owned by `self` and follows the
        // fixed entry-point signature checked at resolution time.
        unsafe { (self.initialize)(state) }
    }

    /// Invokes the extension's `evaluate_forces` entry point: a synchronous,
    /// blocking foreign call that runs to completion before the engine
    /// resumes.
    pub fn evaluate_forces(&self, state: &mut StateRegistry) {
        unsafe { (self.evaluate_forces)(state) }
    }
}

fn resolve(
    library: &Library,
    path: &Path,
    name: &'static str,
) -> Result<ExtensionHook, ExtensionError> {
    let symbol = unsafe { library.get::<ExtensionHook>(name.as_bytes()) }.map_err(|source| {
        ExtensionError::MissingSymbol {
            path: path.to_path_buf(),
            name,
            source,
        }
    })?;
    Ok(*symbol)
}
