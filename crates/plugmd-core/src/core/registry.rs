use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Well-known registry keys making up the contract between the engine and the
/// reference force extension.
///
/// The engine guarantees that every engine-owned key is registered before the
/// extension's `initialize` is first called, and that the accumulator entries
/// (`FORCES`, `POTENTIAL_ENERGY`) are reset before each `evaluate_forces`
/// call. Extensions are free to register additional keys of their own; adding
/// a quantity never changes the entry-point signatures.
pub mod keys {
    /// Number of particles in the system (`usize`, read-only to extensions).
    pub const PARTICLE_COUNT: &str = "particle_count";
    /// Edge length of the cubic periodic cell (`f64`, read-only to extensions).
    pub const BOX_SIZE: &str = "box_size";
    /// Particle positions (`Vec<Vector3<f64>>`, read-only to extensions).
    pub const POSITIONS: &str = "positions";
    /// Particle velocities (`Vec<Vector3<f64>>`, read-only to extensions).
    pub const VELOCITIES: &str = "velocities";
    /// Force accumulators (`Vec<Vector3<f64>>`, written by the extension,
    /// reset by the engine each step).
    pub const FORCES: &str = "forces";
    /// Potential-energy accumulator (`f64`, written by the extension, reset by
    /// the engine each step).
    pub const POTENTIAL_ENERGY: &str = "potential_energy";
    /// Kinetic-energy accumulator (`f64`, reset and written by the engine
    /// each step; read-only to extensions).
    pub const KINETIC_ENERGY: &str = "kinetic_energy";
    /// Extension-owned Lennard-Jones kernel context, registered by the
    /// reference extension's `initialize`.
    pub const LJ_KERNEL: &str = "lj_kernel";
}

/// A shared-ownership, interior-mutable handle to a registry value.
///
/// Every holder aliases the same underlying storage; the value lives as long
/// as the longest-lived holder. The registry is single-threaded by design, so
/// sharing uses `Rc`/`RefCell` rather than a locking discipline.
pub type Shared<T> = Rc<RefCell<T>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no entry registered under key '{key}'")]
    KeyNotFound { key: String },

    #[error("entry '{key}' was stored as {stored} but accessed as {requested}")]
    TypeMismatch {
        key: String,
        requested: &'static str,
        stored: &'static str,
    },

    #[error("entry '{key}' holds {actual} elements where the contract requires {expected}")]
    LengthMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },
}

struct Entry {
    value: Rc<dyn Any>,
    // Concrete type name captured at insertion, for diagnostics only; the
    // authoritative check is the downcast itself.
    type_name: &'static str,
}

/// Type-erased, key-addressed shared state.
///
/// The single channel through which the engine and a loaded extension
/// exchange data. Values are stored behind a uniform erased handle and
/// recovered through [`extract`](StateRegistry::extract), which validates the
/// requested type against the stored one on every access. Exactly one entry
/// exists per key; re-inserting a key replaces the previous entry.
#[derive(Default)]
pub struct StateRegistry {
    entries: HashMap<String, Entry>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key` with shared ownership, replacing any prior
    /// entry, and returns a handle to the freshly created storage.
    ///
    /// The returned handle lets the inserting side keep canonical access to
    /// the value without going back through a keyed lookup; the registry
    /// keeps its own handle alive for later [`extract`](StateRegistry::extract)
    /// calls from the other side of the boundary.
    pub fn insert<T: 'static>(&mut self, key: impl Into<String>, value: T) -> Shared<T> {
        let cell = Rc::new(RefCell::new(value));
        self.entries.insert(
            key.into(),
            Entry {
                value: cell.clone() as Rc<dyn Any>,
                type_name: std::any::type_name::<T>(),
            },
        );
        cell
    }

    /// Recovers the entry under `key` as a shared handle to a `T`.
    ///
    /// Fails with [`RegistryError::KeyNotFound`] if no entry exists, and with
    /// [`RegistryError::TypeMismatch`] if the stored concrete type is not `T`;
    /// a mismatched access never silently reinterprets the storage. The
    /// returned handle observes and can mutate the same storage as every
    /// other holder.
    pub fn extract<T: 'static>(&self, key: &str) -> Result<Shared<T>, RegistryError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| RegistryError::KeyNotFound {
                key: key.to_string(),
            })?;
        Rc::clone(&entry.value)
            .downcast::<RefCell<T>>()
            .map_err(|_| RegistryError::TypeMismatch {
                key: key.to_string(),
                requested: std::any::type_name::<T>(),
                stored: entry.type_name,
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, entry) in &self.entries {
            map.entry(key, &entry.type_name);
        }
        map.finish()
    }
}
