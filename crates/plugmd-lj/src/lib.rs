//! Reference Lennard-Jones force extension, built as a `cdylib` and loaded by
//! the engine at runtime.
//!
//! Exports the two entry points the engine binds to, `initialize` and
//! `evaluate_forces`, both taking only a reference to the shared state
//! registry. Everything else flows through registry entries: `initialize`
//! stores the cutoff-shifted kernel context under its own key, and
//! `evaluate_forces` recovers it and accumulates into the engine-owned
//! accumulator entries.

use plugmd::core::forcefield::kernel::LjKernel;
use plugmd::core::registry::{RegistryError, StateRegistry, keys};

/// Cutoff radius in reduced units.
const LJ_CUTOFF: f64 = 2.5;

/// Called once per run, after the engine has registered every contract key.
/// Precomputes the potential-at-cutoff shift and parks the kernel context in
/// the registry, where the next entry-point call can recover it.
#[unsafe(no_mangle)]
#[allow(improper_ctypes_definitions)] // loaded by an engine built with the same toolchain against the same core crate
pub extern "C" fn initialize(state: &mut StateRegistry) {
    state.insert(keys::LJ_KERNEL, LjKernel::new(LJ_CUTOFF));
}

/// Called once per step, after the engine has reset the force and
/// potential-energy accumulators.
#[unsafe(no_mangle)]
#[allow(improper_ctypes_definitions)]
pub extern "C" fn evaluate_forces(state: &mut StateRegistry) {
    let kernel = match state.extract::<LjKernel>(keys::LJ_KERNEL) {
        Ok(kernel) => *kernel.borrow(),
        Err(err) => fail(&err),
    };
    if let Err(err) = kernel.accumulate(state) {
        fail(&err);
    }
}

/// Registry contract violations are unrecoverable, and unwinding must not
/// cross the C boundary: report the offending key and terminate with a
/// nonzero status.
fn fail(err: &RegistryError) -> ! {
    eprintln!("fatal registry error in force extension: {err}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn engine_like_registry() -> StateRegistry {
        let mut registry = StateRegistry::new();
        registry.insert(keys::PARTICLE_COUNT, 2usize);
        registry.insert(keys::BOX_SIZE, 20.0f64);
        registry.insert(
            keys::POSITIONS,
            vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(2.2, 1.0, 1.0)],
        );
        registry.insert(keys::FORCES, vec![Vector3::<f64>::zeros(); 2]);
        registry.insert(keys::POTENTIAL_ENERGY, 0.0f64);
        registry
    }

    #[test]
    fn initialize_registers_the_kernel_context() {
        let mut registry = engine_like_registry();
        initialize(&mut registry);

        let kernel = registry.extract::<LjKernel>(keys::LJ_KERNEL).unwrap();
        assert_eq!(kernel.borrow().cutoff_squared(), LJ_CUTOFF * LJ_CUTOFF);
    }

    #[test]
    fn evaluate_forces_accumulates_into_the_engine_entries() {
        let mut registry = engine_like_registry();
        initialize(&mut registry);
        evaluate_forces(&mut registry);

        let potential = registry.extract::<f64>(keys::POTENTIAL_ENERGY).unwrap();
        assert!(*potential.borrow() != 0.0);
        let forces = registry
            .extract::<Vec<Vector3<f64>>>(keys::FORCES)
            .unwrap();
        assert!(forces.borrow().iter().any(|f| f.norm_squared() > 0.0));
    }
}
