//! End-to-end round trip through a real dynamic library: loads the reference
//! Lennard-Jones extension built by this workspace, binds its exports, and
//! drives the stepping loop through the resolved entry points.

use plugmd::core::registry::keys;
use plugmd::engine::config::{RunParameters, SimulationConfig};
use plugmd::engine::extension::Extension;
use plugmd::engine::progress::{StepEnergies, StepReporter};
use plugmd::engine::simulation::Simulation;
use std::cell::RefCell;
use std::path::PathBuf;

/// Locates the `plugmd_lj` cdylib produced alongside this test binary.
///
/// Test binaries land in `target/<profile>/deps`; workspace library
/// artifacts land one level up.
fn reference_extension_path() -> PathBuf {
    let mut dir = std::env::current_exe().expect("test binary path");
    dir.pop();
    if dir.ends_with("deps") {
        dir.pop();
    }
    let file = if cfg!(target_os = "windows") {
        "plugmd_lj.dll"
    } else if cfg!(target_os = "macos") {
        "libplugmd_lj.dylib"
    } else {
        "libplugmd_lj.so"
    };
    let path = dir.join(file);
    assert!(
        path.exists(),
        "reference extension not found at {}; build the plugmd-lj crate first",
        path.display()
    );
    path
}

fn dense_config() -> SimulationConfig {
    SimulationConfig {
        particles: 64,
        box_size: 8.0,
    }
}

#[test]
fn load_resolves_both_exports_and_initialize_registers_the_kernel_context() {
    let path = reference_extension_path();
    let extension = Extension::load(&path).unwrap();
    assert_eq!(extension.path(), path.as_path());

    let mut sim = Simulation::new(dense_config()).unwrap();
    assert!(!sim.registry().contains(keys::LJ_KERNEL));
    sim.attach_extension(&path).unwrap();
    assert!(sim.registry().contains(keys::LJ_KERNEL));
}

#[test]
fn a_run_through_the_loaded_extension_produces_interaction_energies() {
    let mut sim = Simulation::new(dense_config()).unwrap();
    sim.attach_extension(reference_extension_path()).unwrap();

    let reports: RefCell<Vec<StepEnergies>> = RefCell::new(Vec::new());
    let reporter = StepReporter::with_callback(Box::new(|e| reports.borrow_mut().push(e)));

    sim.run(RunParameters { steps: 5, dt: 0.005 }, &reporter)
        .unwrap();

    drop(reporter);
    let reports = reports.into_inner();
    assert_eq!(reports.len(), 5);
    for (expected_step, energies) in reports.iter().enumerate() {
        assert_eq!(energies.step, expected_step);
        // At this lattice spacing the system sits in the attractive well.
        assert!(energies.potential < 0.0);
        assert!(energies.kinetic > 0.0);
        assert!(energies.total().is_finite());
    }
}
