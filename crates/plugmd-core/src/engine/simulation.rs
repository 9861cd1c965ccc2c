use super::config::{RunParameters, SimulationConfig};
use super::error::EngineError;
use super::extension::Extension;
use super::progress::{StepEnergies, StepReporter};
use crate::core::registry::{Shared, StateRegistry, keys};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{debug, info};

/// A molecular-dynamics simulation and the registry it shares with its force
/// extension.
///
/// Construction places the particles on a cubic lattice, assigns
/// deterministically seeded velocities, and registers every engine-owned
/// quantity in the registry, so the full contract is in place before any
/// extension call. [`attach_extension`](Simulation::attach_extension) then
/// loads the extension and runs its `initialize` once;
/// [`run`](Simulation::run) drives the stepping loop and consumes the
/// simulation, so the extension is unloaded on every exit path.
///
/// The engine keeps direct handles to the entries it owns outright
/// (positions, velocities, the kinetic-energy accumulator); the accumulator
/// entries written by the extension (forces, potential energy) are
/// re-extracted through the registry each step, so a contract violation
/// surfaces as a fatal error rather than silent divergence.
pub struct Simulation {
    config: SimulationConfig,
    registry: StateRegistry,
    positions: Shared<Vec<Vector3<f64>>>,
    velocities: Shared<Vec<Vector3<f64>>>,
    kinetic_energy: Shared<f64>,
    extension: Option<Extension>,
    step_index: usize,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut registry = StateRegistry::new();
        registry.insert(keys::PARTICLE_COUNT, config.particles);
        registry.insert(keys::BOX_SIZE, config.box_size);
        let positions = registry.insert(
            keys::POSITIONS,
            lattice_positions(config.particles, config.box_size),
        );
        let velocities = registry.insert(keys::VELOCITIES, seeded_velocities(config.particles));
        registry.insert(keys::FORCES, vec![Vector3::<f64>::zeros(); config.particles]);
        registry.insert(keys::POTENTIAL_ENERGY, 0.0f64);
        let kinetic_energy = registry.insert(keys::KINETIC_ENERGY, 0.0f64);

        info!(
            particles = config.particles,
            box_size = config.box_size,
            "simulation constructed"
        );

        Ok(Self {
            config,
            registry,
            positions,
            velocities,
            kinetic_energy,
            extension: None,
            step_index: 0,
        })
    }

    /// Loads the force extension at `path` and calls its `initialize` entry
    /// point once. Any load or symbol-resolution failure aborts before the
    /// stepping loop is entered; no partial simulation is attempted.
    pub fn attach_extension(&mut self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let extension = Extension::load(path)?;
        extension.initialize(&mut self.registry);
        self.extension = Some(extension);
        Ok(())
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn velocities(&self) -> std::cell::Ref<'_, Vec<Vector3<f64>>> {
        self.velocities.borrow()
    }

    /// Advances the simulation by one step of size `dt` and returns the
    /// step's energies.
    ///
    /// Order within the step: integrate positions and apply the periodic
    /// wrap; reset the force and energy accumulators (an engine-only
    /// responsibility); hand control to the extension's `evaluate_forces`;
    /// accumulate the kinetic energy; integrate velocities from the
    /// accumulated forces.
    pub fn step(&mut self, dt: f64) -> Result<StepEnergies, EngineError> {
        let box_size = self.config.box_size;
        {
            let mut positions = self.positions.borrow_mut();
            let velocities = self.velocities.borrow();
            for (position, velocity) in positions.iter_mut().zip(velocities.iter()) {
                *position += velocity * dt;
                // A single wrap per dimension suffices: per-step displacements
                // are assumed smaller than the box edge.
                for k in 0..3 {
                    if position[k] < 0.0 {
                        position[k] += box_size;
                    }
                    if position[k] >= box_size {
                        position[k] -= box_size;
                    }
                }
            }
        }

        {
            let forces = self
                .registry
                .extract::<Vec<Vector3<f64>>>(keys::FORCES)?;
            forces.borrow_mut().fill(Vector3::zeros());
            let potential = self.registry.extract::<f64>(keys::POTENTIAL_ENERGY)?;
            *potential.borrow_mut() = 0.0;
            *self.kinetic_energy.borrow_mut() = 0.0;
        }

        if let Some(extension) = &self.extension {
            extension.evaluate_forces(&mut self.registry);
        }

        let kinetic: f64 = self
            .velocities
            .borrow()
            .iter()
            .map(|velocity| 0.5 * velocity.norm_squared())
            .sum();
        *self.kinetic_energy.borrow_mut() = kinetic;

        // Re-extract after the foreign call: the accumulators are read back
        // through the registry so a replaced or retyped entry is caught here.
        let forces = self
            .registry
            .extract::<Vec<Vector3<f64>>>(keys::FORCES)?;
        {
            let forces = forces.borrow();
            let mut velocities = self.velocities.borrow_mut();
            for (velocity, force) in velocities.iter_mut().zip(forces.iter()) {
                *velocity += force * dt;
            }
        }
        let potential = *self
            .registry
            .extract::<f64>(keys::POTENTIAL_ENERGY)?
            .borrow();

        let energies = StepEnergies {
            step: self.step_index,
            potential,
            kinetic,
        };
        self.step_index += 1;
        Ok(energies)
    }

    /// Runs the requested number of steps, reporting each step's energies
    /// through `reporter`.
    ///
    /// Consumes the simulation: on return (or on a fatal mid-run error) the
    /// extension handle is dropped and the library unloaded.
    pub fn run(
        mut self,
        params: RunParameters,
        reporter: &StepReporter<'_>,
    ) -> Result<(), EngineError> {
        params.validate()?;
        for _ in 0..params.steps {
            let energies = self.step(params.dt)?;
            debug!(
                step = energies.step,
                potential = energies.potential,
                kinetic = energies.kinetic,
                "step complete"
            );
            reporter.report(energies);
        }
        info!(steps = params.steps, "simulation completed");
        Ok(())
    }
}

/// Places `nparticles` on a rough cubic lattice sized to fit the count:
/// `ceil(n^(1/3))` sites per side, spaced to leave a half-spacing margin at
/// the cell faces.
fn lattice_positions(nparticles: usize, box_size: f64) -> Vec<Vector3<f64>> {
    let per_side = (nparticles as f64).cbrt().ceil() as usize;
    let spacing = box_size / (per_side + 1) as f64;
    (0..nparticles)
        .map(|iparticle| {
            let ix = iparticle % per_side;
            let iy = (iparticle / per_side) % per_side;
            let iz = iparticle / (per_side * per_side);
            Vector3::new(
                spacing * (ix as f64 + 0.5),
                spacing * (iy as f64 + 0.5),
                spacing * (iz as f64 + 0.5),
            )
        })
        .collect()
}

/// Draws each particle's initial velocity from a generator seeded by the
/// particle index, uniform in [-0.5, 0.5) per component. Seeding by index
/// keeps initial conditions reproducible regardless of how particles might
/// later be distributed across parallel workers.
fn seeded_velocities(nparticles: usize) -> Vec<Vector3<f64>> {
    (0..nparticles)
        .map(|iparticle| {
            let mut rng = StdRng::seed_from_u64(iparticle as u64);
            Vector3::new(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
            )
        })
        .collect()
}
