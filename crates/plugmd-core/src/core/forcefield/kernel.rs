use super::potentials;
use crate::core::registry::{RegistryError, StateRegistry, keys};
use nalgebra::Vector3;

/// Cutoff-shifted Lennard-Jones kernel context.
///
/// Carries the squared cutoff and the precomputed potential-at-cutoff shift,
/// so the shifted potential is continuous (and exactly zero) at the cutoff.
/// The context is built once by the extension's `initialize` and travels
/// between entry-point calls inside the registry itself, under
/// [`keys::LJ_KERNEL`], rather than in module-global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjKernel {
    cutoff_squared: f64,
    shift: f64,
}

impl LjKernel {
    pub fn new(cutoff: f64) -> Self {
        let cutoff_squared = cutoff * cutoff;
        Self {
            cutoff_squared,
            shift: potentials::lennard_jones(cutoff_squared),
        }
    }

    pub fn cutoff_squared(&self) -> f64 {
        self.cutoff_squared
    }

    /// Shifted pair potential: zero at and beyond the cutoff.
    #[inline]
    pub fn potential(&self, r2: f64) -> f64 {
        if r2 < self.cutoff_squared {
            potentials::lennard_jones(r2) - self.shift
        } else {
            0.0
        }
    }

    /// Force magnitude factor: zero at and beyond the cutoff.
    #[inline]
    pub fn force_factor(&self, r2: f64) -> f64 {
        if r2 < self.cutoff_squared {
            potentials::lennard_jones_force_factor(r2)
        } else {
            0.0
        }
    }

    /// Accumulates Lennard-Jones forces and potential energy into the
    /// registry's accumulator entries.
    ///
    /// Extracts the contract keys ([`keys::PARTICLE_COUNT`],
    /// [`keys::BOX_SIZE`], [`keys::POSITIONS`], [`keys::FORCES`],
    /// [`keys::POTENTIAL_ENERGY`]) and runs the O(n²) loop over ordered
    /// pairs, excluding self-pairs, with per-dimension minimum-image
    /// separations. Forces are accumulated once per ordered pair (every
    /// unordered pair is visited from both sides and the force is
    /// antisymmetric), while the potential is accumulated as half its value
    /// per ordered pair; the two conventions together count each interaction
    /// exactly once.
    pub fn accumulate(&self, state: &StateRegistry) -> Result<(), RegistryError> {
        let nparticles = *state.extract::<usize>(keys::PARTICLE_COUNT)?.borrow();
        let box_size = *state.extract::<f64>(keys::BOX_SIZE)?.borrow();
        let positions = state.extract::<Vec<Vector3<f64>>>(keys::POSITIONS)?;
        let forces = state.extract::<Vec<Vector3<f64>>>(keys::FORCES)?;
        let potential_energy = state.extract::<f64>(keys::POTENTIAL_ENERGY)?;

        let positions = positions.borrow();
        let mut forces = forces.borrow_mut();
        let mut potential_energy = potential_energy.borrow_mut();

        // The sequences carry one entry per particle; a replaced entry of the
        // wrong length is a contract violation, not a panic.
        if positions.len() != nparticles {
            return Err(RegistryError::LengthMismatch {
                key: keys::POSITIONS.to_string(),
                expected: nparticles,
                actual: positions.len(),
            });
        }
        if forces.len() != nparticles {
            return Err(RegistryError::LengthMismatch {
                key: keys::FORCES.to_string(),
                expected: nparticles,
                actual: forces.len(),
            });
        }

        for iparticle in 0..nparticles {
            for jparticle in 0..nparticles {
                if iparticle == jparticle {
                    continue;
                }
                let separation =
                    minimum_image(positions[iparticle] - positions[jparticle], box_size);
                let r2 = separation.norm_squared();

                forces[iparticle] += self.force_factor(r2) * separation;
                *potential_energy += 0.5 * self.potential(r2);
            }
        }

        Ok(())
    }
}

/// Maps a raw separation vector onto its minimum-image representative:
/// per dimension, components beyond half the box edge are folded back by one
/// box length.
#[inline]
pub fn minimum_image(mut delta: Vector3<f64>, box_size: f64) -> Vector3<f64> {
    let half = 0.5 * box_size;
    for k in 0..3 {
        if delta[k] > half {
            delta[k] -= box_size;
        }
        if delta[k] < -half {
            delta[k] += box_size;
        }
    }
    delta
}
