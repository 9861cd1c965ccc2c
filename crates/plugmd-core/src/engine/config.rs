use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be nonzero")]
    NoParticles,

    #[error("box size must be positive and finite, got {0}")]
    InvalidBoxSize(f64),

    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
}

/// Parameters fixed at simulation construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of particles in the system.
    pub particles: usize,
    /// Edge length of the cubic periodic cell, in reduced units.
    pub box_size: f64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !self.box_size.is_finite() || self.box_size <= 0.0 {
            return Err(ConfigError::InvalidBoxSize(self.box_size));
        }
        Ok(())
    }
}

/// Parameters supplied per run invocation.
///
/// The integration assumes a single periodic wrap per step suffices, i.e.
/// per-step displacements stay below the box edge length; `dt` should be
/// chosen accordingly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    /// Number of time-integration steps to perform.
    pub steps: usize,
    /// Timestep size in reduced units.
    pub dt: f64,
}

impl RunParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep(self.dt));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_configuration_passes_validation() {
        let config = SimulationConfig {
            particles: 1000,
            box_size: 20.0,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_particles_are_rejected() {
        let config = SimulationConfig {
            particles: 0,
            box_size: 20.0,
        };
        assert_eq!(config.validate(), Err(ConfigError::NoParticles));
    }

    #[test]
    fn non_positive_or_non_finite_box_sizes_are_rejected() {
        for box_size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig {
                particles: 8,
                box_size,
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidBoxSize(_))
            ));
        }
    }

    #[test]
    fn non_positive_timesteps_are_rejected() {
        for dt in [0.0, -0.005, f64::NAN] {
            let params = RunParameters { steps: 100, dt };
            assert!(matches!(
                params.validate(),
                Err(ConfigError::InvalidTimestep(_))
            ));
        }
    }

    #[test]
    fn a_zero_step_run_is_allowed() {
        let params = RunParameters { steps: 0, dt: 0.005 };
        assert!(params.validate().is_ok());
    }
}
