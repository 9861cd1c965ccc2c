/// Per-step energy report produced by the simulation loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEnergies {
    /// Zero-based index of the completed step.
    pub step: usize,
    pub potential: f64,
    pub kinetic: f64,
}

impl StepEnergies {
    pub fn total(&self) -> f64 {
        self.potential + self.kinetic
    }
}

pub type StepCallback<'a> = Box<dyn Fn(StepEnergies) + 'a>;

/// Forwards per-step energies to an optional caller-supplied callback; the
/// engine itself never writes to the console.
#[derive(Default)]
pub struct StepReporter<'a> {
    callback: Option<StepCallback<'a>>,
}

impl<'a> StepReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: StepCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, energies: StepEnergies) {
        if let Some(cb) = &self.callback {
            cb(energies);
        }
    }
}
