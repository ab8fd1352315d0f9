use ndarray::Array1;
use rand::Rng;

use crate::Observation;

/// How a system's output relates to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loop {
    /// An autonomous source that ignores its input, such as a signal
    /// generator or a file reader.
    Open,

    /// A system whose output is only meaningful as a function of the input it
    /// is driven with, such as a simulated or real robot.
    Closed,
}

/// A system that advances by one discrete time step per call.
///
/// A system is anything that can be packed into a box with an input, an
/// output, and some internal activity transforming one into the other.
/// Each instance exclusively owns its state; `&mut self` on [`step`] and
/// [`reset`] makes a single driver per instance the only way to use it.
///
/// Stochastic systems draw all their randomness from the `rng` passed to
/// [`step`], so a run is reproducible given the seed of that generator.
///
/// [`step`]: System::step
/// [`reset`]: System::reset
pub trait System {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns whether the system is open or closed loop.
    fn control_loop(&self) -> Loop;

    /// Returns the number of elements `step` expects in its input.
    fn input_dim(&self) -> usize;

    /// Advances the system by one step and returns the resulting sensors.
    ///
    /// A failed step leaves the system state untouched.
    ///
    /// # Errors
    ///
    /// Each system defines its own `Error` type, but an input whose length is
    /// not [`input_dim`](System::input_dim) is always an error.
    fn step<R: Rng + ?Sized>(
        &mut self,
        input: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Observation, Self::Error>;

    /// Restores the system to its initial state.
    fn reset(&mut self);
}

/// A captured input/output pair from a system step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}
