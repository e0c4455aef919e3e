// src/strategy/traits.rs

use crate::error::DeliveryError;
use crate::simulation::context::Simulation;
use std::fmt::Debug;
use std::ops::ControlFlow;

/// Progress hook: called with `(iteration_or_generation, best_score_so_far)`.
///
/// Returning `ControlFlow::Break(())` asks the optimizer to stop once the
/// current iteration has finished; the best result so far is still returned.
pub type Progress<'a> = Option<&'a mut dyn FnMut(usize, f64) -> ControlFlow<()>>;

/// Best result of an optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizerOutcome<S> {
    pub solution: S,
    pub score: f64,
    /// Iterations or generations actually run.
    pub iterations: usize,
}

/// A search strategy over delivery schedules.
///
/// We require `Debug` so a driver can log which optimizer it is running.
pub trait Optimizer: Debug {
    type Solution;

    fn name(&self) -> &'static str;

    /// Searches for a high-scoring schedule for `simulation`.
    ///
    /// The simulation itself is never modified; every trial works on its own
    /// snapshot. Infeasible inputs abort the run with an error.
    fn run(
        &mut self,
        simulation: &Simulation,
        progress: Progress<'_>,
    ) -> Result<OptimizerOutcome<Self::Solution>, DeliveryError>;
}

/// Calls the progress hook if there is one.
pub(crate) fn report(progress: &mut Progress<'_>, iteration: usize, best: f64) -> ControlFlow<()> {
    match progress {
        Some(callback) => callback(iteration, best),
        None => ControlFlow::Continue(()),
    }
}
