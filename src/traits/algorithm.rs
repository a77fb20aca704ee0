use crate::{
    core::{Callbacks, PsoError},
    traits::Status,
};
use std::convert::Infallible;

/// A trait representing an iterative optimization algorithm.
///
/// This trait is implemented for the algorithms found in the [`algorithms`](crate::algorithms)
/// module, and contains all the methods needed to drive a run through
/// [`Algorithm::process`].
pub trait Algorithm<P, S: Status, U = (), E = Infallible> {
    /// A type which holds a summary of the algorithm's ending state.
    type Summary;

    /// Any setup work done before the main steps of the algorithm should be done here.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] if setup fails.
    fn initialize(&mut self, problem: &P, status: &mut S, user_data: &U) -> Result<(), PsoError>;

    /// The main "step" of an algorithm, which is repeated exactly
    /// [`Algorithm::max_steps`] times unless the run is aborted.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] if a fitness evaluation fails. See
    /// [`CostFunction::evaluate`](crate::traits::CostFunction::evaluate) for more information.
    fn step(
        &mut self,
        current_step: usize,
        problem: &P,
        status: &mut S,
        user_data: &U,
    ) -> Result<(), PsoError>;

    /// The fixed number of steps in a complete run.
    fn max_steps(&self) -> usize;

    /// Runs any steps needed by the [`Algorithm`] after the last step. This will run whether
    /// or not the run was aborted.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] if any final evaluation fails.
    #[allow(unused_variables)]
    fn postprocessing(&mut self, problem: &P, status: &mut S, user_data: &U) -> Result<(), PsoError> {
        Ok(())
    }

    /// Generates a new [`Algorithm::Summary`] from the current state of the [`Algorithm`], which
    /// can be displayed or used elsewhere.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] if any internal evaluation fails while creating the
    /// [`Algorithm::Summary`].
    fn summarize(
        &self,
        current_step: usize,
        problem: &P,
        status: &S,
        user_data: &U,
    ) -> Result<Self::Summary, PsoError>;

    /// Run the algorithm to completion.
    ///
    /// This method first runs [`Algorithm::initialize`], then runs [`Algorithm::step`]
    /// [`Algorithm::max_steps`] times. After each step every observer in `callbacks` is called in
    /// order. The abort signal in `callbacks` is checked before each step, which is the only point
    /// at which a run can stop early; an aborted run still produces a summary, with the
    /// [`Status::message`] set to `"Abort signal received"`. Finally
    /// [`Algorithm::postprocessing`] and [`Algorithm::summarize`] are called.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] as soon as any step fails; no summary is produced in that case.
    fn process(
        &mut self,
        problem: &P,
        user_data: &U,
        callbacks: &Callbacks<S, U>,
    ) -> Result<Self::Summary, PsoError>
    where
        Self: Sized,
    {
        let mut status = S::default();
        status.reset();
        callbacks.reset_abort_signal();
        self.initialize(problem, &mut status, user_data)?;
        let max_steps = self.max_steps();
        let mut current_step = 0;
        while current_step < max_steps {
            if callbacks.is_aborted() {
                tracing::warn!(
                    completed = current_step,
                    budget = max_steps,
                    "abort signal received, stopping run"
                );
                status.update_message("Abort signal received");
                break;
            }
            self.step(current_step, problem, &mut status, user_data)?;
            callbacks.observe(current_step, &status, user_data);
            current_step += 1;
        }
        self.postprocessing(problem, &mut status, user_data)?;
        self.summarize(current_step, problem, &status, user_data)
    }
}
