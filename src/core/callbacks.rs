use crate::{
    core::NopAbortSignal,
    traits::{AbortSignal, Observer, Status},
};
use parking_lot::RwLock;
use std::{fmt::Debug, sync::Arc};

/// The set of [`Observer`]s and the [`AbortSignal`] attached to a run of
/// [`Algorithm::process`](crate::traits::Algorithm::process).
pub struct Callbacks<S, U> {
    observers: Vec<Arc<RwLock<dyn Observer<S, U>>>>,
    abort_signal: Arc<dyn AbortSignal>,
}

impl<S, U> Default for Callbacks<S, U> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S, U> Callbacks<S, U> {
    /// Create an empty set of callbacks with a [`NopAbortSignal`].
    pub fn empty() -> Self {
        Self {
            observers: Vec::new(),
            abort_signal: Arc::new(NopAbortSignal),
        }
    }

    /// Return the set of [`Callbacks`] with an additional [`Observer`] added.
    ///
    /// The observer is shared, so the caller can keep a handle and read it after the run.
    pub fn with_observer(mut self, observer: Arc<RwLock<dyn Observer<S, U>>>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Replace the [`AbortSignal`] polled between iterations.
    pub fn with_abort_signal(mut self, abort_signal: Arc<dyn AbortSignal>) -> Self {
        self.abort_signal = abort_signal;
        self
    }

    pub(crate) fn is_aborted(&self) -> bool {
        self.abort_signal.is_aborted()
    }

    pub(crate) fn reset_abort_signal(&self) {
        self.abort_signal.reset();
    }
}

impl<S: Status, U> Callbacks<S, U> {
    pub(crate) fn observe(&self, current_step: usize, status: &S, user_data: &U) {
        for observer in &self.observers {
            observer.write().observe(current_step, status, user_data);
        }
    }
}

/// A debugging observer which prints out the step and status at the current step
/// in an algorithm.
///
/// # Usage:
///
/// ```rust
/// use swarmlab::prelude::*;
/// use swarmlab::core::{Callbacks, DebugObserver};
/// use swarmlab::problems::Coverage2D;
///
/// let problem = Coverage2D::new([100.0, 100.0], 1, 30.0);
/// let config = PSOConfig::new(problem.bounds()).with_n_particles(4).with_max_iter(2);
/// let mut pso = PSO::new(config, Rng::with_seed(0)).unwrap();
/// let callbacks = Callbacks::empty().with_observer(DebugObserver::build());
/// let summary = pso.optimize_with(&problem, &callbacks).unwrap();
/// // ^ This will print debug messages for each step
/// assert_eq!(summary.iterations, 2);
/// ```
pub struct DebugObserver;
impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<S: Status + Debug, U> Observer<S, U> for DebugObserver {
    fn observe(&mut self, current_step: usize, status: &S, _user_data: &U) {
        println!("Step: {}\n{:#?}", current_step, status);
    }
}
