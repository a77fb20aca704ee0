use thiserror::Error;

use crate::Float;

/// Errors produced while configuring or running an optimizer.
///
/// Configuration errors are raised by constructors, before any fitness evaluation. Evaluation
/// errors abort the run on the spot; no partial result is returned.
#[derive(Error, Debug)]
pub enum PsoError {
    /// The optimizer or one of its inputs was configured with impossible values.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The fitness function returned NaN or an infinite value.
    #[error("fitness of particle #{particle} at iteration {iteration} is not finite ({value})")]
    NonFiniteFitness {
        /// The iteration in which the evaluation happened
        iteration: usize,
        /// The index of the particle being evaluated
        particle: usize,
        /// The offending value
        value: Float,
    },

    /// The fitness function itself reported a failure.
    #[error("fitness evaluation failed for particle #{particle} at iteration {iteration}: {source}")]
    FitnessEvaluation {
        /// The iteration in which the evaluation happened
        iteration: usize,
        /// The index of the particle being evaluated
        particle: usize,
        /// The error returned by the fitness function
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PsoError {
    /// Returns `true` for errors raised while validating a configuration.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}
