use crate::{algorithms::particles::Swarm, core::Point, traits::Status, DVector, Float};
use serde::{Deserialize, Serialize};

/// The mutable state of a [`PSO`](crate::algorithms::particles::PSO) run.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The swarm
    pub swarm: Swarm,
    /// The number of completed iterations
    pub iteration: usize,
    /// The inertia weight used by the most recent update
    pub omega: Float,
    /// Snapshots of every particle's position, taken at the start of each iteration
    pub history: Vec<Vec<DVector<Float>>>,
    /// The global best value after the evaluation phase of each iteration
    pub cost_history: Vec<Float>,
    /// A message containing information about the condition of the run
    pub message: String,
    /// The number of fitness evaluations
    pub n_f_evals: usize,
}

impl SwarmStatus {
    /// The global best position found by all particles.
    pub fn get_best(&self) -> &Point {
        &self.swarm.gbest
    }
}

impl Status for SwarmStatus {
    fn reset(&mut self) {
        self.swarm = Swarm::default();
        self.iteration = 0;
        self.omega = 0.0;
        self.history.clear();
        self.cost_history.clear();
        self.message.clear();
        self.n_f_evals = 0;
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}
