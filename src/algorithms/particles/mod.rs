/// Implementation of Particle Swarm Optimization (PSO) algorithm
pub mod pso;
pub use pso::{PSOConfig, PSO};

/// [`Swarm`] type for swarm-based optimizers.
pub mod swarm;
pub use swarm::{Swarm, SwarmParticle};

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;

/// [`SwarmTopology`] type which chooses each particle's social attractor.
pub mod topology;
pub use topology::SwarmTopology;
