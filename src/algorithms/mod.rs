/// Particle swarm optimization and its supporting swarm types
pub mod particles;
