//! `swarmlab` runs particle swarm optimization (PSO) on continuous search spaces and ships the
//! two problem families it was built around: obstacle-avoiding path planning and transmitter
//! placement for area coverage, each in two and three dimensions.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [The Update Rule](#the-update-rule)
//! - [Replay Data](#replay-data)
//!
//! # Key Features
//! * A fixed-budget PSO with a linearly annealed inertia weight, per-dimension velocity clamping
//!   and hard clipping at the search-space boundary.
//! * Three neighbourhood topologies: global best, index ring ("social") and k-nearest
//!   ("geographic").
//! * Full per-iteration replay data: every particle's position and the best-known cost.
//! * Seeded, reproducible runs through [`fastrand::Rng`].
//! * Pressing `Ctrl-C` during a run (with a [`CtrlCAbortSignal`](core::CtrlCAbortSignal)) stops
//!   it at the next iteration boundary while still producing a summary.
//!
//! # Quick Start
//!
//! Any type implementing [`CostFunction`](traits::CostFunction) and
//! [`Problem`](traits::Problem) can be optimized:
//!
//! ```rust
//! use swarmlab::prelude::*;
//! use swarmlab::problems::Pathfinding2D;
//!
//! fn main() -> Result<(), PsoError> {
//!     let problem = Pathfinding2D::new([5.0, 5.0], [95.0, 95.0], 3);
//!     let config = PSOConfig::new(problem.bounds())
//!         .with_n_particles(30)
//!         .with_max_iter(60)
//!         .with_topology(SwarmTopology::from_name("social", 5)?);
//!     let mut pso = PSO::new(config, Rng::with_seed(0))?;
//!     let summary = pso.optimize(&problem)?;
//!     assert_eq!(summary.history.len(), 60);
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! # The Update Rule
//!
//! Each iteration first evaluates every particle, then moves every particle:
//!
//! ```math
//! v_i^{t+1} = \omega_t v_i^t + c_1 r_1 \odot (p_i - x_i^t) + c_2 r_2 \odot (s_i - x_i^t)
//! ```
//! ```math
//! x_i^{t+1} = \text{clip}(x_i^t + \text{clip}(v_i^{t+1}, \pm v_\text{max}), \text{bounds})
//! ```
//! where $`\omega_t = 0.9 - 0.5\,t/T`$, $`r_1, r_2 \sim U(0, 1)^D`$, $`p_i`$ is the particle's
//! best position and $`s_i`$ the social attractor chosen by the
//! [`SwarmTopology`](algorithms::particles::SwarmTopology).
//!
//! # Replay Data
//!
//! [`SwarmSummary::history`](core::SwarmSummary) holds, for every iteration, the positions of all
//! particles *before* that iteration's move, and
//! [`SwarmSummary::cost_history`](core::SwarmSummary) the best value known after that iteration's
//! evaluation. Plotting and animation are left to the consumer; the summary serializes with
//! `serde` (the bundled binary writes it as a Python pickle).
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the optimization algorithms
pub mod algorithms;
/// Module containing core types (bounds, points, summaries, errors and signals)
pub mod core;
/// Module containing the path planning and coverage problems
pub mod problems;
/// Module containing the traits which connect problems, algorithms and hosts
pub mod traits;

pub use nalgebra::DVector;

/// A floating-point number type (defaults to [`f64`], see `features = ["f32"]`)
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// A floating-point number type (defaults to [`f64`], see `features = ["f32"]`)
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant $`\pi`$.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        algorithms::particles::{PSOConfig, SwarmTopology, PSO},
        core::{Bound, Bounds, PsoError, SwarmSummary},
        traits::{Algorithm, CostFunction, Problem},
        DVector, Float,
    };
    pub use fastrand::Rng;
}
