use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{algorithms::particles::Swarm, core::PsoError, DVector, Float};

/// Swarm topologies which determine the flow of information, i.e. which particle's best position
/// acts as the social attractor for each particle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmTopology {
    /// Each particle is connected to all others and follows the global best
    #[default]
    Global,
    /// Each particle is connected to the `neighbor_size` particles around it in index order,
    /// wrapping around the ends of the swarm (a ring, independent of geometry)
    Social {
        /// The number of particles in the window, including the particle itself
        neighbor_size: usize,
    },
    /// Each particle is connected to the `neighbor_size` particles currently closest to it in
    /// Euclidean distance (itself included), recomputed on every call
    Geographic {
        /// The number of nearest particles considered
        neighbor_size: usize,
    },
}

impl SwarmTopology {
    /// The neighbourhood size used when a local topology is parsed from its bare name.
    pub const DEFAULT_NEIGHBOR_SIZE: usize = 3;

    /// Select a topology by name (`"global"`, `"social"` or `"geographic"`, case-insensitive).
    /// `neighbor_size` is ignored for the global topology.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InvalidConfiguration`] for an unknown name.
    pub fn from_name(name: &str, neighbor_size: usize) -> Result<Self, PsoError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "social" => Ok(Self::Social { neighbor_size }),
            "geographic" => Ok(Self::Geographic { neighbor_size }),
            other => Err(PsoError::InvalidConfiguration(format!(
                "unknown topology \"{}\" (expected global, social or geographic)",
                other
            ))),
        }
    }

    /// The name of the topology as accepted by [`SwarmTopology::from_name`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Social { .. } => "social",
            Self::Geographic { .. } => "geographic",
        }
    }

    /// The neighbourhood size of a local topology, `None` for [`SwarmTopology::Global`].
    pub const fn neighbor_size(&self) -> Option<usize> {
        match self {
            Self::Global => None,
            Self::Social { neighbor_size } | Self::Geographic { neighbor_size } => {
                Some(*neighbor_size)
            }
        }
    }

    /// Check that the topology can be used with a swarm of `n_particles`.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InvalidConfiguration`] if a local topology has an empty neighbourhood
    /// or one at least as large as the swarm.
    pub fn validate(&self, n_particles: usize) -> Result<(), PsoError> {
        match self.neighbor_size() {
            Some(0) => Err(PsoError::InvalidConfiguration(format!(
                "{} topology needs a neighbor size of at least 1",
                self.name()
            ))),
            Some(k) if k >= n_particles => Err(PsoError::InvalidConfiguration(format!(
                "{} topology neighbor size ({}) must be smaller than the swarm size ({})",
                self.name(),
                k,
                n_particles
            ))),
            _ => Ok(()),
        }
    }

    /// The indices of the particles which inform particle `index`.
    ///
    /// For [`SwarmTopology::Global`] this is the whole swarm. The ring window of
    /// [`SwarmTopology::Social`] starts `neighbor_size / 2` places before `index`; the
    /// neighbours of [`SwarmTopology::Geographic`] are ordered by distance with ties kept in
    /// index order.
    pub fn neighbors(&self, swarm: &Swarm, index: usize) -> Vec<usize> {
        let n = swarm.len();
        match *self {
            Self::Global => (0..n).collect(),
            Self::Social { neighbor_size } => {
                let start = index as isize - (neighbor_size / 2) as isize;
                (start..start + neighbor_size as isize)
                    .map(|i| i.rem_euclid(n as isize) as usize)
                    .collect()
            }
            Self::Geographic { neighbor_size } => {
                let here = &swarm.particles[index].position.x;
                let mut distances: Vec<(Float, usize)> = swarm
                    .particles
                    .iter()
                    .enumerate()
                    .map(|(i, p)| ((&p.position.x - here).norm(), i))
                    .collect();
                distances.sort_by(|a, b| a.0.total_cmp(&b.0));
                distances
                    .into_iter()
                    .take(neighbor_size)
                    .map(|(_, i)| i)
                    .collect()
            }
        }
    }

    /// The position particle `index` should be attracted toward.
    ///
    /// The global topology always returns the swarm's global best position. Local topologies
    /// return the best position of the neighbour with the lowest best value, falling back to the
    /// particle's own best position when no neighbour has been evaluated yet.
    pub fn social_target<'a>(&self, swarm: &'a Swarm, index: usize) -> &'a DVector<Float> {
        match self {
            Self::Global => &swarm.gbest.x,
            Self::Social { .. } | Self::Geographic { .. } => swarm
                .index_of_best_among(self.neighbors(swarm, index))
                .map_or(&swarm.particles[index].best.x, |best| {
                    &swarm.particles[best].best.x
                }),
        }
    }
}

impl FromStr for SwarmTopology {
    type Err = PsoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s, Self::DEFAULT_NEIGHBOR_SIZE)
    }
}

impl Display for SwarmTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.neighbor_size() {
            Some(k) => write!(f, "{} ({} neighbors)", self.name(), k),
            None => write!(f, "{}", self.name()),
        }
    }
}
