/// Module containing the coverage problems.
pub mod coverage;
pub use coverage::{Coverage, Coverage2D, Coverage3D};

/// Obstacles, walls and position decoding shared by the problems.
pub mod geometry;
pub use geometry::{Aabb, Ball};

/// Module containing the planar pathfinding problem.
pub mod pathfinding;
pub use pathfinding::Pathfinding2D;

/// Module containing the volumetric pathfinding problem.
pub mod pathfinding_3d;
pub use pathfinding_3d::Pathfinding3D;

use std::{convert::Infallible, fmt::Display, str::FromStr};

use crate::{
    core::{Bounds, PsoError},
    traits::{CostFunction, Problem},
    DVector, Float,
};

/// The four reference scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    /// [`Pathfinding2D`] from `(5, 5)` to `(95, 95)`
    Pathfinding2D,
    /// [`Pathfinding3D`] from `(5, 5, 5)` to `(95, 95, 95)`
    Pathfinding3D,
    /// [`Coverage2D::reference`] with a signal radius of 35
    Coverage2D,
    /// [`Coverage3D::reference`] with a signal radius of 45
    Coverage3D,
}

impl ProblemKind {
    /// All scenarios, in display order.
    pub const ALL: [Self; 4] = [
        Self::Pathfinding2D,
        Self::Pathfinding3D,
        Self::Coverage2D,
        Self::Coverage3D,
    ];

    /// Build the scenario with `size` waypoints (pathfinding) or routers (coverage).
    pub fn build(&self, size: usize) -> Scenario {
        match self {
            Self::Pathfinding2D => {
                Scenario::Pathfinding2D(Pathfinding2D::new([5.0, 5.0], [95.0, 95.0], size))
            }
            Self::Pathfinding3D => Scenario::Pathfinding3D(Pathfinding3D::new(
                [5.0, 5.0, 5.0],
                [95.0, 95.0, 95.0],
                size,
            )),
            Self::Coverage2D => Scenario::Coverage2D(Coverage2D::reference(size, 35.0)),
            Self::Coverage3D => Scenario::Coverage3D(Coverage3D::reference(size, 45.0)),
        }
    }

    /// The number of waypoints or routers used when none is given.
    pub const fn default_size(&self) -> usize {
        match self {
            Self::Pathfinding2D | Self::Pathfinding3D => 5,
            Self::Coverage2D | Self::Coverage3D => 3,
        }
    }

    /// The `(n_particles, max_iter)` budget these scenarios are usually run with.
    pub const fn default_budget(&self) -> (usize, usize) {
        match self {
            Self::Pathfinding2D => (50, 100),
            Self::Pathfinding3D => (50, 80),
            Self::Coverage2D | Self::Coverage3D => (40, 60),
        }
    }

    /// The name accepted by [`ProblemKind::from_str`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pathfinding2D => "pathfinding",
            Self::Pathfinding3D => "pathfinding-3d",
            Self::Coverage2D => "coverage",
            Self::Coverage3D => "coverage-3d",
        }
    }
}

impl Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProblemKind {
    type Err = PsoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| {
                PsoError::InvalidConfiguration(format!(
                    "unknown problem \"{}\" (expected one of {})",
                    s,
                    Self::ALL.map(|kind| kind.name()).join(", ")
                ))
            })
    }
}

/// One of the reference problems, built by [`ProblemKind::build`].
#[derive(Clone, Debug)]
pub enum Scenario {
    /// A planar path
    Pathfinding2D(Pathfinding2D),
    /// A path through a volume
    Pathfinding3D(Pathfinding3D),
    /// Coverage of a floor
    Coverage2D(Coverage2D),
    /// Coverage of a volume
    Coverage3D(Coverage3D),
}

impl Scenario {
    /// The covered fraction of the room for coverage scenarios, `None` for paths.
    pub fn coverage_fraction(&self, x: &DVector<Float>) -> Option<Float> {
        match self {
            Self::Coverage2D(problem) => Some(problem.coverage_fraction(x)),
            Self::Coverage3D(problem) => Some(problem.coverage_fraction(x)),
            Self::Pathfinding2D(_) | Self::Pathfinding3D(_) => None,
        }
    }
}

impl CostFunction for Scenario {
    fn evaluate(&self, x: &DVector<Float>, user_data: &()) -> Result<Float, Infallible> {
        match self {
            Self::Pathfinding2D(problem) => problem.evaluate(x, user_data),
            Self::Pathfinding3D(problem) => problem.evaluate(x, user_data),
            Self::Coverage2D(problem) => problem.evaluate(x, user_data),
            Self::Coverage3D(problem) => problem.evaluate(x, user_data),
        }
    }
}

impl Problem for Scenario {
    fn bounds(&self) -> Bounds {
        match self {
            Self::Pathfinding2D(problem) => problem.bounds(),
            Self::Pathfinding3D(problem) => problem.bounds(),
            Self::Coverage2D(problem) => problem.bounds(),
            Self::Coverage3D(problem) => problem.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ProblemKind::ALL {
            assert_eq!(kind.to_string().parse::<ProblemKind>().unwrap(), kind);
        }
        assert_eq!(
            "Coverage-3D".parse::<ProblemKind>().unwrap(),
            ProblemKind::Coverage3D
        );
        assert!("maze".parse::<ProblemKind>().is_err());
    }

    #[test]
    fn test_build_dimensions() {
        let dims: Vec<usize> = ProblemKind::ALL
            .iter()
            .map(|kind| kind.build(kind.default_size()).bounds().dimension())
            .collect();
        assert_eq!(dims, vec![10, 15, 6, 9]);
    }

    #[test]
    fn test_scenario_delegates() {
        let scenario = ProblemKind::Coverage2D.build(1);
        let x = DVector::from_vec(vec![50.0, 50.0]);
        let direct = Coverage2D::reference(1, 35.0);
        assert_eq!(
            scenario.evaluate(&x, &()).unwrap(),
            direct.evaluate(&x, &()).unwrap()
        );
        assert!(scenario.coverage_fraction(&x).is_some());
        assert!(ProblemKind::Pathfinding2D
            .build(2)
            .coverage_fraction(&DVector::zeros(4))
            .is_none());
    }
}
