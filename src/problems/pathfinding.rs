use std::convert::Infallible;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{
    core::{utils::linspace, Bound, Bounds},
    problems::geometry::{decode_points, point, Ball},
    traits::{CostFunction, Problem},
    DVector, Float,
};

/// Shortest collision-free path through a field of circular obstacles.
///
/// A position vector holds `n_waypoints` consecutive `(x, y)` pairs. The fitness of a position is
/// the length of the polyline `start -> waypoints -> end` plus a penalty of
/// [`Pathfinding2D::COLLISION_PENALTY`] for every sample point of a segment which lies strictly
/// inside an obstacle. Each segment is sampled at [`Pathfinding2D::SAMPLES_PER_SEGMENT`] evenly
/// spaced points, endpoints included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pathfinding2D {
    start: Vector2<Float>,
    end: Vector2<Float>,
    n_waypoints: usize,
    obstacles: Vec<Ball<2>>,
}

impl Pathfinding2D {
    /// Added once per sample point found inside an obstacle.
    pub const COLLISION_PENALTY: Float = 200.0;
    /// Number of points checked along each segment.
    pub const SAMPLES_PER_SEGMENT: usize = 5;
    /// The side of the square map, which spans `[0, 100]` on both axes.
    pub const MAP_SIZE: Float = 100.0;

    /// A path from `start` to `end` through `n_waypoints` free waypoints, with four default
    /// obstacles at `(30, 30)`, `(60, 60)`, `(30, 70)` and `(70, 20)`.
    pub fn new(start: [Float; 2], end: [Float; 2], n_waypoints: usize) -> Self {
        Self {
            start: point(start),
            end: point(end),
            n_waypoints,
            obstacles: vec![
                Ball::new([30.0, 30.0], 10.0),
                Ball::new([60.0, 60.0], 15.0),
                Ball::new([30.0, 70.0], 10.0),
                Ball::new([70.0, 20.0], 10.0),
            ],
        }
    }
    /// Replace the obstacles with disks given as `(x, y, radius)`.
    pub fn with_obstacles<I: IntoIterator<Item = (Float, Float, Float)>>(
        mut self,
        obstacles: I,
    ) -> Self {
        self.obstacles = obstacles
            .into_iter()
            .map(|(x, y, r)| Ball::new([x, y], r))
            .collect();
        self
    }
    /// The start of the path.
    pub fn start(&self) -> &Vector2<Float> {
        &self.start
    }
    /// The end of the path.
    pub fn end(&self) -> &Vector2<Float> {
        &self.end
    }
    /// The number of free waypoints.
    pub fn n_waypoints(&self) -> usize {
        self.n_waypoints
    }
    /// The obstacles.
    pub fn obstacles(&self) -> &[Ball<2>] {
        &self.obstacles
    }
    /// The full path described by `x`, including the fixed endpoints.
    pub fn path(&self, x: &DVector<Float>) -> Vec<Vector2<Float>> {
        let mut path = Vec::with_capacity(self.n_waypoints + 2);
        path.push(self.start);
        path.extend(decode_points::<2>(x));
        path.push(self.end);
        path
    }
    /// The Euclidean length of the path described by `x`.
    pub fn path_length(&self, x: &DVector<Float>) -> Float {
        self.path(x)
            .windows(2)
            .map(|segment| (segment[1] - segment[0]).norm())
            .sum()
    }
    /// The total collision penalty of the path described by `x`.
    pub fn collision_penalty(&self, x: &DVector<Float>) -> Float {
        let samples = linspace(0.0, 1.0, Self::SAMPLES_PER_SEGMENT);
        let hits: usize = self
            .path(x)
            .windows(2)
            .map(|segment| {
                samples
                    .iter()
                    .map(|t| segment[0] + (segment[1] - segment[0]) * *t)
                    .filter(|p| self.obstacles.iter().any(|o| o.contains(p)))
                    .count()
            })
            .sum();
        hits as Float * Self::COLLISION_PENALTY
    }
}

impl CostFunction for Pathfinding2D {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
        Ok(self.path_length(x) + self.collision_penalty(x))
    }
}

impl Problem for Pathfinding2D {
    fn bounds(&self) -> Bounds {
        vec![Bound::new(0.0, Self::MAP_SIZE); 2 * self.n_waypoints].into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    fn corridor() -> Pathfinding2D {
        Pathfinding2D::new([0.0, 50.0], [100.0, 50.0], 1)
    }

    #[test]
    fn test_bounds() {
        let problem = Pathfinding2D::new([5.0, 5.0], [95.0, 95.0], 5);
        let bounds = problem.bounds();
        assert_eq!(bounds.dimension(), 10);
        assert!(bounds.iter().all(|b| *b == Bound::new(0.0, 100.0)));
    }

    #[test]
    fn test_free_path_costs_its_length() {
        let problem = Pathfinding2D::new([0.0, 0.0], [30.0, 40.0], 1).with_obstacles([]);
        let x = dvector![15.0, 20.0];
        assert_relative_eq!(problem.path_length(&x), 50.0);
        assert_eq!(problem.collision_penalty(&x), 0.0);
        assert_relative_eq!(problem.evaluate(&x, &()).unwrap(), 50.0);
    }

    #[test]
    fn test_penalty_per_sample() {
        // the two segments are sampled at x = 0, 12.5, 25, 37.5, 50 and 50, 62.5, 75, 87.5, 100
        let x = dvector![50.0, 50.0];
        let one = corridor().with_obstacles([(25.0, 50.0, 1.0)]);
        assert_eq!(one.collision_penalty(&x), 200.0);
        let wide = corridor().with_obstacles([(50.0, 50.0, 20.0)]);
        // 37.5, 50 (twice, once per segment) and 62.5
        assert_eq!(wide.collision_penalty(&x), 800.0);
        assert_relative_eq!(wide.evaluate(&x, &()).unwrap(), 900.0);
    }

    #[test]
    fn test_overlapping_obstacles_count_once() {
        let x = dvector![50.0, 50.0];
        let problem = corridor().with_obstacles([(25.0, 50.0, 1.0), (25.5, 50.0, 1.0)]);
        assert_eq!(problem.collision_penalty(&x), 200.0);
    }

    #[test]
    fn test_obstacle_boundary_is_free() {
        let x = dvector![50.0, 50.0];
        let problem = corridor().with_obstacles([(25.0, 60.0, 10.0)]);
        assert_eq!(problem.collision_penalty(&x), 0.0);
    }

    #[test]
    fn test_default_obstacles_block_the_diagonal() {
        let problem = Pathfinding2D::new([5.0, 5.0], [95.0, 95.0], 1);
        let x = dvector![50.0, 50.0];
        assert!(problem.collision_penalty(&x) > 0.0);
        assert_eq!(problem.obstacles().len(), 4);
        assert_eq!(problem.path(&x).len(), 3);
    }
}
