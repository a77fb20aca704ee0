use std::convert::Infallible;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    core::{Bound, Bounds},
    problems::geometry::{decode_points, point, Ball},
    traits::{CostFunction, Problem},
    DVector, Float,
};

/// Shortest collision-free path through a volume containing spherical obstacles.
///
/// Positions hold `n_waypoints` consecutive `(x, y, z)` triples. Collisions are detected exactly:
/// a segment collides when its closest point to a sphere's centre lies strictly inside that
/// sphere, and each colliding segment adds [`Pathfinding3D::COLLISION_PENALTY`] once, however many
/// spheres it crosses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pathfinding3D {
    start: Vector3<Float>,
    end: Vector3<Float>,
    n_waypoints: usize,
    obstacles: Vec<Ball<3>>,
}

impl Pathfinding3D {
    /// Added once per colliding segment.
    pub const COLLISION_PENALTY: Float = 1000.0;
    /// The side of the cubic volume, which spans `[0, 100]` on every axis.
    pub const MAP_SIZE: Float = 100.0;

    /// A path from `start` to `end` through `n_waypoints` free waypoints, avoiding four default
    /// spheres.
    pub fn new(start: [Float; 3], end: [Float; 3], n_waypoints: usize) -> Self {
        Self {
            start: point(start),
            end: point(end),
            n_waypoints,
            obstacles: vec![
                Ball::new([50.0, 50.0, 50.0], 20.0),
                Ball::new([20.0, 20.0, 20.0], 15.0),
                Ball::new([80.0, 80.0, 80.0], 15.0),
                Ball::new([20.0, 80.0, 50.0], 10.0),
            ],
        }
    }
    /// Replace the obstacles with spheres given as `(x, y, z, radius)`.
    pub fn with_obstacles<I: IntoIterator<Item = (Float, Float, Float, Float)>>(
        mut self,
        obstacles: I,
    ) -> Self {
        self.obstacles = obstacles
            .into_iter()
            .map(|(x, y, z, r)| Ball::new([x, y, z], r))
            .collect();
        self
    }
    /// The start of the path.
    pub fn start(&self) -> &Vector3<Float> {
        &self.start
    }
    /// The end of the path.
    pub fn end(&self) -> &Vector3<Float> {
        &self.end
    }
    /// The number of free waypoints.
    pub fn n_waypoints(&self) -> usize {
        self.n_waypoints
    }
    /// The obstacles.
    pub fn obstacles(&self) -> &[Ball<3>] {
        &self.obstacles
    }
    /// The full path described by `x`, including the fixed endpoints.
    pub fn path(&self, x: &DVector<Float>) -> Vec<Vector3<Float>> {
        let mut path = Vec::with_capacity(self.n_waypoints + 2);
        path.push(self.start);
        path.extend(decode_points::<3>(x));
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
    /// Returns `true` if the segment `a -> b` passes through any obstacle.
    pub fn segment_collides(&self, a: &Vector3<Float>, b: &Vector3<Float>) -> bool {
        self.obstacles.iter().any(|o| o.intersects_segment(a, b))
    }
    /// The total collision penalty of the path described by `x`.
    pub fn collision_penalty(&self, x: &DVector<Float>) -> Float {
        let colliding = self
            .path(x)
            .windows(2)
            .filter(|segment| self.segment_collides(&segment[0], &segment[1]))
            .count();
        colliding as Float * Self::COLLISION_PENALTY
    }
}

impl CostFunction for Pathfinding3D {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
        Ok(self.path_length(x) + self.collision_penalty(x))
    }
}

impl Problem for Pathfinding3D {
    fn bounds(&self) -> Bounds {
        vec![Bound::new(0.0, Self::MAP_SIZE); 3 * self.n_waypoints].into()
    }
}
