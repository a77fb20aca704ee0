use std::convert::Infallible;

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        utils::{linspace, maybe_warn},
        Bound, Bounds,
    },
    problems::geometry::{decode_points, point, Aabb},
    traits::{CostFunction, Problem},
    DVector, Float,
};

/// Transmitter placement for area coverage in a `D`-dimensional room.
///
/// A position vector holds `n_routers` consecutive transmitter coordinates. The room is sampled
/// by a regular lattice of `grid_resolution` points per axis (both walls of the room included),
/// and the fitness is the number of lattice points further than `signal_radius` from every
/// transmitter, so a value of zero means full coverage.
///
/// Walls are stored for display purposes only; signals pass through them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Coverage<const D: usize> {
    room_size: SVector<Float, D>,
    n_routers: usize,
    signal_radius: Float,
    grid_resolution: usize,
    grid: Vec<SVector<Float, D>>,
    walls: Vec<Aabb<D>>,
}

/// Coverage of a rectangular floor.
pub type Coverage2D = Coverage<2>;
/// Coverage of a box-shaped volume.
pub type Coverage3D = Coverage<3>;

impl<const D: usize> Coverage<D> {
    /// The lattice resolution used by [`Coverage::new`]: 50 points per axis on a floor, 20 per
    /// axis in a volume.
    pub const DEFAULT_GRID_RESOLUTION: usize = if D <= 2 { 50 } else { 20 };

    /// A room spanning `[0, room_size[d]]` along each axis, covered by `n_routers` transmitters
    /// reaching `signal_radius`.
    pub fn new(room_size: [Float; D], n_routers: usize, signal_radius: Float) -> Self {
        let room_size = point(room_size);
        Self {
            room_size,
            n_routers,
            signal_radius,
            grid_resolution: Self::DEFAULT_GRID_RESOLUTION,
            grid: Self::lattice(&room_size, Self::DEFAULT_GRID_RESOLUTION),
            walls: Vec::new(),
        }
    }
    /// Resample the room with `resolution` points per axis.
    ///
    /// A resolution whose lattice size `resolution^D` does not fit in a `usize` leaves the grid
    /// empty.
    pub fn with_grid_resolution(mut self, resolution: usize) -> Self {
        self.grid_resolution = resolution;
        self.grid = Self::lattice(&self.room_size, resolution);
        self
    }
    /// Replace the walls.
    pub fn with_walls<I: IntoIterator<Item = Aabb<D>>>(mut self, walls: I) -> Self {
        self.walls = walls.into_iter().collect();
        self
    }
    fn lattice(room_size: &SVector<Float, D>, resolution: usize) -> Vec<SVector<Float, D>> {
        let Some(n_points) = resolution.checked_pow(D as u32) else {
            maybe_warn(&format!(
                "a lattice of {resolution} points per axis is too large, coverage grid left empty"
            ));
            return Vec::new();
        };
        let axes: Vec<Vec<Float>> = room_size
            .iter()
            .map(|side| linspace(0.0, *side, resolution))
            .collect();
        (0..n_points)
            .map(|mut index| {
                SVector::<Float, D>::from_fn(|d, _| {
                    let value = axes[d][index % resolution];
                    index /= resolution;
                    value
                })
            })
            .collect()
    }
    /// The extent of the room along each axis.
    pub fn room_size(&self) -> &SVector<Float, D> {
        &self.room_size
    }
    /// The number of transmitters.
    pub fn n_routers(&self) -> usize {
        self.n_routers
    }
    /// The reach of each transmitter.
    pub fn signal_radius(&self) -> Float {
        self.signal_radius
    }
    /// The number of lattice points per axis.
    pub fn grid_resolution(&self) -> usize {
        self.grid_resolution
    }
    /// The lattice points the coverage is measured on.
    pub fn grid(&self) -> &[SVector<Float, D>] {
        &self.grid
    }
    /// The walls of the room.
    pub fn walls(&self) -> &[Aabb<D>] {
        &self.walls
    }
    /// The transmitter positions described by `x`.
    pub fn routers(&self, x: &DVector<Float>) -> Vec<SVector<Float, D>> {
        decode_points::<D>(x)
    }
    /// The number of lattice points out of reach of every transmitter.
    pub fn uncovered_count(&self, x: &DVector<Float>) -> usize {
        let routers = self.routers(x);
        let r2 = self.signal_radius * self.signal_radius;
        self.grid
            .iter()
            .filter(|p| {
                routers
                    .iter()
                    .map(|router| (*p - router).norm_squared())
                    .fold(Float::INFINITY, Float::min)
                    > r2
            })
            .count()
    }
    /// The fraction of lattice points within reach of at least one transmitter.
    pub fn coverage_fraction(&self, x: &DVector<Float>) -> Float {
        if self.grid.is_empty() {
            return 1.0;
        }
        1.0 - self.uncovered_count(x) as Float / self.grid.len() as Float
    }
}

impl Coverage<2> {
    /// The reference floor plan: a 100 x 100 room with three walls.
    pub fn reference(n_routers: usize, signal_radius: Float) -> Self {
        Self::new([100.0, 100.0], n_routers, signal_radius).with_walls([
            Aabb::from_rect(40.0, 0.0, 5.0, 60.0),
            Aabb::from_rect(40.0, 80.0, 5.0, 20.0),
            Aabb::from_rect(0.0, 50.0, 30.0, 5.0),
        ])
    }
}

impl Coverage<3> {
    /// The reference volume: a 100 x 100 x 100 room split by one partial wall.
    pub fn reference(n_routers: usize, signal_radius: Float) -> Self {
        Self::new([100.0, 100.0, 100.0], n_routers, signal_radius)
            .with_walls([Aabb::new([45.0, 0.0, 0.0], [55.0, 60.0, 100.0])])
    }
}

impl<const D: usize> CostFunction for Coverage<D> {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &()) -> Result<Float, Infallible> {
        Ok(self.uncovered_count(x) as Float)
    }
}

impl<const D: usize> Problem for Coverage<D> {
    fn bounds(&self) -> Bounds {
        (0..self.n_routers)
            .flat_map(|_| self.room_size.iter().map(|side| Bound::new(0.0, *side)))
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_grid_sizes() {
        assert_eq!(Coverage2D::new([100.0, 100.0], 3, 30.0).grid().len(), 2500);
        assert_eq!(Coverage3D::new([100.0, 100.0, 100.0], 3, 35.0).grid().len(), 8000);
        let coarse = Coverage2D::new([10.0, 20.0], 1, 1.0).with_grid_resolution(3);
        assert_eq!(coarse.grid().len(), 9);
        assert!(coarse.grid().contains(&point([5.0, 20.0])));
        assert!(coarse.grid().contains(&point([10.0, 0.0])));
    }

    #[test]
    fn test_oversized_resolution_leaves_grid_empty() {
        let problem = Coverage3D::new([1.0, 1.0, 1.0], 1, 1.0).with_grid_resolution(usize::MAX);
        assert!(problem.grid().is_empty());
        assert_eq!(problem.grid_resolution(), usize::MAX);
        assert_eq!(problem.uncovered_count(&dvector![0.5, 0.5, 0.5]), 0);
        assert_eq!(problem.coverage_fraction(&dvector![0.5, 0.5, 0.5]), 1.0);
    }

    #[test]
    fn test_bounds_follow_room() {
        let problem = Coverage3D::new([10.0, 20.0, 30.0], 2, 5.0);
        let bounds = problem.bounds();
        assert_eq!(bounds.dimension(), 6);
        assert_eq!(bounds[4], Bound::new(0.0, 20.0));
        assert_eq!(bounds[5], Bound::new(0.0, 30.0));
    }

    #[test]
    fn test_boundary_counts_as_covered() {
        let problem = Coverage2D::new([10.0, 10.0], 1, 10.0).with_grid_resolution(2);
        // only the far corner (10, 10) is out of reach
        assert_eq!(problem.uncovered_count(&dvector![0.0, 0.0]), 1);
        let volume = Coverage3D::new([10.0, 10.0, 10.0], 1, 10.0).with_grid_resolution(2);
        assert_eq!(volume.evaluate(&dvector![0.0, 0.0, 0.0], &()).unwrap(), 4.0);
    }

    #[test]
    fn test_single_central_router() {
        let problem = Coverage2D::new([100.0, 100.0], 1, 30.0);
        let uncovered = problem.uncovered_count(&dvector![50.0, 50.0]);
        // the disk covers about 28% of the floor
        assert!((uncovered as i64 - 1793).abs() < 75, "{}", uncovered);
    }

    #[test]
    fn test_full_and_empty_coverage() {
        let problem = Coverage2D::new([100.0, 100.0], 2, 200.0);
        let x = dvector![0.0, 0.0, 100.0, 100.0];
        assert_eq!(problem.evaluate(&x, &()).unwrap(), 0.0);
        assert_eq!(problem.coverage_fraction(&x), 1.0);
        let none = Coverage2D::new([100.0, 100.0], 0, 200.0);
        assert_eq!(none.uncovered_count(&DVector::zeros(0)), 2500);
        assert_eq!(none.coverage_fraction(&DVector::zeros(0)), 0.0);
    }

    #[test]
    fn test_router_order_does_not_matter() {
        let problem = Coverage3D::new([100.0, 100.0, 100.0], 2, 35.0);
        let a = dvector![10.0, 20.0, 30.0, 70.0, 60.0, 50.0];
        let b = dvector![70.0, 60.0, 50.0, 10.0, 20.0, 30.0];
        assert_eq!(problem.uncovered_count(&a), problem.uncovered_count(&b));
    }

    #[test]
    fn test_reference_walls() {
        assert_eq!(Coverage2D::reference(3, 30.0).walls().len(), 3);
        let volume = Coverage3D::reference(3, 35.0);
        assert!(volume.walls()[0].contains(&point([50.0, 30.0, 99.0])));
    }
}
