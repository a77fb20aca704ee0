use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::{DVector, Float};

/// Split a flat position vector into consecutive `D`-component points.
///
/// Trailing components which do not fill a whole point are ignored.
pub fn decode_points<const D: usize>(x: &DVector<Float>) -> Vec<SVector<Float, D>> {
    x.as_slice()
        .chunks_exact(D)
        .map(SVector::<Float, D>::from_column_slice)
        .collect()
}

/// Convert a fixed-size array into a point.
pub fn point<const D: usize>(coordinates: [Float; D]) -> SVector<Float, D> {
    SVector::from(coordinates)
}

/// A closed ball (a disk in 2D, a sphere in 3D) used as an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball<const D: usize> {
    /// The centre of the ball
    pub center: SVector<Float, D>,
    /// The radius of the ball
    pub radius: Float,
}

impl<const D: usize> Ball<D> {
    /// Create a ball at `center` with the given `radius`.
    pub fn new(center: [Float; D], radius: Float) -> Self {
        Self {
            center: point(center),
            radius,
        }
    }
    /// Returns `true` if `p` lies strictly inside the ball.
    pub fn contains(&self, p: &SVector<Float, D>) -> bool {
        (p - self.center).norm() < self.radius
    }
    /// The distance from the centre to the closest point of the segment `a -> b`, or `None` for a
    /// zero-length segment.
    pub fn distance_to_segment(
        &self,
        a: &SVector<Float, D>,
        b: &SVector<Float, D>,
    ) -> Option<Float> {
        let d = b - a;
        let d2 = d.dot(&d);
        if d2 == 0.0 {
            return None;
        }
        let t = (-(a - self.center).dot(&d) / d2).clamp(0.0, 1.0);
        Some((a + d * t - self.center).norm())
    }
    /// Returns `true` if the segment `a -> b` passes strictly inside the ball. Zero-length
    /// segments never intersect.
    pub fn intersects_segment(&self, a: &SVector<Float, D>, b: &SVector<Float, D>) -> bool {
        self.distance_to_segment(a, b)
            .map_or(false, |distance| distance < self.radius)
    }
}

/// An axis-aligned box, used for walls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb<const D: usize> {
    /// The corner with the smallest coordinates
    pub min: SVector<Float, D>,
    /// The corner with the largest coordinates
    pub max: SVector<Float, D>,
}

impl<const D: usize> Aabb<D> {
    /// Create a box spanning `min` to `max`.
    pub fn new(min: [Float; D], max: [Float; D]) -> Self {
        Self {
            min: point(min),
            max: point(max),
        }
    }
    /// Returns `true` if `p` lies inside the box (faces included).
    pub fn contains(&self, p: &SVector<Float, D>) -> bool {
        p.iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }
    /// The extent of the box along each axis.
    pub fn size(&self) -> SVector<Float, D> {
        self.max - self.min
    }
}

impl Aabb<2> {
    /// A rectangle given by its lower-left corner, width and height.
    pub fn from_rect(x: Float, y: Float, width: Float, height: Float) -> Self {
        Self::new([x, y], [x + width, y + height])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_decode_points() {
        let points = decode_points::<2>(&dvector![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(points, vec![point([1.0, 2.0]), point([3.0, 4.0])]);
        assert_eq!(decode_points::<3>(&dvector![1.0, 2.0, 3.0]).len(), 1);
    }

    #[test]
    fn test_ball_contains_is_strict() {
        let disk = Ball::new([0.0, 0.0], 1.0);
        assert!(disk.contains(&point([0.5, 0.5])));
        assert!(!disk.contains(&point([1.0, 0.0])));
    }

    #[test]
    fn test_segment_distance() {
        let sphere = Ball::new([0.0, 0.0, 0.0], 1.0);
        let a = point([-2.0, 0.5, 0.0]);
        let b = point([2.0, 0.5, 0.0]);
        assert_relative_eq!(sphere.distance_to_segment(&a, &b).unwrap(), 0.5);
        assert!(sphere.intersects_segment(&a, &b));
        // closest point is clamped to the nearer endpoint
        let c = point([3.0, 0.0, 0.0]);
        let d = point([5.0, 0.0, 0.0]);
        assert_relative_eq!(sphere.distance_to_segment(&c, &d).unwrap(), 3.0);
        assert!(!sphere.intersects_segment(&c, &d));
        // tangent segments do not intersect
        let e = point([-2.0, 1.0, 0.0]);
        let f = point([2.0, 1.0, 0.0]);
        assert!(!sphere.intersects_segment(&e, &f));
    }

    #[test]
    fn test_zero_length_segment_never_intersects() {
        let sphere = Ball::new([0.0, 0.0, 0.0], 1.0);
        let a = point([0.0, 0.0, 0.0]);
        assert_eq!(sphere.distance_to_segment(&a, &a), None);
        assert!(!sphere.intersects_segment(&a, &a));
    }

    #[test]
    fn test_aabb() {
        let wall = Aabb::from_rect(40.0, 0.0, 5.0, 60.0);
        assert_eq!(wall.max, point([45.0, 60.0]));
        assert_eq!(wall.size(), point([5.0, 60.0]));
        assert!(wall.contains(&point([45.0, 30.0])));
        assert!(!wall.contains(&point([46.0, 30.0])));
    }
}
