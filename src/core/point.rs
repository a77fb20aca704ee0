use crate::{DVector, Float};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt::Display};

/// Describes a point in parameter space along with its (optional) fitness.
///
/// An unevaluated point compares as worse than any evaluated one, which is how a particle's
/// memory starts at "$`+\infty`$" before its first evaluation.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}

impl Point {
    /// Convert the [`Point`] into a position-value tuple, with unevaluated points reporting
    /// `+inf`.
    pub fn destructure(self) -> (DVector<Float>, Float) {
        let fx = self.value();
        (self.x, fx)
    }
    /// The point's evaluation, or `+inf` if it has not been evaluated.
    pub fn value(&self) -> Float {
        self.fx.unwrap_or(Float::INFINITY)
    }
    /// The number of coordinates of the point.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// Compare two points by their `fx` value.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (&self.fx, &other.fx) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(s), Some(o)) => s.total_cmp(o),
        }
    }
    /// Returns `true` if this point is strictly better (lower) than `other`.
    pub fn improves_on(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Less
    }
    /// Move the point to a new position, resetting the evaluation of the point
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: {:?}, f(x): {:?}", self.x.as_slice(), self.fx)
    }
}

impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
