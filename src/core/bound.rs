use crate::{
    core::{utils::SampleFloat, PsoError},
    DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

/// An inclusive interval `[lower, upper]` which limits one coordinate of the search space.
///
/// [`Bound`]s are built unchecked from `(lower, upper)` tuples so problems can describe their
/// search space concisely; [`Bounds::validate`] rejects malformed intervals before a run starts.
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bound {
    lower: Float,
    upper: Float,
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<&Self> for Bound {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl Bound {
    /// Create a new [`Bound`] spanning `[lower, upper]`.
    pub const fn new(lower: Float, upper: Float) -> Self {
        Self { lower, upper }
    }
    /// Returns the lower end of the interval.
    pub const fn lower(&self) -> Float {
        self.lower
    }
    /// Returns the upper end of the interval.
    pub const fn upper(&self) -> Float {
        self.upper
    }
    /// Returns the length of the interval, `upper - lower`.
    pub fn width(&self) -> Float {
        self.upper - self.lower
    }
    /// Returns `true` if both ends are finite and `lower <= upper`.
    pub fn is_valid(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower <= self.upper
    }
    /// Checks whether the given `value` lies inside the interval (ends included).
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Hard-clip `value` into the interval.
    pub fn clamp(&self, value: Float) -> Float {
        value.max(self.lower).min(self.upper)
    }
    /// Checks if the given value sits exactly on one of the ends.
    pub fn at_bound(&self, value: Float) -> bool {
        value == self.lower || value == self.upper
    }
    /// Get a value in the uniform distribution between `lower` and `upper`.
    ///
    /// A degenerate interval (`lower == upper`) always yields `lower`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        if self.lower < self.upper {
            rng.range(self.lower, self.upper)
        } else {
            self.lower
        }
    }
}

/// The ordered list of [`Bound`]s describing the feasible box, one per dimension.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Returns the inner Vector of bounds.
    pub fn into_inner(self) -> Vec<Bound> {
        self.0
    }
    /// The number of dimensions of the search space.
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
    /// Check that the bounds describe a non-empty, finite box.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InvalidConfiguration`] if there are no bounds or if any interval has a
    /// non-finite end or `lower > upper`.
    pub fn validate(&self) -> Result<(), PsoError> {
        if self.0.is_empty() {
            return Err(PsoError::InvalidConfiguration(
                "bounds must define at least one dimension".to_string(),
            ));
        }
        if let Some((i, bound)) = self.0.iter().enumerate().find(|(_, b)| !b.is_valid()) {
            return Err(PsoError::InvalidConfiguration(format!(
                "bound #{} = {} is not a finite interval with lower <= upper",
                i, bound
            )));
        }
        Ok(())
    }
    /// Draw a vector whose components are independently uniform within each bound.
    pub fn random_vector_in(&self, rng: &mut Rng) -> DVector<Float> {
        DVector::from_iterator(self.0.len(), self.0.iter().map(|b| b.get_uniform(rng)))
    }
    /// Checks whether every component of `x` lies inside its bound.
    pub fn contains(&self, x: &DVector<Float>) -> bool {
        x.len() == self.0.len() && x.iter().zip(self.0.iter()).all(|(v, b)| b.contains(*v))
    }
    /// Hard-clip every component of `x` into its bound.
    pub fn clamp(&self, x: &mut DVector<Float>) {
        x.iter_mut()
            .zip(self.0.iter())
            .for_each(|(v, b)| *v = b.clamp(*v));
    }
    /// The per-dimension velocity limits, `fraction * (upper - lower)`.
    pub fn velocity_limits(&self, fraction: Float) -> DVector<Float> {
        DVector::from_iterator(self.0.len(), self.0.iter().map(|b| fraction * b.width()))
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(value: Vec<Bound>) -> Self {
        Self(value)
    }
}

impl<B: Into<Bound>> FromIterator<B> for Bounds {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bounds {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    fn sample_bounds() -> Bounds {
        vec![(0.0, 100.0), (-1.0, 1.0), (10.0, 20.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_bound_contains_and_clamp() {
        let b = Bound::new(-1.0, 1.0);
        assert!(b.contains(0.0));
        assert!(b.contains(-1.0));
        assert!(b.contains(1.0));
        assert!(!b.contains(1.5));
        assert_eq!(b.clamp(2.0), 1.0);
        assert_eq!(b.clamp(-7.0), -1.0);
        assert_eq!(b.clamp(0.25), 0.25);
        assert!(b.at_bound(1.0));
        assert!(!b.at_bound(0.0));
    }

    #[test]
    fn test_bound_validity() {
        assert!(Bound::new(0.0, 1.0).is_valid());
        assert!(Bound::new(3.0, 3.0).is_valid());
        assert!(!Bound::new(1.0, 0.0).is_valid());
        assert!(!Bound::new(0.0, Float::INFINITY).is_valid());
        assert!(!Bound::new(Float::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_degenerate_bound_uniform() {
        let mut rng = Rng::with_seed(0);
        let b = Bound::new(4.0, 4.0);
        assert_eq!(b.get_uniform(&mut rng), 4.0);
    }

    #[test]
    fn test_bounds_validate() {
        assert!(sample_bounds().validate().is_ok());
        assert!(matches!(
            Bounds::default().validate(),
            Err(PsoError::InvalidConfiguration(_))
        ));
        let bad: Bounds = vec![(0.0, 1.0), (5.0, 2.0)].into_iter().collect();
        assert!(matches!(
            bad.validate(),
            Err(PsoError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_random_vector_is_in_bounds() {
        let mut rng = Rng::with_seed(0);
        let bounds = sample_bounds();
        for _ in 0..100 {
            let v = bounds.random_vector_in(&mut rng);
            assert_eq!(v.len(), bounds.dimension());
            assert!(bounds.contains(&v));
        }
    }

    #[test]
    fn test_clamp_vector() {
        let bounds = sample_bounds();
        let mut v = dvector![-5.0, 0.5, 25.0];
        bounds.clamp(&mut v);
        assert_eq!(v, dvector![0.0, 0.5, 20.0]);
    }

    #[test]
    fn test_velocity_limits() {
        let limits = sample_bounds().velocity_limits(0.2);
        assert_relative_eq!(limits[0], 20.0);
        assert_relative_eq!(limits[1], 0.4);
        assert_relative_eq!(limits[2], 2.0);
    }

    #[test]
    fn test_bounds_container() {
        let b = Bound::new(0.0, 1.0);
        let bounds: Bounds = vec![b].into();
        assert_eq!(bounds.into_inner(), vec![b]);
    }
}
