use std::convert::Infallible;

use crate::core::Bounds;

use super::CostFunction;

/// A [`CostFunction`] which also knows its own search space.
///
/// Problems are configuration structs closing over fixed geometry; they are immutable once built
/// and hand the optimizer a pure fitness function plus the box it lives in.
pub trait Problem<U = (), E = Infallible>: CostFunction<U, E> {
    /// The feasible box, one inclusive interval per coordinate of the position vector.
    fn bounds(&self) -> Bounds;
}
