/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal)
pub mod abort_signal;
/// [`Bound`] type for binding variables to a range.
pub mod bound;
/// [`Callbacks`] type and the [`DebugObserver`].
pub mod callbacks;
/// [`PsoError`] type returned by construction and optimization.
pub mod error;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`SwarmSummary`] type for the result of an optimization run.
pub mod summary;
/// Random sampling helpers and the user-facing warning switch.
pub mod utils;

pub use abort_signal::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use bound::{Bound, Bounds};
pub use callbacks::{Callbacks, DebugObserver};
pub use error::PsoError;
pub use point::Point;
pub use summary::SwarmSummary;
