/// A trait for abort signals.
///
/// Optimizers poll the signal between iterations, which is the only point at which a run can be
/// stopped; an iteration that has started always finishes.
pub trait AbortSignal: Send + Sync {
    /// Return `true` if the user has requested to abort the calculation.
    fn is_aborted(&self) -> bool;
    /// Abort the calculation. Make `is_aborted()` return `true`.
    fn abort(&self);
    /// Reset the abort signal. Make `is_aborted()` return `false`.
    fn reset(&self);
}
