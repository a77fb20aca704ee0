/// A trait which holds the mutable state of an [`Algorithm`](crate::traits::Algorithm) during a
/// run.
pub trait Status: Clone + Default {
    /// Resets the status to its default state. This is called at the beginning of every run.
    fn reset(&mut self);
    /// Returns the message of the run.
    fn message(&self) -> &str;
    /// Sets the message of the run.
    fn update_message(&mut self, message: &str);
}
