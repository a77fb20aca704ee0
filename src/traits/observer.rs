/// A trait which holds an [`observe`](`Observer::observe`) function that is handed the
/// [`Status`](crate::traits::Status) of an [`Algorithm`](`crate::traits::Algorithm`) after every
/// step.
///
/// Observers are read-only: they cannot alter the run or stop it early.
pub trait Observer<S, U> {
    /// A function that is called after every step of an
    /// [`Algorithm`](`crate::traits::Algorithm`).
    fn observe(&mut self, current_step: usize, status: &S, user_data: &U);
}
