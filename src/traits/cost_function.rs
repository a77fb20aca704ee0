use std::convert::Infallible;

use crate::{DVector, Float};

/// A trait which describes a fitness function $`f(\mathbb{R}^n) \to \mathbb{R}`$ to be minimized.
///
/// Such a function may also take a `user_data: &U` field which can be used to pass external
/// arguments to the function during optimization.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
///
/// Implementations are expected to be deterministic and free of side effects: the same `x`
/// always yields the same value. Optimizers treat any returned error, as well as any non-finite
/// value, as fatal to the run.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DVector<Float>, user_data: &U) -> Result<Float, E>;
}

impl<T, U, E> CostFunction<U, E> for &T
where
    T: CostFunction<U, E> + ?Sized,
{
    fn evaluate(&self, x: &DVector<Float>, user_data: &U) -> Result<Float, E> {
        (**self).evaluate(x, user_data)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crate::{traits::CostFunction, DVector, Float};

    struct Paraboloid;
    impl CostFunction for Paraboloid {
        fn evaluate(&self, x: &DVector<Float>, _: &()) -> Result<Float, Infallible> {
            Ok(x[0].powi(2) + x[1].powi(2) + 1.0)
        }
    }

    struct Shifted;
    impl CostFunction<Float> for Shifted {
        fn evaluate(&self, x: &DVector<Float>, offset: &Float) -> Result<Float, Infallible> {
            Ok(x.iter().map(|xi| (xi - offset).powi(2)).sum())
        }
    }

    #[test]
    fn test_cost_function() {
        let x: DVector<Float> = DVector::from_vec(vec![1.0, 2.0]);
        let y = Paraboloid.evaluate(&x, &()).unwrap();
        assert_eq!(y, 6.0);
    }

    #[test]
    fn test_cost_function_by_reference() {
        let x: DVector<Float> = DVector::from_vec(vec![1.0, 2.0]);
        let f: &dyn CostFunction = &Paraboloid;
        assert_eq!(f.evaluate(&x, &()).unwrap(), 6.0);
        assert_eq!((&Paraboloid).evaluate(&x, &()).unwrap(), 6.0);
    }

    #[test]
    fn test_cost_function_user_data() {
        let x: DVector<Float> = DVector::from_vec(vec![3.0, 3.0]);
        assert_eq!(Shifted.evaluate(&x, &1.0).unwrap(), 8.0);
    }
}
