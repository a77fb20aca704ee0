use crate::{
    core::{utils::generate_random_vector, Bounds, Point, PsoError},
    traits::CostFunction,
    DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// A particle with a position, velocity, and best known position
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmParticle {
    /// The current position of the particle; `fx` holds the value from the latest evaluation and
    /// is cleared whenever the particle moves
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position the particle has visited (as measured by the minimum value of `fx`)
    pub best: Point,
}

impl SwarmParticle {
    /// Create an unevaluated particle at rest at `position`. Its best position starts at the
    /// same place with a value of `+inf`.
    pub fn new(position: DVector<Float>) -> Self {
        let dimension = position.len();
        Self {
            position: position.clone().into(),
            velocity: DVector::zeros(dimension),
            best: position.into(),
        }
    }
    /// The fitness at the current position, `+inf` if the particle has moved since its last
    /// evaluation.
    pub fn current_value(&self) -> Float {
        self.position.value()
    }
    /// The lowest fitness this particle has seen.
    pub fn best_value(&self) -> Float {
        self.best.value()
    }
    /// Evaluate the cost function at the particle's position and update its personal best.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::FitnessEvaluation`] if `func` fails and
    /// [`PsoError::NonFiniteFitness`] if it returns NaN or an infinite value.
    pub fn evaluate<F, U, E>(
        &mut self,
        func: &F,
        user_data: &U,
        iteration: usize,
        index: usize,
    ) -> Result<(), PsoError>
    where
        F: CostFunction<U, E> + ?Sized,
        E: std::error::Error + Send + Sync + 'static,
    {
        let fx = func
            .evaluate(&self.position.x, user_data)
            .map_err(|err| PsoError::FitnessEvaluation {
                iteration,
                particle: index,
                source: Box::new(err),
            })?;
        if !fx.is_finite() {
            return Err(PsoError::NonFiniteFitness {
                iteration,
                particle: index,
                value: fx,
            });
        }
        self.position.fx = Some(fx);
        if self.position.improves_on(&self.best) {
            self.best = self.position.clone();
        }
        Ok(())
    }
    /// Apply one velocity/position update toward the personal best and `social_target`.
    ///
    /// Each velocity component is clipped to `[-v_max, v_max]` and the new position is
    /// hard-clipped into `bounds`.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        social_target: &DVector<Float>,
        omega: Float,
        c1: Float,
        c2: Float,
        v_max: &DVector<Float>,
        bounds: &Bounds,
        rng: &mut Rng,
    ) {
        let dim = self.position.dimension();
        let rv1 = generate_random_vector(dim, 0.0, 1.0, rng);
        let rv2 = generate_random_vector(dim, 0.0, 1.0, rng);
        let cognitive = rv1
            .component_mul(&(&self.best.x - &self.position.x))
            .scale(c1);
        let social = rv2
            .component_mul(&(social_target - &self.position.x))
            .scale(c2);
        let mut velocity = self.velocity.scale(omega) + cognitive + social;
        velocity
            .iter_mut()
            .zip(v_max.iter())
            .for_each(|(v, limit)| *v = v.clamp(-limit, *limit));
        let mut new_position = &self.position.x + &velocity;
        bounds.clamp(&mut new_position);
        self.velocity = velocity;
        self.position.set_position(new_position);
    }
}

/// A swarm of particles together with the best point any of them has found.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Swarm {
    /// The particles, in a fixed order (the ring topology depends on it)
    pub particles: Vec<SwarmParticle>,
    /// The global best position and value found by all particles
    pub gbest: Point,
}

impl Swarm {
    /// Scatter `n_particles` particles uniformly at random inside `bounds`.
    pub fn new(bounds: &Bounds, n_particles: usize, rng: &mut Rng) -> Self {
        Self::from_positions(
            (0..n_particles)
                .map(|_| bounds.random_vector_in(rng))
                .collect(),
        )
    }
    /// Build a swarm of unevaluated particles at rest at the given positions.
    pub fn from_positions(positions: Vec<DVector<Float>>) -> Self {
        let dimension = positions.first().map_or(0, |x| x.len());
        Self {
            particles: positions.into_iter().map(SwarmParticle::new).collect(),
            gbest: DVector::zeros(dimension).into(),
        }
    }
    /// The number of particles in the swarm.
    pub fn len(&self) -> usize {
        self.particles.len()
    }
    /// Returns `true` if the swarm has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
    /// A deep copy of every particle's current position.
    pub fn positions(&self) -> Vec<DVector<Float>> {
        self.particles.iter().map(|p| p.position.x.clone()).collect()
    }
    /// Evaluate every particle, updating personal bests and the global best.
    ///
    /// # Errors
    ///
    /// Stops at the first particle whose evaluation fails. See [`SwarmParticle::evaluate`].
    pub fn evaluate<F, U, E>(
        &mut self,
        func: &F,
        user_data: &U,
        iteration: usize,
    ) -> Result<(), PsoError>
    where
        F: CostFunction<U, E> + ?Sized,
        E: std::error::Error + Send + Sync + 'static,
    {
        for (index, particle) in self.particles.iter_mut().enumerate() {
            particle.evaluate(func, user_data, iteration, index)?;
            if particle.position.improves_on(&self.gbest) {
                self.gbest = particle.position.clone();
            }
        }
        Ok(())
    }
    /// Among `indices`, the particle with the strictly lowest personal best value. Particles
    /// which have never been evaluated are never chosen.
    pub fn index_of_best_among<I: IntoIterator<Item = usize>>(&self, indices: I) -> Option<usize> {
        let mut best_value = Float::INFINITY;
        let mut best_index = None;
        for index in indices {
            let value = self.particles[index].best_value();
            if value < best_value {
                best_value = value;
                best_index = Some(index);
            }
        }
        best_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bound;
    use nalgebra::dvector;
    use std::convert::Infallible;

    struct SumOfSquares;
    impl CostFunction for SumOfSquares {
        fn evaluate(&self, x: &DVector<Float>, _: &()) -> Result<Float, Infallible> {
            Ok(x.norm_squared())
        }
    }

    fn unit_box(dim: usize) -> Bounds {
        vec![Bound::new(-1.0, 1.0); dim].into()
    }

    #[test]
    fn test_new_particle_is_at_rest_and_unevaluated() {
        let p = SwarmParticle::new(dvector![0.5, -0.5]);
        assert_eq!(p.velocity, dvector![0.0, 0.0]);
        assert_eq!(p.best.x, p.position.x);
        assert_eq!(p.best_value(), Float::INFINITY);
        assert_eq!(p.current_value(), Float::INFINITY);
    }

    #[test]
    fn test_evaluate_tracks_personal_best() {
        let mut p = SwarmParticle::new(dvector![0.5, 0.5]);
        p.evaluate(&SumOfSquares, &(), 0, 0).unwrap();
        assert_eq!(p.current_value(), 0.5);
        assert_eq!(p.best_value(), 0.5);

        p.position.set_position(dvector![1.0, 1.0]);
        p.evaluate(&SumOfSquares, &(), 1, 0).unwrap();
        assert_eq!(p.current_value(), 2.0);
        assert_eq!(p.best_value(), 0.5);
        assert_eq!(p.best.x, dvector![0.5, 0.5]);
    }

    #[test]
    fn test_update_respects_velocity_and_bounds() {
        let bounds = unit_box(2);
        let v_max = bounds.velocity_limits(0.2);
        let mut rng = Rng::with_seed(1);
        let mut p = SwarmParticle::new(dvector![0.95, -0.95]);
        p.evaluate(&SumOfSquares, &(), 0, 0).unwrap();
        for _ in 0..50 {
            p.update(&dvector![-1.0, 1.0], 0.9, 2.0, 2.0, &v_max, &bounds, &mut rng);
            assert!(bounds.contains(&p.position.x));
            assert!(p.velocity.iter().zip(v_max.iter()).all(|(v, l)| v.abs() <= *l));
            assert!(p.position.fx.is_none());
        }
    }

    #[test]
    fn test_update_at_rest_on_target_stays_put() {
        let bounds = unit_box(2);
        let v_max = bounds.velocity_limits(0.2);
        let mut rng = Rng::with_seed(2);
        let mut p = SwarmParticle::new(dvector![0.25, 0.25]);
        p.update(&dvector![0.25, 0.25], 0.9, 1.49, 1.49, &v_max, &bounds, &mut rng);
        assert_eq!(p.position.x, dvector![0.25, 0.25]);
        assert_eq!(p.velocity, dvector![0.0, 0.0]);
    }

    #[test]
    fn test_swarm_evaluate_sets_global_best() {
        let mut swarm = Swarm::from_positions(vec![
            dvector![0.9, 0.0],
            dvector![0.1, 0.0],
            dvector![-0.5, 0.0],
        ]);
        assert_eq!(swarm.gbest.x, dvector![0.0, 0.0]);
        assert_eq!(swarm.gbest.value(), Float::INFINITY);
        swarm.evaluate(&SumOfSquares, &(), 0).unwrap();
        assert_eq!(swarm.gbest.x, dvector![0.1, 0.0]);
        assert_eq!(swarm.gbest.fx, Some(0.1 * 0.1));
    }

    #[test]
    fn test_random_swarm_inside_bounds() {
        let bounds: Bounds = vec![(0.0, 100.0), (10.0, 20.0)].into_iter().collect();
        let mut rng = Rng::with_seed(3);
        let swarm = Swarm::new(&bounds, 25, &mut rng);
        assert_eq!(swarm.len(), 25);
        assert!(swarm.positions().iter().all(|x| bounds.contains(x)));
    }

    #[test]
    fn test_index_of_best_among_skips_unevaluated() {
        let mut swarm = Swarm::from_positions(vec![
            dvector![0.9],
            dvector![0.1],
            dvector![0.5],
        ]);
        assert_eq!(swarm.index_of_best_among(0..3), None);
        swarm.particles[2].evaluate(&SumOfSquares, &(), 0, 2).unwrap();
        assert_eq!(swarm.index_of_best_among(0..3), Some(2));
        swarm.evaluate(&SumOfSquares, &(), 0).unwrap();
        assert_eq!(swarm.index_of_best_among([0, 2]), Some(2));
        assert_eq!(swarm.index_of_best_among(0..3), Some(1));
    }
}
