use fastrand::Rng;
use parking_lot::Once;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{Swarm, SwarmStatus, SwarmTopology},
    core::{utils::maybe_warn_once, Bounds, Callbacks, PsoError, SwarmSummary},
    traits::{Algorithm, CostFunction},
    DVector, Float,
};

static OMEGA_OVERRIDE_WARNING: Once = Once::new();

/// The configuration of a [`PSO`] run.
///
/// Every field has a default except the search-space bounds, so a configuration is usually built
/// with [`PSOConfig::new`] followed by any `with_*` methods. Nothing is checked until the
/// configuration is handed to [`PSO::new`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PSOConfig {
    bounds: Bounds,
    n_particles: usize,
    max_iter: usize,
    omega: Float,
    c1: Float,
    c2: Float,
    topology: SwarmTopology,
    v_max_fraction: Float,
    w_start: Float,
    w_end: Float,
    parameter_names: Option<Vec<String>>,
}

impl PSOConfig {
    /// The default inertial weight $`\omega`$.
    pub const DEFAULT_OMEGA: Float = 0.729;
    /// The default cognitive and social weights $`c_1 = c_2`$.
    pub const DEFAULT_ACCELERATION: Float = 1.49;

    /// Create a configuration for the search space given by `bounds`.
    pub fn new<B: Into<Bounds>>(bounds: B) -> Self {
        Self {
            bounds: bounds.into(),
            n_particles: 30,
            max_iter: 100,
            omega: Self::DEFAULT_OMEGA,
            c1: Self::DEFAULT_ACCELERATION,
            c2: Self::DEFAULT_ACCELERATION,
            topology: SwarmTopology::Global,
            v_max_fraction: 0.2,
            w_start: 0.9,
            w_end: 0.4,
            parameter_names: None,
        }
    }
    /// Sets the number of particles in the swarm (default = `30`).
    pub fn with_n_particles(mut self, value: usize) -> Self {
        self.n_particles = value;
        self
    }
    /// Sets the number of iterations (default = `100`). Runs never stop early on convergence.
    pub fn with_max_iter(mut self, value: usize) -> Self {
        self.max_iter = value;
        self
    }
    /// Sets the inertial weight $`\omega`$ (default = `0.729`).
    ///
    /// The inertia used by the velocity update is always taken from the annealing schedule (see
    /// [`PSOConfig::with_inertia_schedule`]), so this value is only reported before the first
    /// iteration.
    pub fn with_omega(mut self, value: Float) -> Self {
        self.omega = value;
        self
    }
    /// Sets the cognitive weight $`c_1`$ which controls the particle's tendency
    /// to move towards its personal best (default = `1.49`).
    pub fn with_c1(mut self, value: Float) -> Self {
        self.c1 = value;
        self
    }
    /// Sets the social weight $`c_2`$ which controls the particle's tendency to move towards the
    /// global (or neighborhood) best depending on the swarm [`SwarmTopology`] (default = `1.49`).
    pub fn with_c2(mut self, value: Float) -> Self {
        self.c2 = value;
        self
    }
    /// Sets the [`SwarmTopology`] (default = [`SwarmTopology::Global`]).
    pub fn with_topology(mut self, value: SwarmTopology) -> Self {
        self.topology = value;
        self
    }
    /// Sets the velocity limit as a fraction of each dimension's width (default = `0.2`).
    pub fn with_v_max_fraction(mut self, value: Float) -> Self {
        self.v_max_fraction = value;
        self
    }
    /// Sets the start and end of the linear inertia schedule (default = `0.9` to `0.4`).
    pub fn with_inertia_schedule(mut self, w_start: Float, w_end: Float) -> Self {
        self.w_start = w_start;
        self.w_end = w_end;
        self
    }
    /// Sets the names of the parameters, reported in the [`SwarmSummary`].
    pub fn with_parameter_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
    /// The search-space bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    /// The number of particles.
    pub const fn n_particles(&self) -> usize {
        self.n_particles
    }
    /// The number of iterations.
    pub const fn max_iter(&self) -> usize {
        self.max_iter
    }
    /// The swarm topology.
    pub const fn topology(&self) -> SwarmTopology {
        self.topology
    }
    /// The inertia weight used during iteration `iteration`:
    ///
    /// ```math
    /// \omega_t = \omega_\text{start} - (\omega_\text{start} - \omega_\text{end}) \frac{t}{T}
    /// ```
    pub fn inertia(&self, iteration: usize) -> Float {
        self.w_start
            - (self.w_start - self.w_end) * (iteration as Float / self.max_iter as Float)
    }
    /// Check every setting.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InvalidConfiguration`] describing the first invalid setting found.
    pub fn validate(&self) -> Result<(), PsoError> {
        self.bounds.validate()?;
        if self.n_particles == 0 {
            return Err(PsoError::InvalidConfiguration(
                "the swarm needs at least one particle".to_string(),
            ));
        }
        if self.max_iter == 0 {
            return Err(PsoError::InvalidConfiguration(
                "the iteration budget must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("omega", self.omega),
            ("c1", self.c1),
            ("c2", self.c2),
            ("w_start", self.w_start),
            ("w_end", self.w_end),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PsoError::InvalidConfiguration(format!(
                    "{} must be finite and non-negative (got {})",
                    name, value
                )));
            }
        }
        if !(self.v_max_fraction.is_finite() && self.v_max_fraction > 0.0) {
            return Err(PsoError::InvalidConfiguration(format!(
                "v_max_fraction must be positive (got {})",
                self.v_max_fraction
            )));
        }
        self.topology.validate(self.n_particles)?;
        if let Some(names) = &self.parameter_names {
            if names.len() != self.bounds.dimension() {
                return Err(PsoError::InvalidConfiguration(format!(
                    "{} parameter names given for a {}-dimensional search space",
                    names.len(),
                    self.bounds.dimension()
                )));
            }
        }
        Ok(())
    }
}

/// Particle Swarm Optimizer
///
/// The PSO algorithm involves an ensemble of particles which are aware of the position of all or
/// nearby particles in the swarm. Every iteration first evaluates all particles, then updates
/// each particle's velocity as follows:
///
/// ```math
/// v_i^{t+1} = \omega_t v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t_i - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are uniformly distributed random vectors in $`[0,1]`$, $`\omega_t`$
/// is the annealed inertial weight, $`c_1`$ and $`c_2`$ are cognitive and social weights
/// respectively, $`p_i^t`$ is the particle's personal best position, and $`g_i^t`$ is the social
/// attractor chosen by the [`SwarmTopology`]. Each velocity component is clipped to a fraction
/// of its dimension's width and the new position is clipped into the bounds. See [^1] for more
/// information.
///
/// [^1]: [Houssein, E. H., Gad, A. G., Hussain, K., & Suganthan, P. N. (2021). Major Advances in Particle Swarm Optimization: Theory, Analysis, and Application. In Swarm and Evolutionary Computation (Vol. 63, p. 100868). Elsevier BV.](https://doi.org/10.1016/j.swevo.2021.100868)
#[derive(Clone, Debug)]
pub struct PSO {
    config: PSOConfig,
    rng: Rng,
    v_max: DVector<Float>,
}

impl PSO {
    /// Construct a new particle swarm optimizer from a validated `config`. All randomness of the
    /// run is drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InvalidConfiguration`] if [`PSOConfig::validate`] fails.
    pub fn new(config: PSOConfig, rng: Rng) -> Result<Self, PsoError> {
        config.validate()?;
        if config.omega != PSOConfig::DEFAULT_OMEGA {
            maybe_warn_once(&OMEGA_OVERRIDE_WARNING, || {
                format!(
                    "omega = {} is overridden by the inertia schedule ({} to {}) from the first iteration",
                    config.omega, config.w_start, config.w_end
                )
            });
        }
        let v_max = config.bounds.velocity_limits(config.v_max_fraction);
        Ok(Self { config, rng, v_max })
    }
    /// The configuration of this optimizer.
    pub fn config(&self) -> &PSOConfig {
        &self.config
    }
    /// Run the full iteration budget on `problem` and return the summary.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] if any fitness evaluation fails or is not finite.
    pub fn optimize<P, E>(&mut self, problem: &P) -> Result<SwarmSummary, PsoError>
    where
        P: CostFunction<(), E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.optimize_with(problem, &Callbacks::empty())
    }
    /// Like [`PSO::optimize`], with observers and an abort signal attached.
    ///
    /// # Errors
    ///
    /// Returns a [`PsoError`] if any fitness evaluation fails or is not finite.
    pub fn optimize_with<P, E>(
        &mut self,
        problem: &P,
        callbacks: &Callbacks<SwarmStatus, ()>,
    ) -> Result<SwarmSummary, PsoError>
    where
        P: CostFunction<(), E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        <Self as Algorithm<P, SwarmStatus, (), E>>::process(self, problem, &(), callbacks)
    }
}

impl<P, U, E> Algorithm<P, SwarmStatus, U, E> for PSO
where
    P: CostFunction<U, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Summary = SwarmSummary;

    fn initialize(
        &mut self,
        _problem: &P,
        status: &mut SwarmStatus,
        _user_data: &U,
    ) -> Result<(), PsoError> {
        status.swarm = Swarm::new(&self.config.bounds, self.config.n_particles, &mut self.rng);
        status.omega = self.config.omega;
        status.history.reserve(self.config.max_iter);
        status.cost_history.reserve(self.config.max_iter);
        tracing::info!(
            dimension = self.config.bounds.dimension(),
            particles = self.config.n_particles,
            iterations = self.config.max_iter,
            topology = %self.config.topology,
            "starting particle swarm optimization"
        );
        Ok(())
    }

    fn step(
        &mut self,
        current_step: usize,
        problem: &P,
        status: &mut SwarmStatus,
        user_data: &U,
    ) -> Result<(), PsoError> {
        let omega = self.config.inertia(current_step);
        status.omega = omega;
        status.history.push(status.swarm.positions());

        status.swarm.evaluate(problem, user_data, current_step)?;
        status.n_f_evals += status.swarm.len();
        status.cost_history.push(status.swarm.gbest.value());

        // every attractor is resolved before any particle moves
        let targets: Vec<DVector<Float>> = (0..status.swarm.len())
            .map(|i| self.config.topology.social_target(&status.swarm, i).clone())
            .collect();
        for (particle, target) in status.swarm.particles.iter_mut().zip(&targets) {
            particle.update(
                target,
                omega,
                self.config.c1,
                self.config.c2,
                &self.v_max,
                &self.config.bounds,
                &mut self.rng,
            );
        }
        status.iteration = current_step + 1;
        tracing::debug!(
            iteration = current_step,
            omega,
            best = status.swarm.gbest.value(),
            "iteration complete"
        );
        Ok(())
    }

    fn max_steps(&self) -> usize {
        self.config.max_iter
    }

    fn summarize(
        &self,
        current_step: usize,
        _problem: &P,
        status: &SwarmStatus,
        _user_data: &U,
    ) -> Result<SwarmSummary, PsoError> {
        let (x, fx) = status.get_best().clone().destructure();
        tracing::info!(
            best = fx,
            iterations = current_step,
            evaluations = status.n_f_evals,
            "particle swarm optimization finished"
        );
        Ok(SwarmSummary {
            x,
            fx,
            history: status.history.clone(),
            cost_history: status.cost_history.clone(),
            bounds: self.config.bounds.clone(),
            parameter_names: self.config.parameter_names.clone(),
            message: status.message.clone(),
            cost_evals: status.n_f_evals,
            iterations: current_step,
        })
    }
}
