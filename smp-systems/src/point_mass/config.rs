use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smp_core::config::{
    ConfigError, SystemConfig, ensure_non_negative, ensure_positive,
};

use crate::bounds::{Bounds, Limit};

/// Half-width of the interval random initial states are drawn from.
pub const INITIAL_STATE_SPREAD: f64 = 0.3;

/// Configuration of a [`PointMass`](super::PointMass).
///
/// The state of a point mass with `sysdim` spatial dimensions has
/// `3 * sysdim` elements: position, velocity, and acceleration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointMassConfig {
    /// Number of spatial dimensions, usually 1, 2, or 3.
    pub sysdim: usize,

    /// Length of the state vector.
    ///
    /// Derived from `sysdim` when unset; if set it must equal `3 * sysdim`.
    pub statedim: Option<usize>,

    /// Integration time step.
    pub dt: f64,

    pub mass: f64,

    /// Lower force limit used by [`bound_motor`](super::PointMass::bound_motor).
    pub force_min: Limit,

    /// Upper force limit used by [`bound_motor`](super::PointMass::bound_motor).
    pub force_max: Limit,

    /// Fraction of the velocity lost to friction each step, in `[0, 1]`.
    pub friction: f64,

    /// Standard deviation of the Gaussian noise added to the whole state
    /// after every step.
    pub sysnoise: f64,

    /// Initial state, or the zero vector when unset.
    pub x0: Option<Vec<f64>>,

    /// Clips every force command into `[force_min, force_max]` before it is
    /// applied. Off by default: commands are applied unbounded.
    pub clamp_force: bool,
}

impl Default for PointMassConfig {
    fn default() -> Self {
        Self {
            sysdim: 1,
            statedim: None,
            dt: 0.1,
            mass: 1.0,
            force_min: Limit::Scalar(-1.0),
            force_max: Limit::Scalar(1.0),
            friction: 0.001,
            sysnoise: 0.01,
            x0: None,
            clamp_force: false,
        }
    }
}

impl PointMassConfig {
    /// Returns the length of the state vector.
    #[must_use]
    pub fn state_dim(&self) -> usize {
        self.statedim.unwrap_or(self.sysdim * 3)
    }

    /// Returns the initial state as a vector.
    ///
    /// Assumes a validated configuration.
    #[must_use]
    pub fn initial_state(&self) -> Array1<f64> {
        match &self.x0 {
            Some(x0) => Array1::from_vec(x0.clone()),
            None => Array1::zeros(self.state_dim()),
        }
    }

    /// Returns the force bounds expanded to one pair per dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the limits are malformed.
    pub fn force_bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::from_limits(
            ("force_min", &self.force_min),
            ("force_max", &self.force_max),
            self.sysdim,
        )
    }

    /// Sets a random initial state, drawn uniformly per element from
    /// `[-INITIAL_STATE_SPREAD, INITIAL_STATE_SPREAD]`.
    #[must_use]
    pub fn with_random_initial_state<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        let x0 = (0..self.state_dim())
            .map(|_| rng.gen_range(-INITIAL_STATE_SPREAD..=INITIAL_STATE_SPREAD))
            .collect();
        self.x0 = Some(x0);
        self
    }
}

impl SystemConfig for PointMassConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sysdim == 0 {
            return Err(ConfigError::invalid("sysdim", "must be at least 1"));
        }
        if let Some(statedim) = self.statedim {
            if statedim != self.sysdim * 3 {
                return Err(ConfigError::invalid(
                    "statedim",
                    format!("must be 3 * sysdim = {}, got {statedim}", self.sysdim * 3),
                ));
            }
        }

        ensure_positive("dt", self.dt)?;
        ensure_positive("mass", self.mass)?;
        ensure_non_negative("sysnoise", self.sysnoise)?;
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::invalid(
                "friction",
                format!("must be within [0, 1], got {}", self.friction),
            ));
        }

        if let Some(x0) = &self.x0 {
            if x0.len() != self.state_dim() {
                return Err(ConfigError::invalid(
                    "x0",
                    format!("expected {} values, got {}", self.state_dim(), x0.len()),
                ));
            }
            if x0.iter().any(|v| !v.is_finite()) {
                return Err(ConfigError::invalid("x0", "must be finite"));
            }
        }

        self.force_bounds().map(|_| ())
    }
}
