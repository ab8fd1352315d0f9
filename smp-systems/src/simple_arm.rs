//! A planar multi-joint arm driven by joint-angle commands.
//!
//! The arm is kinematic: a motor command is scaled, clipped into the motor
//! limits, and then taken directly as the vector of joint angles. Its only
//! dynamic state is the last shaped command. The end-effector position is
//! computed with [`kinematics::joint_positions`] over segments whose lengths
//! shrink geometrically by `length_ratio` and sum to 1.

mod config;

use ndarray::{Array1, ArrayView1, array};
use rand::Rng;
use smp_core::{
    Loop, Observation, ShapeMismatch, System,
    config::{ConfigError, Overrides, Strictness, SystemConfig, resolve},
    noise::GaussianNoise,
};
use tracing::{debug, trace, warn};

use crate::{
    Error,
    bounds::Bounds,
    kinematics::{self, AngleUnit, JointPositions},
};

pub use config::SimpleArmConfig;

/// Computes `n_dofs` segment lengths, each `ratio` times shorter than the
/// previous one, normalized to sum to 1.
///
/// # Example
///
/// ```
/// use smp_systems::simple_arm::compute_lengths;
///
/// let lengths = compute_lengths(4, 1.0);
/// assert!(lengths.iter().all(|&l| (l - 0.25).abs() < 1e-12));
/// ```
#[must_use]
pub fn compute_lengths(n_dofs: usize, ratio: f64) -> Array1<f64> {
    let mut lengths = Array1::<f64>::ones(n_dofs);
    for i in 1..n_dofs {
        lengths[i] = lengths[i - 1] / ratio;
    }
    let total = lengths.sum();
    lengths / total
}

/// A planar arm with `dim_s_motor` joints.
///
/// Sensor channels returned by [`step`](System::step):
///
/// - `proprioceptive`: the shaped motor command (joint angles)
/// - `exteroceptive`: the noisy end-effector position `(x, y)`
/// - `all`: proprioceptive followed by exteroceptive
#[derive(Debug, Clone)]
pub struct SimpleArm {
    config: SimpleArmConfig,
    bounds: Bounds,
    noise: GaussianNoise,
    lengths: Array1<f64>,
    m: Array1<f64>,
    count: u64,
    extra: Overrides,
}

impl SimpleArm {
    /// Creates an arm from a configuration, at the zero posture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration fails validation.
    pub fn new(config: SimpleArmConfig) -> Result<Self, Error> {
        config.validate()?;

        let bounds = config.motor_bounds()?;
        let noise = GaussianNoise::new(config.sysnoise)
            .map_err(|err| ConfigError::invalid("sysnoise", err.to_string()))?;
        let lengths = compute_lengths(config.dim_s_motor, config.length_ratio);

        debug!(
            joints = config.dim_s_motor,
            length_ratio = config.length_ratio,
            factor = config.factor,
            sysnoise = config.sysnoise,
            unit = %config.unit,
            "constructed simple arm"
        );

        Ok(Self {
            m: Array1::zeros(config.dim_s_motor),
            config,
            bounds,
            noise,
            lengths,
            count: 0,
            extra: Overrides::new(),
        })
    }

    /// Creates an arm by resolving `overrides` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Kinematics`] if `unit` names an unsupported angle
    /// unit, or [`Error::Config`] if resolution or validation fails.
    pub fn from_overrides(overrides: &Overrides, strictness: Strictness) -> Result<Self, Error> {
        if let Some(name) = overrides.get("unit").and_then(|unit| unit.as_str()) {
            name.parse::<AngleUnit>()?;
        }

        let resolved = resolve::<SimpleArmConfig>(overrides, strictness)?;
        if !resolved.extra.is_empty() {
            warn!(
                keys = ?resolved.extra.keys().collect::<Vec<_>>(),
                "simple arm ignores unrecognized configuration keys"
            );
        }

        let mut arm = Self::new(resolved.config)?;
        arm.extra = resolved.extra;
        Ok(arm)
    }

    #[must_use]
    pub fn config(&self) -> &SimpleArmConfig {
        &self.config
    }

    /// Returns configuration entries that matched no known field.
    #[must_use]
    pub fn extra(&self) -> &Overrides {
        &self.extra
    }

    /// Returns the segment lengths, fixed at construction.
    #[must_use]
    pub fn lengths(&self) -> ArrayView1<'_, f64> {
        self.lengths.view()
    }

    /// Returns the last shaped motor command.
    #[must_use]
    pub fn motor_command(&self) -> ArrayView1<'_, f64> {
        self.m.view()
    }

    /// Returns the number of steps taken since construction.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.count
    }

    /// Scales a raw command by `factor` and clips it into the motor limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `m` does not have `dim_s_motor` elements,
    /// or [`Error::NonFinite`] if any element is NaN or infinite.
    pub fn compute_motor_command(&self, m: &Array1<f64>) -> Result<Array1<f64>, Error> {
        ShapeMismatch::check("motor command", self.config.dim_s_motor, m.len())?;
        Error::check_finite("motor command", m)?;
        Ok(self.bounds.clip(&(m * self.config.factor)))
    }

    /// Returns the noiseless joint positions of the current posture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Kinematics`] if the chain cannot be evaluated.
    pub fn joint_positions(&self) -> Result<JointPositions, Error> {
        Ok(kinematics::joint_positions(
            &self.m,
            &self.lengths,
            self.config.unit,
        )?)
    }
}

impl System for SimpleArm {
    type Error = Error;

    fn control_loop(&self) -> Loop {
        Loop::Closed
    }

    fn input_dim(&self) -> usize {
        self.config.dim_s_motor
    }

    /// Moves the arm to the posture given by `input`.
    ///
    /// The input is the absolute target command, not an increment over the
    /// previous one.
    fn step<R: Rng + ?Sized>(
        &mut self,
        input: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Observation, Self::Error> {
        let m = self.compute_motor_command(input)?;

        let (x, y) = kinematics::joint_positions(&m, &self.lengths, self.config.unit)?
            .end_effector();
        let mut hand = array![x, y];
        self.noise.corrupt(&mut hand, rng);

        self.m = m;
        self.count += 1;
        trace!(step = self.count, x, y, "moved simple arm");

        Ok(Observation::concatenated(self.m.clone(), hand))
    }

    fn reset(&mut self) {
        self.m = Array1::zeros(self.config.dim_s_motor);
        debug!(step = self.count, "reset simple arm");
    }
}
