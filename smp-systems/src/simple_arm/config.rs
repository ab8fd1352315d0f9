use serde::{Deserialize, Serialize};
use smp_core::config::{
    ConfigError, SystemConfig, ensure_finite, ensure_non_negative, ensure_positive,
};

use super::compute_lengths;
use crate::{
    bounds::{Bounds, Limit},
    kinematics::AngleUnit,
};

/// Configuration of a [`SimpleArm`](super::SimpleArm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleArmConfig {
    /// Number of joints, which is also the length of the motor command.
    pub dim_s_motor: usize,

    /// Length of the exteroceptive channel. The arm is planar, so this is
    /// always 2.
    pub dim_s_extero: usize,

    /// Ratio between the lengths of consecutive segments.
    pub length_ratio: f64,

    /// Lower motor limit, per joint or shared.
    pub m_mins: Limit,

    /// Upper motor limit, per joint or shared.
    pub m_maxs: Limit,

    /// Gain applied to motor commands before clipping.
    pub factor: f64,

    /// Standard deviation of the Gaussian noise added to the end-effector
    /// position.
    pub sysnoise: f64,

    /// Convention the motor command's joint angles are expressed in.
    pub unit: AngleUnit,
}

impl Default for SimpleArmConfig {
    fn default() -> Self {
        Self {
            dim_s_motor: 3,
            dim_s_extero: 2,
            length_ratio: 1.0,
            m_mins: Limit::Scalar(-1.0),
            m_maxs: Limit::Scalar(1.0),
            factor: 1.0,
            sysnoise: 0.01,
            unit: AngleUnit::Radians,
        }
    }
}

impl SimpleArmConfig {
    /// Returns the motor bounds expanded to one pair per joint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the limits are malformed.
    pub fn motor_bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::from_limits(
            ("m_mins", &self.m_mins),
            ("m_maxs", &self.m_maxs),
            self.dim_s_motor,
        )
    }
}

impl SystemConfig for SimpleArmConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.dim_s_motor == 0 {
            return Err(ConfigError::invalid("dim_s_motor", "must be at least 1"));
        }
        if self.dim_s_extero != 2 {
            return Err(ConfigError::invalid(
                "dim_s_extero",
                format!("a planar arm has 2 exteroceptive values, got {}", self.dim_s_extero),
            ));
        }

        ensure_positive("length_ratio", self.length_ratio)?;
        let lengths = compute_lengths(self.dim_s_motor, self.length_ratio);
        if !lengths.iter().all(|l| l.is_finite() && *l >= 0.0) {
            return Err(ConfigError::invalid(
                "length_ratio",
                format!(
                    "segment lengths for {} joints cannot be normalized with ratio {}",
                    self.dim_s_motor, self.length_ratio
                ),
            ));
        }
        ensure_finite("factor", self.factor)?;
        ensure_non_negative("sysnoise", self.sysnoise)?;

        self.motor_bounds().map(|_| ())
    }
}
