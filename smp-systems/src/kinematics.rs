//! Forward kinematics of a planar open chain.
//!
//! Each joint angle is relative to the orientation of the previous link, so a
//! link's absolute heading is the running sum of the joint angles up to it.
//! The base joint is fixed at the origin.
//!
//! These are pure functions with no shared state and can be called freely
//! from any context, independently of any system.

use std::{f64::consts::PI, fmt, str::FromStr};

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when evaluating the kinematic chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KinematicsError {
    #[error("angles and lengths must be the same size, got {angles} angles and {lengths} lengths")]
    DimensionMismatch { angles: usize, lengths: usize },

    #[error("unsupported angle unit `{0}`")]
    UnsupportedUnit(String),
}

/// The convention joint angles are expressed in.
///
/// Serialized by its short name. Deserialization accepts the same names as
/// [`FromStr`], so an unknown name fails with
/// [`KinematicsError::UnsupportedUnit`] either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AngleUnit {
    /// Angles are used as given.
    #[default]
    Radians,

    /// Angles are multiples of π, so `1.0` is half a turn.
    HalfTurns,
}

impl AngleUnit {
    /// Returns the factor converting this unit to radians.
    #[must_use]
    pub fn radians_per_unit(self) -> f64 {
        match self {
            AngleUnit::Radians => 1.0,
            AngleUnit::HalfTurns => PI,
        }
    }

    /// Returns the unit's short name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AngleUnit::Radians => "rad",
            AngleUnit::HalfTurns => "std",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AngleUnit {
    type Err = KinematicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rad" | "radians" => Ok(AngleUnit::Radians),
            "std" | "half_turns" => Ok(AngleUnit::HalfTurns),
            other => Err(KinematicsError::UnsupportedUnit(other.to_owned())),
        }
    }
}

impl TryFrom<String> for AngleUnit {
    type Error = KinematicsError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<AngleUnit> for &'static str {
    fn from(unit: AngleUnit) -> Self {
        unit.name()
    }
}

/// Cartesian positions of every moving joint of a chain.
///
/// Element `i` is the position of the far end of link `i`; the fixed base at
/// the origin is not included.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPositions {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
}

impl JointPositions {
    /// Returns the position of the last joint, or the origin for an empty
    /// chain.
    #[must_use]
    pub fn end_effector(&self) -> (f64, f64) {
        match (self.xs.last(), self.ys.last()) {
            (Some(&x), Some(&y)) => (x, y),
            _ => (0.0, 0.0),
        }
    }
}

/// Computes the position of each joint of a planar chain.
///
/// # Errors
///
/// Returns [`KinematicsError::DimensionMismatch`] if `angles` and `lengths`
/// have different lengths.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use smp_systems::kinematics::{AngleUnit, joint_positions};
///
/// let joints = joint_positions(&[0.0, 0.0], &[1.0, 1.0], AngleUnit::Radians).unwrap();
/// assert_eq!(joints.xs, array![1.0, 2.0]);
/// assert_eq!(joints.ys, array![0.0, 0.0]);
/// ```
pub fn joint_positions<'a, 'b>(
    angles: impl Into<ArrayView1<'a, f64>>,
    lengths: impl Into<ArrayView1<'b, f64>>,
    unit: AngleUnit,
) -> Result<JointPositions, KinematicsError> {
    let angles = angles.into();
    let lengths = lengths.into();

    if angles.len() != lengths.len() {
        return Err(KinematicsError::DimensionMismatch {
            angles: angles.len(),
            lengths: lengths.len(),
        });
    }

    let scale = unit.radians_per_unit();
    let mut xs = Array1::zeros(angles.len());
    let mut ys = Array1::zeros(angles.len());
    let (mut heading, mut x, mut y) = (0.0_f64, 0.0, 0.0);

    for (i, (&angle, &length)) in angles.iter().zip(&lengths).enumerate() {
        heading += angle * scale;
        x += heading.cos() * length;
        y += heading.sin() * length;
        xs[i] = x;
        ys[i] = y;
    }

    Ok(JointPositions { xs, ys })
}

/// Computes the end-effector position of a planar chain with angles in
/// radians.
///
/// # Errors
///
/// Returns [`KinematicsError::DimensionMismatch`] if `angles` and `lengths`
/// have different lengths.
pub fn forward<'a, 'b>(
    angles: impl Into<ArrayView1<'a, f64>>,
    lengths: impl Into<ArrayView1<'b, f64>>,
) -> Result<(f64, f64), KinematicsError> {
    joint_positions(angles, lengths, AngleUnit::Radians).map(|joints| joints.end_effector())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn straight_chain_lies_on_x_axis() {
        let joints = joint_positions(&[0.0, 0.0], &[1.0, 1.0], AngleUnit::Radians).unwrap();

        assert_eq!(joints.xs, array![1.0, 2.0]);
        assert_eq!(joints.ys, array![0.0, 0.0]);
        assert_eq!(joints.end_effector(), (2.0, 0.0));
    }

    #[test]
    fn quarter_turn_points_up() {
        let (x, y) = forward(&[FRAC_PI_2], &[1.0]).unwrap();

        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn joint_angles_accumulate() {
        // Two quarter turns fold the second link back along -x.
        let joints = joint_positions(&[FRAC_PI_2, FRAC_PI_2], &[1.0, 0.5], AngleUnit::Radians)
            .unwrap();

        assert_abs_diff_eq!(joints.xs[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(joints.ys[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(joints.xs[1], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(joints.ys[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn half_turn_unit_scales_by_pi() {
        let in_radians =
            joint_positions(&[FRAC_PI_2, -FRAC_PI_2 / 2.0], &[0.6, 0.4], AngleUnit::Radians)
                .unwrap();
        let in_half_turns =
            joint_positions(&[0.5, -0.25], &[0.6, 0.4], AngleUnit::HalfTurns).unwrap();

        for i in 0..2 {
            assert_abs_diff_eq!(in_radians.xs[i], in_half_turns.xs[i], epsilon = 1e-12);
            assert_abs_diff_eq!(in_radians.ys[i], in_half_turns.ys[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn mismatched_sizes_fail_for_every_pair() {
        for n_angles in 0..6 {
            for n_lengths in (0..6).filter(|&n| n != n_angles) {
                let angles = vec![0.1; n_angles];
                let lengths = vec![1.0; n_lengths];

                let err = joint_positions(angles.as_slice(), lengths.as_slice(), AngleUnit::Radians)
                    .unwrap_err();
                assert_eq!(
                    err,
                    KinematicsError::DimensionMismatch {
                        angles: n_angles,
                        lengths: n_lengths,
                    }
                );
                assert!(forward(angles.as_slice(), lengths.as_slice()).is_err());
            }
        }
    }

    #[test]
    fn empty_chain_ends_at_origin() {
        let empty: [f64; 0] = [];
        assert_eq!(forward(&empty, &empty).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn parses_unit_names() {
        assert_eq!("rad".parse::<AngleUnit>().unwrap(), AngleUnit::Radians);
        assert_eq!("std".parse::<AngleUnit>().unwrap(), AngleUnit::HalfTurns);
        assert_eq!(
            "deg".parse::<AngleUnit>().unwrap_err(),
            KinematicsError::UnsupportedUnit("deg".to_owned())
        );
    }

    #[test]
    fn serde_uses_the_same_names_as_parsing() {
        for name in ["rad", "radians", "std", "half_turns"] {
            let parsed: AngleUnit = name.parse().unwrap();
            let deserialized: AngleUnit = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(deserialized, parsed);
        }

        assert_eq!(
            serde_json::to_value(AngleUnit::HalfTurns).unwrap(),
            serde_json::json!("std")
        );

        let err = serde_json::from_value::<AngleUnit>(serde_json::json!("deg")).unwrap_err();
        assert_eq!(
            err.to_string(),
            KinematicsError::UnsupportedUnit("deg".to_owned()).to_string()
        );
    }

    #[test]
    fn accepts_array_views() {
        let angles = array![0.0, FRAC_PI_2];
        let lengths = array![0.5, 0.5];

        let (x, y) = forward(&angles, &lengths).unwrap();

        assert_abs_diff_eq!(x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.5, epsilon = 1e-12);
    }
}
