//! Elementwise saturation limits for motor and force commands.

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use smp_core::config::ConfigError;

/// A limit given once for every element, or separately per element.
///
/// Deserializes from either a number or a list of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    Scalar(f64),
    PerElement(Vec<f64>),
}

impl Limit {
    /// Expands the limit to one value per element.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for `key` if a per-element limit
    /// does not have `len` values, or if any value is NaN.
    pub fn broadcast(&self, key: &'static str, len: usize) -> Result<Array1<f64>, ConfigError> {
        let values = match self {
            Limit::Scalar(value) => Array1::from_elem(len, *value),
            Limit::PerElement(values) if values.len() == len => Array1::from_vec(values.clone()),
            Limit::PerElement(values) => {
                return Err(ConfigError::invalid(
                    key,
                    format!("expected {len} values, got {}", values.len()),
                ));
            }
        };

        if values.iter().any(|v| v.is_nan()) {
            return Err(ConfigError::invalid(key, "must not contain NaN"));
        }
        Ok(values)
    }
}

impl From<f64> for Limit {
    fn from(value: f64) -> Self {
        Limit::Scalar(value)
    }
}

impl From<Vec<f64>> for Limit {
    fn from(values: Vec<f64>) -> Self {
        Limit::PerElement(values)
    }
}

/// Inclusive elementwise bounds `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    /// Builds `len`-element bounds from a lower and an upper [`Limit`].
    ///
    /// Each limit is paired with its configuration key for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if either limit has the wrong
    /// length or contains NaN, or if any lower bound exceeds its upper bound.
    pub fn from_limits(
        (lower_key, lower): (&'static str, &Limit),
        (upper_key, upper): (&'static str, &Limit),
        len: usize,
    ) -> Result<Self, ConfigError> {
        let lower = lower.broadcast(lower_key, len)?;
        let upper = upper.broadcast(upper_key, len)?;

        if let Some((lo, hi)) = lower.iter().zip(&upper).find(|(lo, hi)| lo > hi) {
            return Err(ConfigError::invalid(
                lower_key,
                format!("lower bound {lo} exceeds `{upper_key}` bound {hi}"),
            ));
        }

        Ok(Self { lower, upper })
    }

    /// Returns the lower bounds.
    #[must_use]
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Returns the upper bounds.
    #[must_use]
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Returns the number of bounded elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Returns `true` if the bounds cover no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Clips each element of `values` into its bounds.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have [`len`](Bounds::len) elements.
    #[must_use]
    pub fn clip(&self, values: &Array1<f64>) -> Array1<f64> {
        Zip::from(values)
            .and(&self.lower)
            .and(&self.upper)
            .map_collect(|&v, &lo, &hi| v.clamp(lo, hi))
    }

    /// Returns `true` if every element of `values` lies within its bounds.
    #[must_use]
    pub fn contains(&self, values: &Array1<f64>) -> bool {
        values.len() == self.len()
            && Zip::from(values)
                .and(&self.lower)
                .and(&self.upper)
                .all(|&v, &lo, &hi| lo <= v && v <= hi)
    }
}
