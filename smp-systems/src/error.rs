use ndarray::Array1;
use smp_core::{ShapeMismatch, config::ConfigError};
use thiserror::Error;

use crate::kinematics::KinematicsError;

/// Errors produced by the systems in this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shape(#[from] ShapeMismatch),

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    #[error("{what} contains a NaN or infinite element")]
    NonFinite { what: &'static str },
}

impl Error {
    /// Checks that every element of `values` is finite.
    pub(crate) fn check_finite(what: &'static str, values: &Array1<f64>) -> Result<(), Self> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(Self::NonFinite { what })
        }
    }
}
