//! Seedable noise sources for stochastic systems.
//!
//! Every sampling method takes an explicit `&mut R: Rng` so that a run is
//! reproducible whenever the same seed is provided.

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

/// Validation errors for noise parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NoiseError {
    #[error("standard deviation must be finite and >= 0, got {0}")]
    InvalidStdDev(f64),
}

/// Zero-mean Gaussian noise, independent per element.
#[derive(Debug, Clone, Copy)]
pub struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates a zero-mean Gaussian with standard deviation `std_dev`.
    ///
    /// A standard deviation of zero is allowed and produces exact zeros,
    /// while still consuming the generator as a noisy source would.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidStdDev`] if `std_dev` is negative, NaN,
    /// or infinite.
    pub fn new(std_dev: f64) -> Result<Self, NoiseError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(NoiseError::InvalidStdDev(std_dev));
        }
        let normal = Normal::new(0.0, std_dev).map_err(|_| NoiseError::InvalidStdDev(std_dev))?;
        Ok(Self { normal })
    }

    /// Returns the standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }

    /// Draws `len` independent samples.
    pub fn sample<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Array1<f64> {
        Array1::from_shape_simple_fn(len, || self.normal.sample(&mut *rng))
    }

    /// Adds an independent sample to every element of `values`.
    pub fn corrupt<R: Rng + ?Sized>(&self, values: &mut Array1<f64>, rng: &mut R) {
        values.mapv_inplace(|v| v + self.normal.sample(&mut *rng));
    }
}
