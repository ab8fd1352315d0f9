//! Core traits and types for SMP.
//!
//! This crate defines the shared abstractions that systems and drivers build
//! on:
//!
//! - [`System`]: a stateful box that maps an input vector to an
//!   [`Observation`] once per discrete time step
//! - [`Observation`]: the named sensor channels produced by a step
//! - [`Snapshot`]: a captured input/output pair from a step
//! - [`config`]: resolution of user overrides over per-system defaults
//! - [`noise`]: seedable noise sources for stochastic systems

pub mod config;
mod error;
pub mod noise;
mod observation;
mod system;

pub use error::ShapeMismatch;
pub use observation::{Channel, Observation, UnknownChannel};
pub use system::{Loop, Snapshot, System};
