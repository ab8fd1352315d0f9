//! Concrete SMP systems.
//!
//! - [`PointMass`]: a force-driven point mass integrated with semi-implicit
//!   Euler, with friction and Gaussian process noise.
//! - [`SimpleArm`]: a planar multi-joint arm whose motor command sets the
//!   joint angles directly, observed through [`kinematics`].
//! - [`AnySystem`]: a tagged variant over both, constructible by
//!   [`SystemKind`] from a configuration mapping.

pub mod bounds;
mod error;
pub mod kinematics;
pub mod point_mass;
mod registry;
pub mod simple_arm;

pub use error::Error;
pub use point_mass::{PointMass, PointMassConfig};
pub use registry::{AnySystem, SystemKind, UnknownSystem};
pub use simple_arm::{SimpleArm, SimpleArmConfig};
