use std::{fmt, str::FromStr};

use ndarray::Array1;
use rand::Rng;
use smp_core::{
    Loop, Observation, System,
    config::{Overrides, Strictness},
};
use thiserror::Error;

use crate::{Error, PointMass, SimpleArm};

/// The kinds of system this crate provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    PointMass,
    SimpleArm,
}

/// Error returned when parsing a [`SystemKind`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown system `{0}`")]
pub struct UnknownSystem(pub String);

impl SystemKind {
    /// Every available kind.
    pub const ALL: [SystemKind; 2] = [SystemKind::SimpleArm, SystemKind::PointMass];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SystemKind::PointMass => "pointmass",
            SystemKind::SimpleArm => "simplearm",
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SystemKind {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SystemKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownSystem(s.to_owned()))
    }
}

/// Any of the systems in this crate, dispatched by variant.
#[derive(Debug, Clone)]
pub enum AnySystem {
    PointMass(PointMass),
    SimpleArm(SimpleArm),
}

impl AnySystem {
    /// Builds a system of the given kind by resolving `overrides` over that
    /// kind's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if resolution or validation fails, or
    /// [`Error::Kinematics`] for an unsupported arm angle unit.
    pub fn from_overrides(
        kind: SystemKind,
        overrides: &Overrides,
        strictness: Strictness,
    ) -> Result<Self, Error> {
        Ok(match kind {
            SystemKind::PointMass => {
                AnySystem::PointMass(PointMass::from_overrides(overrides, strictness)?)
            }
            SystemKind::SimpleArm => {
                AnySystem::SimpleArm(SimpleArm::from_overrides(overrides, strictness)?)
            }
        })
    }

    /// Builds a system of the given kind with its default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the defaults fail validation.
    pub fn with_defaults(kind: SystemKind) -> Result<Self, Error> {
        Self::from_overrides(kind, &Overrides::new(), Strictness::Strict)
    }

    #[must_use]
    pub fn kind(&self) -> SystemKind {
        match self {
            AnySystem::PointMass(_) => SystemKind::PointMass,
            AnySystem::SimpleArm(_) => SystemKind::SimpleArm,
        }
    }

    /// Returns the number of steps taken since construction.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        match self {
            AnySystem::PointMass(system) => system.step_count(),
            AnySystem::SimpleArm(system) => system.step_count(),
        }
    }
}

impl From<PointMass> for AnySystem {
    fn from(system: PointMass) -> Self {
        AnySystem::PointMass(system)
    }
}

impl From<SimpleArm> for AnySystem {
    fn from(system: SimpleArm) -> Self {
        AnySystem::SimpleArm(system)
    }
}

impl System for AnySystem {
    type Error = Error;

    fn control_loop(&self) -> Loop {
        match self {
            AnySystem::PointMass(system) => system.control_loop(),
            AnySystem::SimpleArm(system) => system.control_loop(),
        }
    }

    fn input_dim(&self) -> usize {
        match self {
            AnySystem::PointMass(system) => system.input_dim(),
            AnySystem::SimpleArm(system) => system.input_dim(),
        }
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        input: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Observation, Self::Error> {
        match self {
            AnySystem::PointMass(system) => system.step(input, rng),
            AnySystem::SimpleArm(system) => system.step(input, rng),
        }
    }

    fn reset(&mut self) {
        match self {
            AnySystem::PointMass(system) => system.reset(),
            AnySystem::SimpleArm(system) => system.reset(),
        }
    }
}
