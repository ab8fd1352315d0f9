//! A force-driven point mass.
//!
//! The point mass is an abstract model of a rigid body robot represented only
//! by its coordinates. Each step integrates a force command with
//! semi-implicit Euler:
//!
//! ```text
//! a = u / mass
//! v = v_prev * (1 - friction) + a * dt
//! p = p_prev + v * dt
//! ```
//!
//! after which zero-mean Gaussian noise with standard deviation `sysnoise` is
//! added to every element of the state `(p, v, a)`, acceleration included.

mod config;

use ndarray::{Array1, ArrayView1, Zip, s};
use rand::Rng;
use smp_core::{
    Loop, Observation, ShapeMismatch, System,
    config::{ConfigError, Overrides, Strictness, SystemConfig, resolve},
    noise::GaussianNoise,
};
use tracing::{debug, trace, warn};

use crate::{Error, bounds::Bounds};

pub use config::{INITIAL_STATE_SPREAD, PointMassConfig};

/// A point mass moving in `sysdim` dimensions under a force command.
///
/// The state vector is partitioned into three blocks of `sysdim` elements:
/// position, velocity, and acceleration. The acceleration block holds the
/// acceleration computed by the most recent step, plus that step's noise.
///
/// Sensor channels returned by [`step`](System::step):
///
/// - `proprioceptive`: the acceleration block
/// - `exteroceptive`: the velocity block
/// - `all`: the full state
#[derive(Debug, Clone)]
pub struct PointMass {
    config: PointMassConfig,
    bounds: Bounds,
    noise: GaussianNoise,
    x0: Array1<f64>,
    x: Array1<f64>,
    count: u64,
    extra: Overrides,
}

impl PointMass {
    /// Creates a point mass from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration fails validation.
    pub fn new(config: PointMassConfig) -> Result<Self, Error> {
        config.validate()?;

        let bounds = config.force_bounds()?;
        let noise = GaussianNoise::new(config.sysnoise)
            .map_err(|err| ConfigError::invalid("sysnoise", err.to_string()))?;
        let x0 = config.initial_state();

        debug!(
            sysdim = config.sysdim,
            dt = config.dt,
            mass = config.mass,
            friction = config.friction,
            sysnoise = config.sysnoise,
            clamp_force = config.clamp_force,
            "constructed point mass"
        );

        Ok(Self {
            config,
            bounds,
            noise,
            x: x0.clone(),
            x0,
            count: 0,
            extra: Overrides::new(),
        })
    }

    /// Creates a point mass by resolving `overrides` over the defaults.
    ///
    /// Unrecognized keys are kept and available through [`extra`](Self::extra)
    /// unless `strictness` rejects them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if resolution or validation fails.
    pub fn from_overrides(overrides: &Overrides, strictness: Strictness) -> Result<Self, Error> {
        let resolved = resolve::<PointMassConfig>(overrides, strictness)?;
        if !resolved.extra.is_empty() {
            warn!(
                keys = ?resolved.extra.keys().collect::<Vec<_>>(),
                "point mass ignores unrecognized configuration keys"
            );
        }

        let mut point_mass = Self::new(resolved.config)?;
        point_mass.extra = resolved.extra;
        Ok(point_mass)
    }

    /// Returns the configuration this point mass was built from.
    #[must_use]
    pub fn config(&self) -> &PointMassConfig {
        &self.config
    }

    /// Returns configuration entries that matched no known field.
    #[must_use]
    pub fn extra(&self) -> &Overrides {
        &self.extra
    }

    /// Returns the full state vector `(p, v, a)`.
    #[must_use]
    pub fn state(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    #[must_use]
    pub fn position(&self) -> ArrayView1<'_, f64> {
        let n = self.config.sysdim;
        self.x.slice(s![..n])
    }

    #[must_use]
    pub fn velocity(&self) -> ArrayView1<'_, f64> {
        let n = self.config.sysdim;
        self.x.slice(s![n..2 * n])
    }

    #[must_use]
    pub fn acceleration(&self) -> ArrayView1<'_, f64> {
        let n = self.config.sysdim;
        self.x.slice(s![2 * n..])
    }

    /// Returns the number of force commands applied since construction.
    ///
    /// Not affected by [`reset`](System::reset).
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.count
    }

    /// Clips a force command into `[force_min, force_max]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `u` does not have `sysdim` elements.
    pub fn bound_motor(&self, u: &Array1<f64>) -> Result<Array1<f64>, Error> {
        ShapeMismatch::check("force command", self.config.sysdim, u.len())?;
        Ok(self.bounds.clip(u))
    }

    /// Integrates the force command `u` over one time step.
    ///
    /// The command is applied as given unless the configuration enables
    /// `clamp_force`. Noise is drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `u` does not have `sysdim` elements, or
    /// [`Error::NonFinite`] if any element is NaN or infinite. The state is
    /// left unchanged in both cases.
    pub fn apply_force<R: Rng + ?Sized>(
        &mut self,
        u: &Array1<f64>,
        rng: &mut R,
    ) -> Result<(), Error> {
        ShapeMismatch::check("force command", self.config.sysdim, u.len())?;
        Error::check_finite("force command", u)?;

        let u = if self.config.clamp_force {
            self.bounds.clip(u)
        } else {
            u.clone()
        };

        let PointMassConfig {
            dt, mass, friction, ..
        } = self.config;

        let a = u.mapv(|force| force / mass);
        let v = Zip::from(self.velocity())
            .and(&a)
            .map_collect(|&v, &a| v * (1.0 - friction) + a * dt);
        let p = Zip::from(self.position())
            .and(&v)
            .map_collect(|&p, &v| p + v * dt);

        let mut x: Array1<f64> = p.iter().chain(&v).chain(&a).copied().collect();
        self.noise.corrupt(&mut x, rng);

        self.x = x;
        self.count += 1;
        trace!(step = self.count, "applied force to point mass");

        Ok(())
    }

    /// Returns the sensor channels for the current state.
    #[must_use]
    pub fn observe(&self) -> Observation {
        Observation::new(
            self.acceleration().to_owned(),
            self.velocity().to_owned(),
            self.x.clone(),
        )
    }
}

impl System for PointMass {
    type Error = Error;

    fn control_loop(&self) -> Loop {
        Loop::Closed
    }

    fn input_dim(&self) -> usize {
        self.config.sysdim
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        input: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Observation, Self::Error> {
        self.apply_force(input, rng)?;
        Ok(self.observe())
    }

    fn reset(&mut self) {
        self.x = self.x0.clone();
        debug!(step = self.count, "reset point mass");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::bounds::Limit;

    /// A point mass with no noise and no friction.
    fn ideal(sysdim: usize) -> PointMass {
        PointMass::new(PointMassConfig {
            sysdim,
            friction: 0.0,
            sysnoise: 0.0,
            ..PointMassConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn constant_force_matches_closed_form() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let force = 0.5;
        let mass = 2.0;
        let dt = 0.1;

        for n in [1_u32, 10, 100] {
            let mut pm = PointMass::new(PointMassConfig {
                mass,
                dt,
                friction: 0.0,
                sysnoise: 0.0,
                ..PointMassConfig::default()
            })
            .unwrap();

            for _ in 0..n {
                pm.step(&array![force], &mut rng).unwrap();
            }

            let a = force / mass;
            let n = f64::from(n);
            assert_relative_eq!(pm.velocity()[0], n * a * dt, max_relative = 1e-9);
            assert_relative_eq!(
                pm.position()[0],
                a * dt * dt * n * (n + 1.0) / 2.0,
                max_relative = 1e-9
            );
            assert_relative_eq!(pm.acceleration()[0], a);
        }
    }

    #[test]
    fn friction_decays_velocity_geometrically() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let friction = 0.2;
        let mut pm = PointMass::new(PointMassConfig {
            friction,
            sysnoise: 0.0,
            x0: Some(vec![0.0, 1.0, 0.0]),
            ..PointMassConfig::default()
        })
        .unwrap();

        for n in 1..=20 {
            pm.step(&array![0.0], &mut rng).unwrap();
            assert_relative_eq!(
                pm.velocity()[0],
                (1.0 - friction).powi(n),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn integrates_each_dimension_independently() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut pm = ideal(3);

        let obs = pm.step(&array![1.0, 0.0, -2.0], &mut rng).unwrap();

        assert_eq!(obs.proprioceptive, array![1.0, 0.0, -2.0]);
        assert_relative_eq!(obs.exteroceptive[0], 0.1);
        assert_relative_eq!(obs.exteroceptive[2], -0.2);
        assert_relative_eq!(pm.position()[0], 0.01);
        assert_eq!(obs.all.len(), 9);
    }

    #[test]
    fn all_channel_is_current_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut pm = PointMass::new(PointMassConfig {
            sysdim: 2,
            sysnoise: 0.05,
            ..PointMassConfig::default()
        })
        .unwrap();

        for _ in 0..25 {
            let obs = pm.step(&array![0.3, -0.7], &mut rng).unwrap();
            assert_eq!(obs.all, pm.state());
            assert_eq!(obs.proprioceptive, pm.acceleration());
            assert_eq!(obs.exteroceptive, pm.velocity());
        }
    }

    #[test]
    fn noise_reaches_every_state_element() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut pm = PointMass::new(PointMassConfig {
            friction: 0.0,
            sysnoise: 0.1,
            ..PointMassConfig::default()
        })
        .unwrap();

        pm.step(&array![0.0], &mut rng).unwrap();

        // Without noise every element would be exactly zero.
        assert!(pm.state().iter().all(|&v| v != 0.0));
    }

    #[test]
    fn wrong_input_length_is_rejected_without_mutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut pm = ideal(2);
        pm.step(&array![1.0, 1.0], &mut rng).unwrap();
        let before = pm.state().to_owned();

        let err = pm.step(&array![1.0], &mut rng).unwrap_err();

        assert!(matches!(
            err,
            Error::Shape(ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert_eq!(pm.state(), before);
        assert_eq!(pm.step_count(), 1);
    }

    #[test]
    fn non_finite_force_is_rejected_without_mutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut pm = ideal(2);
        pm.step(&array![0.5, 0.5], &mut rng).unwrap();
        let before = pm.state().to_owned();

        for bad in [f64::NAN, f64::INFINITY] {
            let err = pm.step(&array![0.0, bad], &mut rng).unwrap_err();
            assert!(matches!(err, Error::NonFinite { what: "force command" }));
        }
        assert_eq!(pm.state(), before);
        assert_eq!(pm.step_count(), 1);
    }

    #[test]
    fn force_is_unbounded_unless_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let mut free = ideal(1);
        free.step(&array![5.0], &mut rng).unwrap();
        assert_relative_eq!(free.acceleration()[0], 5.0);

        let mut clamped = PointMass::new(PointMassConfig {
            clamp_force: true,
            sysnoise: 0.0,
            ..PointMassConfig::default()
        })
        .unwrap();
        clamped.step(&array![5.0], &mut rng).unwrap();
        assert_relative_eq!(clamped.acceleration()[0], 1.0);
    }

    #[test]
    fn bound_motor_clips_into_force_limits() {
        let pm = PointMass::new(PointMassConfig {
            sysdim: 2,
            force_min: Limit::PerElement(vec![-1.0, -0.5]),
            force_max: Limit::Scalar(0.5),
            ..PointMassConfig::default()
        })
        .unwrap();

        assert_eq!(
            pm.bound_motor(&array![-3.0, -3.0]).unwrap(),
            array![-1.0, -0.5]
        );
        assert_eq!(pm.bound_motor(&array![3.0, 0.1]).unwrap(), array![0.5, 0.1]);
        assert!(pm.bound_motor(&array![0.0]).is_err());
    }

    #[test]
    fn reset_restores_initial_state_but_not_counter() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let x0 = vec![0.1, -0.2, 0.0];
        let mut pm = PointMass::new(PointMassConfig {
            x0: Some(x0.clone()),
            ..PointMassConfig::default()
        })
        .unwrap();

        for _ in 0..5 {
            pm.step(&array![1.0], &mut rng).unwrap();
        }
        pm.reset();

        assert_eq!(pm.state(), Array1::from_vec(x0));
        assert_eq!(pm.step_count(), 5);
    }

    #[test]
    fn reset_replays_a_fresh_trajectory() {
        let config = PointMassConfig {
            sysdim: 2,
            ..PointMassConfig::default()
        };
        let inputs = [array![0.2, -0.1], array![1.0, 0.5], array![-0.4, 0.0]];

        let mut fresh = PointMass::new(config.clone()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let expected: Vec<_> = inputs
            .iter()
            .map(|u| fresh.step(u, &mut rng).unwrap())
            .collect();

        let mut reused = PointMass::new(config).unwrap();
        let mut warmup = ChaCha8Rng::seed_from_u64(1);
        for u in &inputs {
            reused.step(u, &mut warmup).unwrap();
        }
        reused.reset();

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for (u, expected) in inputs.iter().zip(&expected) {
            assert_eq!(&reused.step(u, &mut rng).unwrap(), expected);
        }
    }

    #[test]
    fn keeps_unrecognized_keys_aside() {
        let overrides = serde_json::json!({ "mass": 3.0, "ros": false, "name": "pm" });
        let overrides = overrides.as_object().unwrap();

        let pm = PointMass::from_overrides(overrides, Strictness::Permissive).unwrap();
        assert_relative_eq!(pm.config().mass, 3.0);
        assert_eq!(pm.extra().len(), 2);

        let err = PointMass::from_overrides(overrides, Strictness::Strict).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownKey { .. })));
    }
}
