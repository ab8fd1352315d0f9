//! Closed-loop driver for a single system.
//!
//! Each step asks the policy for an input, steps the system with it, and
//! records the pair:
//!
//! ```text
//! input_n = policy(n, input_dim, observation_{n-1})
//! observation_n = system.step(input_n)
//! ```
//!
//! # Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use smp_run::{ProprioceptiveFeedback, run_unobserved};
//! # use ndarray::Array1;
//! # use rand::Rng;
//! # use smp_core::{Loop, Observation, System};
//! # struct Echo;
//! # impl System for Echo {
//! #     type Error = std::convert::Infallible;
//! #     fn control_loop(&self) -> Loop { Loop::Closed }
//! #     fn input_dim(&self) -> usize { 2 }
//! #     fn step<R: Rng + ?Sized>(&mut self, input: &Array1<f64>, _rng: &mut R)
//! #         -> Result<Observation, Self::Error> {
//! #         Ok(Observation::concatenated(input.clone(), input.clone()))
//! #     }
//! #     fn reset(&mut self) {}
//! # }
//!
//! let mut system = Echo;
//! let mut policy = ProprioceptiveFeedback::default();
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let solution = run_unobserved(&mut system, &mut policy, 10, &mut rng).unwrap();
//! assert_eq!(solution.history.len(), 10);
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use ndarray::Array1;
use rand::Rng;
use smp_core::{Observation, Snapshot, System};
use tracing::{debug, info};

use crate::{Observer, Policy};

/// Drives `system` for `steps` steps with inputs chosen by `policy`.
///
/// The observer receives an [`Event`] after each step and may return
/// [`Action::StopEarly`] to end the run. All randomness the system needs is
/// drawn from `rng`.
///
/// # Errors
///
/// Returns [`Error::System`] if the system rejects an input. The history up
/// to that step is discarded.
pub fn run<S, P, R, Obs>(
    system: &mut S,
    policy: &mut P,
    steps: usize,
    rng: &mut R,
    mut observer: Obs,
) -> Result<Solution<Array1<f64>, Observation>, Error>
where
    S: System,
    P: Policy,
    R: Rng + ?Sized,
    Obs: Observer<Event<Array1<f64>, Observation>, Action>,
{
    let input_dim = system.input_dim();
    info!(steps, input_dim, "starting run");

    let mut history: Vec<Snapshot<Array1<f64>, Observation>> = Vec::with_capacity(steps);

    for step in 1..=steps {
        let last = history.last().map(|snapshot| &snapshot.output);
        let input = policy.act(step, input_dim, last);

        let output = system
            .step(&input, rng)
            .map_err(|err| Error::system(step, err))?;
        let snapshot = Snapshot::new(input, output);
        history.push(snapshot.clone());

        let event = Event { step, snapshot };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!(step, "observer stopped run");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    info!(steps, "run complete");
    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Drives `system` without observation.
///
/// # Errors
///
/// Returns [`Error::System`] if the system rejects an input.
pub fn run_unobserved<S, P, R>(
    system: &mut S,
    policy: &mut P,
    steps: usize,
    rng: &mut R,
) -> Result<Solution<Array1<f64>, Observation>, Error>
where
    S: System,
    P: Policy,
    R: Rng + ?Sized,
{
    run(system, policy, steps, rng, ())
}
