//! Drivers that step SMP systems under a policy.
//!
//! A run alternates between a [`Policy`], which chooses the next input, and a
//! [`System`](smp_core::System), which turns that input into an
//! [`Observation`](smp_core::Observation). Every step is recorded as a
//! [`Snapshot`](smp_core::Snapshot) and reported to an [`Observer`], which may
//! stop the run early.

mod observe;
mod policy;
pub mod run;

pub use observe::Observer;
pub use policy::{Policy, ProprioceptiveFeedback};
pub use run::{Action, Error, Event, Solution, Status, run, run_unobserved};
