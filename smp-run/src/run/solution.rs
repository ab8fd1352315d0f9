use smp_core::Snapshot;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every requested step was taken.
    Complete,

    /// The observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// The record of a run that ended without a system error.
///
/// `history[n]` pairs the input chosen for step `n + 1` with the observation
/// it produced, so `history.len() == steps` in both statuses. Replaying the
/// inputs into a reset system with a generator seeded the same way
/// reproduces the observations.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub history: Vec<Snapshot<I, O>>,

    /// Number of steps the system took.
    pub steps: usize,
}
