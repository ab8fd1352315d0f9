use smp_core::Snapshot;

/// Event emitted by the driver after each step.
///
/// Steps are numbered from 1; the snapshot holds the input the policy chose
/// and the observation the system returned for it.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,
    pub snapshot: Snapshot<I, O>,
}
