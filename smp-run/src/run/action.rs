/// Requests an observer can make after seeing an [`Event`](super::Event).
///
/// Returning `None` from the observer lets the run continue to the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run after the step just reported.
    ///
    /// That step's snapshot is already in the history, so the returned
    /// [`Solution`](super::Solution) holds exactly `event.step` snapshots
    /// and the system is left in the state that step produced.
    StopEarly,
}
