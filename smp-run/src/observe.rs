/// Watches a run step by step and may end it.
///
/// The driver calls `observe` once per completed step, after the step's
/// snapshot has been recorded. Returning `Some(action)` asks the driver to act
/// on it; `None` continues the run. Observers see each event by reference,
/// so one that keeps data has to clone what it needs.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. `()` observes nothing
/// and never stops the run, which is what [`run_unobserved`](crate::run_unobserved)
/// passes.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_never_acts() {
        assert_eq!(Observer::<usize, bool>::observe(&mut (), &3), None);
    }

    #[test]
    fn closures_keep_state_between_events() {
        let mut seen = 0;
        let mut stop_after_two = |_: &usize| {
            seen += 1;
            (seen == 2).then_some("stop")
        };

        assert_eq!(stop_after_two.observe(&10), None);
        assert_eq!(stop_after_two.observe(&11), Some("stop"));
    }
}
