use std::error::Error as StdError;

/// Errors that can abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("system error at step {step}: {source}")]
    System {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::System {
            step,
            source: Box::new(err),
        }
    }
}
