use thiserror::Error;

/// An input vector does not have the length a system expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{what} has {actual} elements, expected {expected}")]
pub struct ShapeMismatch {
    /// What was being checked, such as `"force command"`.
    pub what: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl ShapeMismatch {
    /// Checks that `actual` equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeMismatch`] describing `what` if the lengths differ.
    pub fn check(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self {
                what,
                expected,
                actual,
            })
        }
    }
}
