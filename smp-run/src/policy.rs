use ndarray::Array1;
use smp_core::Observation;

/// Chooses the input for each step of a run.
///
/// `last` is the observation returned by the previous step, or `None` before
/// the first step. Closures with the matching signature implement `Policy`.
pub trait Policy {
    fn act(&mut self, step: usize, input_dim: usize, last: Option<&Observation>) -> Array1<f64>;
}

impl<F> Policy for F
where
    F: FnMut(usize, usize, Option<&Observation>) -> Array1<f64>,
{
    fn act(&mut self, step: usize, input_dim: usize, last: Option<&Observation>) -> Array1<f64> {
        self(step, input_dim, last)
    }
}

/// Feeds the negated, rotated proprioceptive channel back as input.
///
/// Element `i` of the next input is `-gain * proprioceptive[i - shift]`,
/// indices taken modulo the input length. Before any observation exists, or
/// when the proprioceptive channel does not match the input length, the input
/// is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProprioceptiveFeedback {
    pub gain: f64,
    pub shift: usize,
}

impl Default for ProprioceptiveFeedback {
    fn default() -> Self {
        Self {
            gain: 0.1,
            shift: 1,
        }
    }
}

impl Policy for ProprioceptiveFeedback {
    fn act(&mut self, _step: usize, input_dim: usize, last: Option<&Observation>) -> Array1<f64> {
        let Some(proprio) = last
            .map(|obs| &obs.proprioceptive)
            .filter(|proprio| proprio.len() == input_dim && input_dim > 0)
        else {
            return Array1::zeros(input_dim);
        };

        let shift = self.shift % input_dim;
        Array1::from_shape_fn(input_dim, |i| {
            -self.gain * proprio[(i + input_dim - shift) % input_dim]
        })
    }
}
