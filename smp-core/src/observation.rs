use std::{fmt, str::FromStr};

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sensor readings produced by a single system step.
///
/// Every channel is a freshly allocated array, never a view into system state,
/// so holding an observation across later steps is always safe.
///
/// What each channel reports is a convention of the producing system.
/// The `all` channel is usually the concatenation of the other two, but a
/// system may report its full internal state there instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub proprioceptive: Array1<f64>,
    pub exteroceptive: Array1<f64>,
    pub all: Array1<f64>,
}

/// Names one of the channels of an [`Observation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The system's own internal or motor state.
    Proprioceptive,
    /// The system's effect on, or position in, its environment.
    Exteroceptive,
    /// Everything the system reports.
    All,
}

/// Error returned when parsing a [`Channel`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sensor channel `{0}`")]
pub struct UnknownChannel(pub String);

impl Observation {
    /// Creates an observation from explicit channel values.
    #[must_use]
    pub fn new(
        proprioceptive: Array1<f64>,
        exteroceptive: Array1<f64>,
        all: Array1<f64>,
    ) -> Self {
        Self {
            proprioceptive,
            exteroceptive,
            all,
        }
    }

    /// Creates an observation whose `all` channel stacks the proprioceptive
    /// values on top of the exteroceptive ones.
    #[must_use]
    pub fn concatenated(proprioceptive: Array1<f64>, exteroceptive: Array1<f64>) -> Self {
        let all = proprioceptive
            .iter()
            .chain(exteroceptive.iter())
            .copied()
            .collect();

        Self {
            proprioceptive,
            exteroceptive,
            all,
        }
    }

    /// Returns the values of the given channel.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> &Array1<f64> {
        match channel {
            Channel::Proprioceptive => &self.proprioceptive,
            Channel::Exteroceptive => &self.exteroceptive,
            Channel::All => &self.all,
        }
    }
}

impl Channel {
    /// Every channel, in reporting order.
    pub const ALL: [Channel; 3] = [Channel::Proprioceptive, Channel::Exteroceptive, Channel::All];

    /// Returns the channel's name as used by downstream consumers.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Channel::Proprioceptive => "proprioceptive",
            Channel::Exteroceptive => "exteroceptive",
            Channel::All => "all",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.name() == s)
            .ok_or_else(|| UnknownChannel(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn concatenated_stacks_proprio_then_extero() {
        let obs = Observation::concatenated(array![1.0, 2.0, 3.0], array![4.0, 5.0]);

        assert_eq!(obs.all, array![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(obs.channel(Channel::Proprioceptive), &array![1.0, 2.0, 3.0]);
        assert_eq!(obs.channel(Channel::Exteroceptive), &array![4.0, 5.0]);
    }

    #[test]
    fn channel_names_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(channel.name().parse::<Channel>().unwrap(), channel);
            assert_eq!(channel.to_string(), channel.name());
        }

        let err = "s_proprio".parse::<Channel>().unwrap_err();
        assert_eq!(err, UnknownChannel("s_proprio".to_owned()));
    }

    #[test]
    fn serializes_with_channel_names() {
        let obs = Observation::concatenated(array![0.5], array![1.0, -1.0]);
        let json = serde_json::to_value(&obs).unwrap();

        for channel in Channel::ALL {
            assert!(json.get(channel.name()).is_some(), "missing {channel}");
        }
    }
}
