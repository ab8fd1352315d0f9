//! Resolution of user-supplied configuration over per-system defaults.
//!
//! Every system has a typed configuration struct whose [`Default`] value is
//! the system's default mapping. A caller may override any subset of those
//! fields with a mapping of named values ([`Overrides`]), either built in code
//! or parsed from TOML with [`parse_toml`]. [`resolve`] merges the overrides
//! over a fresh copy of the defaults and validates the result:
//!
//! - Keys present in the defaults replace the default value.
//! - Keys absent from the overrides keep their default.
//! - A `null` override for a field whose default is not `null` is rejected
//!   with [`ConfigError::Missing`], since a numerical routine depends on it.
//! - Keys the system does not know are kept aside in [`Resolved::extra`]
//!   under [`Strictness::Permissive`] and rejected with
//!   [`ConfigError::UnknownKey`] under [`Strictness::Strict`].

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

/// A mapping from configuration field names to values.
pub type Overrides = serde_json::Map<String, Value>;

/// A typed system configuration with defaults and validation.
pub trait SystemConfig: Default + Serialize + DeserializeOwned {
    /// Checks that every field holds a value the system can work with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// How [`resolve`] treats keys the configuration does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Unknown keys are accepted and returned in [`Resolved::extra`].
    #[default]
    Permissive,
    /// Unknown keys are an error.
    Strict,
}

/// The outcome of resolving overrides over a configuration's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<C> {
    /// The validated configuration.
    pub config: C,
    /// Overrides that matched no configuration field.
    pub extra: Overrides,
}

/// Errors that can occur while resolving or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration field `{key}` is required but was unset")]
    Missing { key: String },

    #[error("unknown configuration field `{key}`")]
    UnknownKey { key: String },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("configuration has the wrong shape")]
    Invalid(#[source] serde_json::Error),

    #[error("configuration defaults must serialize to a mapping")]
    NotAMapping,

    #[error("malformed TOML configuration")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Creates an [`InvalidValue`](ConfigError::InvalidValue) error.
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}

/// Merges `overrides` over the defaults of `C` and validates the result.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a required field is unset, an unknown key is
/// given under [`Strictness::Strict`], a value has the wrong type, or the
/// merged configuration fails [`SystemConfig::validate`].
pub fn resolve<C: SystemConfig>(
    overrides: &Overrides,
    strictness: Strictness,
) -> Result<Resolved<C>, ConfigError> {
    let Value::Object(mut fields) = serde_json::to_value(C::default()).map_err(ConfigError::Invalid)?
    else {
        return Err(ConfigError::NotAMapping);
    };

    let mut extra = Overrides::new();

    for (key, value) in overrides {
        match fields.get_mut(key) {
            Some(default) => {
                if value.is_null() && !default.is_null() {
                    return Err(ConfigError::Missing { key: key.clone() });
                }
                *default = value.clone();
            }
            None => match strictness {
                Strictness::Permissive => {
                    extra.insert(key.clone(), value.clone());
                }
                Strictness::Strict => {
                    return Err(ConfigError::UnknownKey { key: key.clone() });
                }
            },
        }
    }

    let config: C = serde_json::from_value(Value::Object(fields)).map_err(ConfigError::Invalid)?;
    config.validate()?;

    Ok(Resolved { config, extra })
}

/// Parses a TOML document into a set of overrides.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if `text` is not a valid TOML table.
pub fn parse_toml(text: &str) -> Result<Overrides, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Checks that `value` is finite and strictly positive.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for `key` otherwise.
pub fn ensure_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// Checks that `value` is finite and zero or greater.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for `key` otherwise.
pub fn ensure_non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("must be finite and >= 0, got {value}"),
        ))
    }
}

/// Checks that `value` is finite.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for `key` otherwise.
pub fn ensure_finite(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("must be finite, got {value}")))
    }
}
