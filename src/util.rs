//! Utility functions and types.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Returns whether an optional path is present and non-empty.
pub(crate) fn path_is_set<P: AsRef<Path>>(path: &Option<P>) -> bool {
    path.as_ref()
        .map_or(false, |p| !p.as_ref().as_os_str().is_empty())
}

/// Splits a comma separated list, trimming entries and dropping blank ones.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses a property value, reporting the key on failure.
pub(crate) fn parse_value<T: FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid_value(key, value))
}

/// Parses a property value expressed in milliseconds.
///
/// Negative values become [`Duration::ZERO`], so they are rejected by the
/// same rule, and with the same error, as a zero value.
pub(crate) fn parse_millis(key: &str, value: &str) -> ConfigResult<Duration> {
    parse_value::<i64>(key, value).map(millis_or_zero)
}

fn millis_or_zero(ms: i64) -> Duration {
    u64::try_from(ms).map_or(Duration::ZERO, Duration::from_millis)
}

/// Parses a boolean property value.
pub(crate) fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::invalid_value(key, value)),
    }
}

/// Serializes a [`Duration`] as a whole number of milliseconds.
///
/// Non-zero durations below one millisecond are written as `1` and durations
/// beyond `u64::MAX` milliseconds saturate, so a positive duration never
/// serializes to zero. Negative numbers deserialize to [`Duration::ZERO`].
pub(crate) mod duration_millis {
    use std::fmt;
    use std::time::Duration;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::millis_or_zero;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        let ms = if ms == 0 && !d.is_zero() { 1 } else { ms };
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        deserializer.deserialize_i64(MillisVisitor)
    }

    struct MillisVisitor;

    impl<'de> Visitor<'de> for MillisVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number of milliseconds")
        }

        fn visit_i64<E: de::Error>(self, ms: i64) -> Result<Duration, E> {
            Ok(millis_or_zero(ms))
        }

        fn visit_u64<E: de::Error>(self, ms: u64) -> Result<Duration, E> {
            Ok(Duration::from_millis(ms))
        }
    }
}
