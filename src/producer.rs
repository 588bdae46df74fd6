//! Producer settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, FromClientConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::rules::{self, Rule};
use crate::util::{duration_millis, parse_millis, parse_value};

/// Message compression codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// No compression.
    #[default]
    None,
    /// gzip.
    Gzip,
    /// Snappy.
    Snappy,
    /// LZ4.
    Lz4,
    /// Zstandard.
    Zstd,
}

impl Compression {
    /// Returns the codec name.
    pub fn name(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Snappy => "snappy",
            Compression::Lz4 => "lz4",
            Compression::Zstd => "zstd",
        }
    }
}

impl FromStr for Compression {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Compression> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Compression::None),
            "gzip" => Ok(Compression::Gzip),
            "snappy" => Ok(Compression::Snappy),
            "lz4" => Ok(Compression::Lz4),
            "zstd" => Ok(Compression::Zstd),
            _ => Err(ConfigError::invalid_value("compression.type", s)),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Producer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Whether sends block until the broker acknowledges them.
    pub require_ack: bool,
    /// Maximum time a partial batch waits before it is flushed.
    #[serde(rename = "batch_timeout_ms", with = "duration_millis")]
    pub batch_timeout: Duration,
    /// Codec applied to message batches.
    pub compression: Compression,
}

impl Default for ProducerConfig {
    fn default() -> ProducerConfig {
        ProducerConfig {
            require_ack: true,
            batch_timeout: Duration::from_millis(5),
            compression: Compression::None,
        }
    }
}

const PRODUCER_RULES: &[Rule<ProducerConfig>] = &[Rule {
    name: "batch timeout",
    holds: |p| !p.batch_timeout.is_zero(),
    error: |_| ConfigError::InvalidBatchTimeout,
}];

impl ProducerConfig {
    /// Validates the producer configuration.
    ///
    /// Both acknowledgement modes are valid. The batch timeout must be
    /// positive so the batch timer can be scheduled.
    pub fn validate(&self) -> ConfigResult<()> {
        rules::check("producer config", self, PRODUCER_RULES)
    }
}

impl FromClientConfig for ProducerConfig {
    fn from_config(config: &ClientConfig) -> ConfigResult<ProducerConfig> {
        let mut producer = ProducerConfig::default();
        if let Some(acks) = config.get("acks") {
            producer.require_ack = match acks.trim() {
                "0" => false,
                "1" | "-1" | "all" => true,
                _ => return Err(ConfigError::invalid_value("acks", acks)),
            };
        }
        if let Some(linger) = config.get("linger.ms") {
            producer.batch_timeout = parse_millis("linger.ms", linger)?;
        }
        if let Some(codec) = config.get("compression.type") {
            producer.compression = parse_value("compression.type", codec)?;
        }
        producer.validate()?;
        Ok(producer)
    }
}
