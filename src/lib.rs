//! Configuration validation for publish/subscribe broker clients.
//!
//! This crate owns the connection parameters of a client session (broker
//! list, timeouts, pool sizing, retry budget, TLS and SASL settings) and the
//! settings of the producer, consumer and group consumer roles. It applies
//! defaults and rejects invalid or insecure combinations before any network
//! activity takes place.
//!
//! ## Lifecycle
//!
//! Configurations are built once, validated once and then treated as
//! immutable:
//!
//! ```rust
//! use brokerconf::config::{ClientConfig, Config};
//!
//! let config: Config = ClientConfig::new()
//!     .set("bootstrap.servers", "kafka-1:9092,kafka-2:9092")
//!     .set("request.timeout.ms", "30000")
//!     .create()
//!     .expect("valid configuration");
//!
//! let shared = config.freeze().expect("valid configuration");
//! assert_eq!(shared.brokers.len(), 2);
//! ```
//!
//! Every check returns a [`ConfigError`] describing the first violated rule;
//! nothing in this crate panics on bad input.
//!
//! ## Logging
//!
//! Rejections are reported through the [`log`] crate at debug level, and
//! accepted-but-insecure TLS settings at warn level. Enable the `tracing`
//! feature to emit the same events through [`tracing`] instead.
//!
//! [`log`]: https://docs.rs/log
//! [`tracing`]: https://docs.rs/tracing

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod consumer;
pub mod error;
mod log;
pub mod producer;
pub mod rules;
pub mod sasl;
pub mod tls;
mod util;

// Re-exports.
pub use crate::config::{
    default_config, ClientConfig, Config, FromClientConfig, SecurityProtocol, ValidatedConfig,
};
pub use crate::consumer::{ConsumerConfig, GroupConsumerConfig, StartOffset};
pub use crate::error::{ConfigError, ConfigResult, SaslField, TimeoutField};
pub use crate::producer::{Compression, ProducerConfig};
pub use crate::sasl::{SaslConfig, SaslMechanism};
pub use crate::tls::TlsConfig;
