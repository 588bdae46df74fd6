//! Client configuration and validation.
//!
//! A [`Config`] can be built in three ways:
//!
//! * starting from [`Config::default`], which is always valid;
//! * from a [`ClientConfig`] property map, using the same property names as
//!   other Kafka clients (`bootstrap.servers`, `request.timeout.ms`, ...);
//! * from a JSON document with [`Config::from_json`].
//!
//! Whatever the source, a configuration is checked by [`Config::validate`]
//! before use and then frozen into a [`ValidatedConfig`], which can be shared
//! freely between the components of a client session.

use std::collections::HashMap;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, TimeoutField};
use crate::log::debug;
use crate::rules::{self, Rule};
use crate::sasl::SaslConfig;
use crate::tls::TlsConfig;
use crate::util::{duration_millis, parse_bool, parse_millis, parse_value, split_list};

/// Broker dialed when none is configured explicitly.
pub const DEFAULT_BROKER: &str = "localhost:9092";
/// Default time allowed to establish a broker connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default time allowed for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection pool size per broker.
pub const DEFAULT_MAX_CONNECTIONS_PER_BROKER: usize = 5;
/// Default retry budget.
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Property names understood by the configuration types of this crate.
const KNOWN_PROPERTIES: &[&str] = &[
    "bootstrap.servers",
    "socket.connection.setup.timeout.ms",
    "request.timeout.ms",
    "connections.max.per.broker",
    "retries",
    "security.protocol",
    "ssl.ca.location",
    "ssl.certificate.location",
    "ssl.key.location",
    "ssl.endpoint.identification.hostname",
    "enable.ssl.certificate.verification",
    "sasl.mechanism",
    "sasl.username",
    "sasl.password",
    "acks",
    "linger.ms",
    "compression.type",
    "group.id",
    "auto.offset.reset",
    "start.offset",
    "fetch.max.bytes",
    "topics",
];

//
// ********** CLIENT CONFIG **********
//

/// Client configuration expressed as string properties.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    conf_map: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates a new empty configuration.
    pub fn new() -> ClientConfig {
        ClientConfig {
            conf_map: HashMap::new(),
        }
    }

    /// Gets the value of a parameter in the configuration.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.conf_map.get(key).map(|val| val.as_str())
    }

    /// Sets a parameter in the configuration.
    ///
    /// If there is an existing value for `key` in the configuration, it is
    /// overridden with the new `value`.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut ClientConfig
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.conf_map.insert(key.into(), value.into());
        self
    }

    /// Removes a parameter from the configuration.
    pub fn remove<'a>(&'a mut self, key: &str) -> &'a mut ClientConfig {
        self.conf_map.remove(key);
        self
    }

    /// Builds and validates a configuration of type `T` from the properties.
    pub fn create<T: FromClientConfig>(&self) -> ConfigResult<T> {
        for key in self.conf_map.keys() {
            if !KNOWN_PROPERTIES.contains(&key.as_str()) {
                debug!("Ignoring unknown configuration property '{}'", key);
            }
        }
        T::from_config(self)
    }
}

impl<K, V> FromIterator<(K, V)> for ClientConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I>(iter: I) -> ClientConfig
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut config = ClientConfig::new();
        config.extend(iter);
        config
    }
}

impl<K, V> Extend<(K, V)> for ClientConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.conf_map
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}

/// Create a new configuration value from a [`ClientConfig`].
///
/// Implementations validate what they build, so a successful conversion
/// never yields a configuration that would be rejected later.
pub trait FromClientConfig: Sized {
    /// Creates a configuration value from the given properties.
    fn from_config(_: &ClientConfig) -> ConfigResult<Self>;
}

//
// ********** SECURITY PROTOCOL **********
//

/// Security protocol named by the `security.protocol` property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SecurityProtocol {
    /// No encryption, no authentication.
    #[default]
    Plaintext,
    /// TLS without SASL.
    Ssl,
    /// SASL without TLS.
    SaslPlaintext,
    /// TLS and SASL.
    SaslSsl,
}

impl SecurityProtocol {
    /// Returns whether TLS is enabled by this protocol.
    pub fn requires_tls(&self) -> bool {
        matches!(self, SecurityProtocol::Ssl | SecurityProtocol::SaslSsl)
    }

    /// Returns whether SASL is enabled by this protocol.
    pub fn requires_sasl(&self) -> bool {
        matches!(self, SecurityProtocol::SaslPlaintext | SecurityProtocol::SaslSsl)
    }
}

impl FromStr for SecurityProtocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<SecurityProtocol> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plaintext" => Ok(SecurityProtocol::Plaintext),
            "ssl" => Ok(SecurityProtocol::Ssl),
            "sasl_plaintext" => Ok(SecurityProtocol::SaslPlaintext),
            "sasl_ssl" => Ok(SecurityProtocol::SaslSsl),
            _ => Err(ConfigError::invalid_value("security.protocol", s)),
        }
    }
}

//
// ********** CONFIG **********
//

/// Connection configuration shared by every component of a client session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Broker addresses (`host:port`) in preferred dial order.
    pub brokers: Vec<String>,
    /// Time allowed to establish a broker connection.
    #[serde(rename = "connect_timeout_ms", with = "duration_millis")]
    pub connect_timeout: Duration,
    /// Time allowed for a single request.
    #[serde(rename = "request_timeout_ms", with = "duration_millis")]
    pub request_timeout: Duration,
    /// Upper bound of the connection pool of each broker.
    pub max_connections_per_broker: usize,
    /// Number of retries after a failed request. Zero means a single attempt.
    pub max_retries: i32,
    /// Transport security, `None` when not configured.
    pub tls: Option<TlsConfig>,
    /// Authentication, `None` when not configured.
    pub sasl: Option<SaslConfig>,
}

/// Returns a fresh default configuration.
///
/// The result always passes [`Config::validate`].
pub fn default_config() -> Config {
    Config {
        brokers: vec![DEFAULT_BROKER.to_owned()],
        connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        request_timeout: DEFAULT_REQUEST_TIMEOUT,
        max_connections_per_broker: DEFAULT_MAX_CONNECTIONS_PER_BROKER,
        max_retries: DEFAULT_MAX_RETRIES,
        tls: None,
        sasl: None,
    }
}

impl Default for Config {
    fn default() -> Config {
        default_config()
    }
}

const CONFIG_RULES: &[Rule<Config>] = &[
    Rule {
        name: "brokers",
        holds: |c| c.brokers.iter().any(|b| !b.trim().is_empty()),
        error: |_| ConfigError::EmptyBrokerList,
    },
    Rule {
        name: "connect timeout",
        holds: |c| !c.connect_timeout.is_zero(),
        error: |_| ConfigError::InvalidTimeout(TimeoutField::ConnectTimeout),
    },
    Rule {
        name: "request timeout",
        holds: |c| !c.request_timeout.is_zero(),
        error: |_| ConfigError::InvalidTimeout(TimeoutField::RequestTimeout),
    },
    Rule {
        name: "retry budget",
        holds: |c| c.max_retries >= 0,
        error: |c| ConfigError::InvalidRetryBudget(c.max_retries),
    },
];

impl Config {
    /// Creates a configuration for the given brokers, with default values for
    /// everything else.
    pub fn with_brokers<I, S>(brokers: I) -> Config
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Config {
            brokers: brokers.into_iter().map(Into::into).collect(),
            ..Config::default()
        }
    }

    /// Parses a JSON document and validates the result, including the TLS and
    /// SASL settings.
    pub fn from_json(json: &str) -> ConfigResult<Config> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        config.check_security()?;
        Ok(config)
    }

    /// Validates the connection parameters.
    ///
    /// Rules are checked in this order and the first violation is returned:
    /// at least one non-blank broker, positive connect timeout, positive
    /// request timeout, non-negative retry budget. TLS and SASL settings are checked
    /// separately by [`Config::check_security`].
    pub fn validate(&self) -> ConfigResult<()> {
        rules::check("config", self, CONFIG_RULES)
    }

    /// Checks the TLS and then the SASL settings, if configured.
    pub fn check_security(&self) -> ConfigResult<()> {
        if let Some(tls) = &self.tls {
            tls.check()?;
        }
        if let Some(sasl) = &self.sasl {
            sasl.check()?;
        }
        Ok(())
    }

    /// Returns whether connections are encrypted.
    pub fn tls_enabled(&self) -> bool {
        self.tls.as_ref().map_or(false, |tls| tls.enabled)
    }

    /// Returns whether connections are authenticated.
    pub fn sasl_enabled(&self) -> bool {
        self.sasl.as_ref().map_or(false, |sasl| sasl.enabled)
    }

    /// Returns the number of times a request is attempted: the first attempt
    /// plus `max_retries` retries. Negative budgets count as no retries.
    pub fn max_attempts(&self) -> u32 {
        (self.max_retries.max(0) as u32).saturating_add(1)
    }

    /// Validates the whole configuration, including TLS and SASL, and freezes
    /// it for sharing.
    pub fn freeze(self) -> ConfigResult<ValidatedConfig> {
        self.validate()?;
        self.check_security()?;
        Ok(ValidatedConfig(Arc::new(self)))
    }
}

impl FromClientConfig for Config {
    fn from_config(props: &ClientConfig) -> ConfigResult<Config> {
        let mut config = Config::default();
        if let Some(servers) = props.get("bootstrap.servers") {
            config.brokers = split_list(servers);
        }
        if let Some(ms) = props.get("socket.connection.setup.timeout.ms") {
            config.connect_timeout = parse_millis("socket.connection.setup.timeout.ms", ms)?;
        }
        if let Some(ms) = props.get("request.timeout.ms") {
            config.request_timeout = parse_millis("request.timeout.ms", ms)?;
        }
        if let Some(n) = props.get("connections.max.per.broker") {
            config.max_connections_per_broker = parse_value("connections.max.per.broker", n)?;
        }
        if let Some(n) = props.get("retries") {
            config.max_retries = parse_value("retries", n)?;
        }
        let protocol: SecurityProtocol = match props.get("security.protocol") {
            Some(p) => p.parse()?,
            None => SecurityProtocol::default(),
        };
        config.tls = tls_from_props(props, protocol)?;
        config.sasl = sasl_from_props(props, protocol);
        config.validate()?;
        config.check_security()?;
        Ok(config)
    }
}

fn has_prefixed(props: &ClientConfig, prefix: &str) -> bool {
    props.conf_map.keys().any(|k| k.starts_with(prefix))
}

// TLS settings are kept even when the protocol does not enable TLS, so the
// client certificate pairing is still checked.
fn tls_from_props(
    props: &ClientConfig,
    protocol: SecurityProtocol,
) -> ConfigResult<Option<TlsConfig>> {
    if !protocol.requires_tls() && !has_prefixed(props, "ssl.") {
        return Ok(None);
    }
    let verify = match props.get("enable.ssl.certificate.verification") {
        Some(v) => parse_bool("enable.ssl.certificate.verification", v)?,
        None => true,
    };
    Ok(Some(TlsConfig {
        enabled: protocol.requires_tls(),
        ca_file: props.get("ssl.ca.location").map(Into::into),
        cert_file: props.get("ssl.certificate.location").map(Into::into),
        key_file: props.get("ssl.key.location").map(Into::into),
        server_name: props
            .get("ssl.endpoint.identification.hostname")
            .map(str::to_owned),
        insecure_skip_verify: !verify,
    }))
}

fn sasl_from_props(props: &ClientConfig, protocol: SecurityProtocol) -> Option<SaslConfig> {
    if !protocol.requires_sasl() && !has_prefixed(props, "sasl.") {
        return None;
    }
    let field = |key: &str| props.get(key).unwrap_or_default().to_owned();
    Some(SaslConfig {
        enabled: protocol.requires_sasl(),
        mechanism: field("sasl.mechanism"),
        username: field("sasl.username"),
        password: field("sasl.password"),
    })
}

//
// ********** VALIDATED CONFIG **********
//

/// A configuration that passed validation.
///
/// It can only be obtained through [`Config::freeze`] and dereferences to an
/// immutable [`Config`]. Cloning is cheap and clones share the same value, so
/// it can be handed to any number of concurrent components. Reconfiguring
/// means building and freezing a new [`Config`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig(Arc<Config>);

impl ValidatedConfig {
    /// Returns the underlying configuration.
    pub fn config(&self) -> &Config {
        &self.0
    }
}

impl Deref for ValidatedConfig {
    type Target = Config;

    fn deref(&self) -> &Config {
        &self.0
    }
}

impl AsRef<Config> for ValidatedConfig {
    fn as_ref(&self) -> &Config {
        &self.0
    }
}

impl TryFrom<Config> for ValidatedConfig {
    type Error = ConfigError;

    fn try_from(config: Config) -> ConfigResult<ValidatedConfig> {
        config.freeze()
    }
}
