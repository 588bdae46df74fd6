//! Error manipulations.

use std::{error, fmt};

/// Configuration result.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The timeout a [`ConfigError::InvalidTimeout`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeoutField {
    /// Time allowed to establish a broker connection.
    ConnectTimeout,
    /// Time allowed for a single request to complete.
    RequestTimeout,
}

impl fmt::Display for TimeoutField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeoutField::ConnectTimeout => f.write_str("connect timeout"),
            TimeoutField::RequestTimeout => f.write_str("request timeout"),
        }
    }
}

/// The SASL credential a [`ConfigError::IncompleteCredentials`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SaslField {
    /// The authentication mechanism name.
    Mechanism,
    /// The user name.
    Username,
    /// The password.
    Password,
}

impl fmt::Display for SaslField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SaslField::Mechanism => f.write_str("mechanism"),
            SaslField::Username => f.write_str("username"),
            SaslField::Password => f.write_str("password"),
        }
    }
}

/// Represents all the ways a configuration can be rejected.
///
/// Every variant is produced by a local check and returned to the caller; no
/// validation path panics.
#[derive(Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No broker address was configured.
    EmptyBrokerList,
    /// A timeout is zero.
    InvalidTimeout(TimeoutField),
    /// The retry budget is negative.
    InvalidRetryBudget(i32),
    /// TLS verification is enabled but no CA file was given.
    MissingTrustRoot,
    /// Exactly one of the client certificate and private key was given.
    AsymmetricClientCert,
    /// SASL is enabled but a credential is missing.
    IncompleteCredentials(SaslField),
    /// A group consumer has no group id.
    MissingGroupIdentity,
    /// A group consumer has no topics to subscribe to.
    EmptySubscription,
    /// The producer batch timeout is zero.
    InvalidBatchTimeout,
    /// The consumer fetch size is not positive.
    InvalidFetchSize(i32),
    /// A configuration property could not be interpreted.
    InvalidValue {
        /// Property name.
        key: String,
        /// Offending value.
        value: String,
    },
    /// A configuration document could not be parsed.
    Parse(String),
}

impl ConfigError {
    pub(crate) fn invalid_value(key: &str, value: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Returns whether the error concerns transport security or
    /// authentication rather than the base connection parameters.
    pub fn is_security(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingTrustRoot
                | ConfigError::AsymmetricClientCert
                | ConfigError::IncompleteCredentials(_)
        )
    }
}

impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ConfigError ({})", self)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::EmptyBrokerList => write!(f, "No brokers configured"),
            ConfigError::InvalidTimeout(field) => {
                write!(f, "Invalid timeout: {} must be greater than zero", field)
            }
            ConfigError::InvalidRetryBudget(n) => {
                write!(f, "Invalid retry budget: max retries must not be negative, got {}", n)
            }
            ConfigError::MissingTrustRoot => write!(
                f,
                "Missing trust root: TLS is enabled without a CA file and verification is not skipped"
            ),
            ConfigError::AsymmetricClientCert => write!(
                f,
                "Asymmetric client certificate: cert file and key file must both be set or both be empty"
            ),
            ConfigError::IncompleteCredentials(field) => {
                write!(f, "Incomplete SASL credentials: missing {}", field)
            }
            ConfigError::MissingGroupIdentity => write!(f, "Missing consumer group id"),
            ConfigError::EmptySubscription => {
                write!(f, "Empty subscription: at least one topic is required")
            }
            ConfigError::InvalidBatchTimeout => {
                write!(f, "Invalid batch timeout: must be greater than zero")
            }
            ConfigError::InvalidFetchSize(n) => {
                write!(f, "Invalid fetch size: max fetch bytes must be positive, got {}", n)
            }
            ConfigError::InvalidValue { ref key, ref value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
            ConfigError::Parse(ref err) => write!(f, "Config parse error: {}", err),
        }
    }
}

impl error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Parse(err.to_string())
    }
}
