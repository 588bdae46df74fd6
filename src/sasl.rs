//! SASL authentication settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, SaslField};
use crate::rules::{self, Rule};

/// SASL mechanisms known to the client.
///
/// [`SaslConfig`] stores the mechanism as a free-form name; this enum only
/// classifies the names the client recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SaslMechanism {
    /// SASL/PLAIN.
    Plain,
    /// SASL/SCRAM-SHA-256.
    ScramSha256,
    /// SASL/SCRAM-SHA-512.
    ScramSha512,
    /// SASL/OAUTHBEARER.
    OAuthBearer,
}

impl SaslMechanism {
    /// Returns the mechanism name as used in the SASL handshake.
    pub fn mechanism_name(&self) -> &'static str {
        match self {
            SaslMechanism::Plain => "PLAIN",
            SaslMechanism::ScramSha256 => "SCRAM-SHA-256",
            SaslMechanism::ScramSha512 => "SCRAM-SHA-512",
            SaslMechanism::OAuthBearer => "OAUTHBEARER",
        }
    }

    /// Returns whether the mechanism is in the challenge-response family.
    pub fn is_scram(&self) -> bool {
        matches!(self, SaslMechanism::ScramSha256 | SaslMechanism::ScramSha512)
    }
}

impl FromStr for SaslMechanism {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<SaslMechanism> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLAIN" => Ok(SaslMechanism::Plain),
            "SCRAM-SHA-256" => Ok(SaslMechanism::ScramSha256),
            "SCRAM-SHA-512" => Ok(SaslMechanism::ScramSha512),
            "OAUTHBEARER" => Ok(SaslMechanism::OAuthBearer),
            _ => Err(ConfigError::invalid_value("sasl.mechanism", s)),
        }
    }
}

impl fmt::Display for SaslMechanism {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mechanism_name())
    }
}

/// SASL authentication configuration.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SaslConfig {
    /// Whether the client authenticates.
    pub enabled: bool,
    /// Mechanism name, e.g. `SCRAM-SHA-256`.
    pub mechanism: String,
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

// Only consulted when SASL is enabled; order decides which missing field is
// reported.
const SASL_RULES: &[Rule<SaslConfig>] = &[
    Rule {
        name: "mechanism",
        holds: |sasl| !sasl.mechanism.is_empty(),
        error: |_| ConfigError::IncompleteCredentials(SaslField::Mechanism),
    },
    Rule {
        name: "username",
        holds: |sasl| !sasl.username.is_empty(),
        error: |_| ConfigError::IncompleteCredentials(SaslField::Username),
    },
    Rule {
        name: "password",
        holds: |sasl| !sasl.password.is_empty(),
        error: |_| ConfigError::IncompleteCredentials(SaslField::Password),
    },
];

impl SaslConfig {
    /// Returns an enabled configuration with the given credentials.
    pub fn new<M, U, P>(mechanism: M, username: U, password: P) -> SaslConfig
    where
        M: Into<String>,
        U: Into<String>,
        P: Into<String>,
    {
        SaslConfig {
            enabled: true,
            mechanism: mechanism.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks the SASL policy.
    ///
    /// Disabled SASL is always accepted and its fields are ignored. Enabled
    /// SASL needs a mechanism, a username and a password; partial credentials
    /// are rejected as a whole.
    pub fn check(&self) -> ConfigResult<()> {
        if !self.enabled {
            return Ok(());
        }
        rules::check("SASL config", self, SASL_RULES)
    }

    /// Returns whether [`SaslConfig::check`] accepts the configuration.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Returns the configured mechanism if the client recognizes it.
    pub fn known_mechanism(&self) -> Option<SaslMechanism> {
        self.mechanism.parse().ok()
    }
}

impl fmt::Debug for SaslConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("SaslConfig")
            .field("enabled", &self.enabled)
            .field("mechanism", &self.mechanism)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}
