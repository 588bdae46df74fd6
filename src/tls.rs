//! Transport security settings.
//!
//! A [`TlsConfig`] describes whether connections to the brokers are
//! encrypted, which trust root is used to verify the brokers, and which client
//! certificate (if any) is presented. The connection layer calls
//! [`TlsConfig::check`] before dialing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::log::warn;
use crate::rules::{self, Rule};
use crate::util::path_is_set;

/// TLS configuration for broker connections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Whether connections are encrypted.
    pub enabled: bool,
    /// CA certificate (PEM) used to verify broker certificates.
    pub ca_file: Option<PathBuf>,
    /// Client certificate (PEM) presented for mutual TLS.
    pub cert_file: Option<PathBuf>,
    /// Private key (PEM) matching `cert_file`.
    pub key_file: Option<PathBuf>,
    /// Host name expected in the broker certificate.
    pub server_name: Option<String>,
    /// Skips broker certificate verification. Insecure, for testing only.
    pub insecure_skip_verify: bool,
}

const TLS_RULES: &[Rule<TlsConfig>] = &[
    // Applies even when TLS is disabled.
    Rule {
        name: "client certificate pair",
        holds: |tls| path_is_set(&tls.cert_file) == path_is_set(&tls.key_file),
        error: |_| ConfigError::AsymmetricClientCert,
    },
    Rule {
        name: "trust root",
        holds: |tls| !tls.enabled || tls.insecure_skip_verify || path_is_set(&tls.ca_file),
        error: |_| ConfigError::MissingTrustRoot,
    },
];

impl TlsConfig {
    /// Returns an enabled configuration that verifies brokers against the
    /// given CA file.
    pub fn with_ca_file<P: Into<PathBuf>>(ca_file: P) -> TlsConfig {
        TlsConfig {
            enabled: true,
            ca_file: Some(ca_file.into()),
            ..TlsConfig::default()
        }
    }

    /// Sets the client certificate and key used for mutual TLS.
    pub fn client_cert<C, K>(mut self, cert_file: C, key_file: K) -> TlsConfig
    where
        C: Into<PathBuf>,
        K: Into<PathBuf>,
    {
        self.cert_file = Some(cert_file.into());
        self.key_file = Some(key_file.into());
        self
    }

    /// Sets the host name used for certificate verification.
    pub fn server_name<S: Into<String>>(mut self, server_name: S) -> TlsConfig {
        self.server_name = Some(server_name.into());
        self
    }

    /// Returns whether a complete client certificate pair is configured.
    pub fn has_client_cert(&self) -> bool {
        path_is_set(&self.cert_file) && path_is_set(&self.key_file)
    }

    /// Checks the TLS policy.
    ///
    /// The client certificate pair is checked first and regardless of
    /// `enabled`. A CA file is then required when TLS is enabled, unless
    /// `insecure_skip_verify` waives it. The server name is not judged.
    pub fn check(&self) -> ConfigResult<()> {
        rules::check("TLS config", self, TLS_RULES)?;
        if self.enabled && self.insecure_skip_verify {
            warn!("TLS certificate verification is disabled; broker identity will not be checked");
        }
        Ok(())
    }

    /// Returns whether [`TlsConfig::check`] accepts the configuration.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}
