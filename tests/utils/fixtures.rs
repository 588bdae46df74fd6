use std::time::Duration;

use brokerconf::{Config, SaslConfig, TlsConfig};

pub const CA_FILE: &str = "/path/to/ca.crt";
pub const CERT_FILE: &str = "/path/to/client.crt";
pub const KEY_FILE: &str = "/path/to/client.key";

/// The canonical valid configuration: one local broker, 10s connect and 30s
/// request timeouts, five connections per broker and no retries.
pub fn valid_config() -> Config {
    Config {
        brokers: vec!["localhost:9092".to_owned()],
        connect_timeout: Duration::from_secs(10),
        request_timeout: Duration::from_secs(30),
        max_connections_per_broker: 5,
        max_retries: 0,
        tls: None,
        sasl: None,
    }
}

pub fn tls(enabled: bool, insecure_skip_verify: bool) -> TlsConfig {
    TlsConfig {
        enabled,
        insecure_skip_verify,
        ..TlsConfig::default()
    }
}

pub fn scram(username: &str, password: &str) -> SaslConfig {
    SaslConfig::new("SCRAM-SHA-256", username, password)
}
