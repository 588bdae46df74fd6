//! Test building configurations from string properties.

use std::path::PathBuf;
use std::time::Duration;

use maplit::hashmap;

use brokerconf::{
    ClientConfig, Compression, Config, ConfigError, ConsumerConfig, GroupConsumerConfig,
    ProducerConfig, SaslField, StartOffset, TimeoutField,
};

use crate::utils::logging::init_test_logger;

mod utils;

fn create_config() -> ClientConfig {
    let mut config = ClientConfig::new();
    config.set("bootstrap.servers", "kafka-1:9092, kafka-2:9092");
    config
}

#[test]
fn test_defaults_fill_unset_properties() {
    init_test_logger();

    let config: Config = ClientConfig::new().create().expect("config creation failed");
    assert_eq!(config, Config::default());

    let config: Config = create_config().create().expect("config creation failed");
    assert_eq!(config.brokers, vec!["kafka-1:9092", "kafka-2:9092"]);
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert!(config.tls.is_none());
    assert!(config.sasl.is_none());
}

#[test]
fn test_base_properties() {
    init_test_logger();

    let config: Config = create_config()
        .set("socket.connection.setup.timeout.ms", "2500")
        .set("request.timeout.ms", "15000")
        .set("connections.max.per.broker", "8")
        .set("retries", "0")
        .set("some.unknown.property", "ignored")
        .create()
        .expect("config creation failed");
    assert_eq!(config.connect_timeout, Duration::from_millis(2500));
    assert_eq!(config.request_timeout, Duration::from_millis(15000));
    assert_eq!(config.max_connections_per_broker, 8);
    assert_eq!(config.max_attempts(), 1);
}

#[test]
fn test_base_property_errors() {
    init_test_logger();

    let cases = vec![
        ("bootstrap.servers", " , ", ConfigError::EmptyBrokerList),
        (
            "request.timeout.ms",
            "0",
            ConfigError::InvalidTimeout(TimeoutField::RequestTimeout),
        ),
        ("retries", "-1", ConfigError::InvalidRetryBudget(-1)),
        (
            "socket.connection.setup.timeout.ms",
            "-10",
            ConfigError::InvalidTimeout(TimeoutField::ConnectTimeout),
        ),
        (
            "request.timeout.ms",
            "-5",
            ConfigError::InvalidTimeout(TimeoutField::RequestTimeout),
        ),
        (
            "socket.connection.setup.timeout.ms",
            "soon",
            ConfigError::InvalidValue {
                key: "socket.connection.setup.timeout.ms".to_owned(),
                value: "soon".to_owned(),
            },
        ),
        (
            "security.protocol",
            "tls",
            ConfigError::InvalidValue {
                key: "security.protocol".to_owned(),
                value: "tls".to_owned(),
            },
        ),
    ];
    for (key, value, expected) in cases {
        let result = create_config().set(key, value).create::<Config>();
        assert_eq!(result, Err(expected), "{}={}", key, value);
    }
}

#[test]
fn test_ssl_properties() {
    init_test_logger();

    let config: Config = hashmap! {
        "bootstrap.servers" => "kafka-1:9093",
        "security.protocol" => "SSL",
        "ssl.ca.location" => "/etc/ssl/ca.crt",
        "ssl.certificate.location" => "/etc/ssl/client.crt",
        "ssl.key.location" => "/etc/ssl/client.key",
        "ssl.endpoint.identification.hostname" => "kafka-1",
    }
    .into_iter()
    .collect::<ClientConfig>()
    .create()
    .expect("config creation failed");

    let tls = config.tls.expect("TLS not configured");
    assert!(tls.enabled);
    assert!(!tls.insecure_skip_verify);
    assert_eq!(tls.ca_file, Some(PathBuf::from("/etc/ssl/ca.crt")));
    assert!(tls.has_client_cert());
    assert_eq!(tls.server_name.as_deref(), Some("kafka-1"));
    assert!(config.sasl.is_none());
}

#[test]
fn test_ssl_trust_root_rules() {
    init_test_logger();

    let result = create_config()
        .set("security.protocol", "ssl")
        .create::<Config>();
    assert_eq!(result, Err(ConfigError::MissingTrustRoot));

    let config: Config = create_config()
        .set("security.protocol", "ssl")
        .set("enable.ssl.certificate.verification", "false")
        .create()
        .expect("config creation failed");
    assert!(config.tls.map_or(false, |tls| tls.insecure_skip_verify));

    let result = create_config()
        .set("security.protocol", "ssl")
        .set("enable.ssl.certificate.verification", "false")
        .set("ssl.key.location", "/etc/ssl/client.key")
        .create::<Config>();
    assert_eq!(result, Err(ConfigError::AsymmetricClientCert));
}

#[test]
fn test_sasl_properties() {
    init_test_logger();

    let config: Config = create_config()
        .set("security.protocol", "sasl_plaintext")
        .set("sasl.mechanism", "SCRAM-SHA-256")
        .set("sasl.username", "user")
        .set("sasl.password", "pass")
        .create()
        .expect("config creation failed");
    assert!(config.sasl_enabled());
    assert!(!config.tls_enabled());

    let result = create_config()
        .set("security.protocol", "sasl_plaintext")
        .set("sasl.mechanism", "SCRAM-SHA-256")
        .set("sasl.username", "user")
        .create::<Config>();
    assert_eq!(
        result,
        Err(ConfigError::IncompleteCredentials(SaslField::Password))
    );

    // Credentials without a SASL protocol are kept but not enforced.
    let config: Config = create_config()
        .set("sasl.username", "user")
        .create()
        .expect("config creation failed");
    assert!(config.sasl.is_some());
    assert!(!config.sasl_enabled());
}

#[test]
fn test_producer_properties() {
    init_test_logger();

    let producer: ProducerConfig = ClientConfig::new()
        .set("acks", "0")
        .set("linger.ms", "20")
        .set("compression.type", "lz4")
        .create()
        .expect("producer config creation failed");
    assert!(!producer.require_ack);
    assert_eq!(producer.batch_timeout, Duration::from_millis(20));
    assert_eq!(producer.compression, Compression::Lz4);

    let producer: ProducerConfig = ClientConfig::new()
        .set("acks", "all")
        .create()
        .expect("producer config creation failed");
    assert!(producer.require_ack);

    for linger in ["0", "-1"] {
        let result = ClientConfig::new()
            .set("linger.ms", linger)
            .create::<ProducerConfig>();
        assert_eq!(result, Err(ConfigError::InvalidBatchTimeout), "linger.ms={}", linger);
    }

    let result = ClientConfig::new()
        .set("compression.type", "brotli")
        .create::<ProducerConfig>();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_consumer_properties() {
    init_test_logger();

    let consumer: ConsumerConfig = ClientConfig::new()
        .set("group.id", "test-group")
        .set("auto.offset.reset", "earliest")
        .set("fetch.max.bytes", "65536")
        .create()
        .expect("consumer config creation failed");
    assert_eq!(consumer.group_id, "test-group");
    assert_eq!(consumer.start_offset, StartOffset::Beginning);
    assert_eq!(consumer.max_fetch_bytes, 65536);

    let consumer: ConsumerConfig = ClientConfig::new()
        .set("auto.offset.reset", "earliest")
        .set("start.offset", "1234")
        .create()
        .expect("consumer config creation failed");
    assert_eq!(consumer.start_offset, StartOffset::Offset(1234));
    assert!(!consumer.is_group_member());

    let result = ClientConfig::new()
        .set("fetch.max.bytes", "-1")
        .create::<ConsumerConfig>();
    assert_eq!(result, Err(ConfigError::InvalidFetchSize(-1)));
}

#[test]
fn test_group_consumer_properties() {
    init_test_logger();

    let group: GroupConsumerConfig = ClientConfig::new()
        .set("group.id", "test-group")
        .set("topics", "orders, payments")
        .create()
        .expect("group consumer config creation failed");
    assert_eq!(group.topics, vec!["orders", "payments"]);

    let result = ClientConfig::new()
        .set("topics", "orders")
        .create::<GroupConsumerConfig>();
    assert_eq!(result, Err(ConfigError::MissingGroupIdentity));

    let result = ClientConfig::new()
        .set("group.id", "test-group")
        .set("topics", " ,, ")
        .create::<GroupConsumerConfig>();
    assert_eq!(result, Err(ConfigError::EmptySubscription));
}
