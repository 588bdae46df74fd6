//! Test the producer, consumer and group consumer settings.

use std::time::Duration;

use brokerconf::{
    Compression, ConfigError, ConsumerConfig, GroupConsumerConfig, ProducerConfig, StartOffset,
};

use crate::utils::logging::init_test_logger;

mod utils;

#[test]
fn test_producer_config() {
    init_test_logger();

    let producer = ProducerConfig {
        require_ack: true,
        batch_timeout: Duration::from_secs(5),
        compression: "none".parse().expect("none is a valid codec"),
    };
    assert!(producer.require_ack);
    assert_eq!(producer.compression, Compression::None);
    assert_eq!(producer.validate(), Ok(()));

    let producer = ProducerConfig {
        batch_timeout: Duration::ZERO,
        ..producer
    };
    assert_eq!(producer.validate(), Err(ConfigError::InvalidBatchTimeout));
}

#[test]
fn test_consumer_config() {
    init_test_logger();

    let consumer = ConsumerConfig {
        group_id: "test-group".to_owned(),
        start_offset: StartOffset::from_raw(0),
        max_fetch_bytes: 1024 * 1024,
    };
    assert!(consumer.is_group_member());
    assert_eq!(consumer.validate(), Ok(()));

    let direct = ConsumerConfig {
        group_id: String::new(),
        ..consumer.clone()
    };
    assert!(!direct.is_group_member());
    assert_eq!(direct.validate(), Ok(()));

    let consumer = ConsumerConfig {
        max_fetch_bytes: 0,
        ..consumer
    };
    assert_eq!(consumer.validate(), Err(ConfigError::InvalidFetchSize(0)));
}

#[test]
fn test_start_offset_unconstrained() {
    for raw in [i64::MIN, -3, -2, -1, 0, 42, i64::MAX] {
        let consumer = ConsumerConfig {
            start_offset: StartOffset::from_raw(raw),
            ..ConsumerConfig::default()
        };
        assert_eq!(consumer.validate(), Ok(()));
        assert_eq!(consumer.start_offset.to_raw(), raw);
    }
}

#[test]
fn test_group_consumer_config() {
    init_test_logger();

    let cases = [
        (GroupConsumerConfig::new("test-group", ["topic1", "topic2"]), Ok(())),
        (
            GroupConsumerConfig::new("", ["topic1"]),
            Err(ConfigError::MissingGroupIdentity),
        ),
        (
            GroupConsumerConfig::new("test-group", Vec::<String>::new()),
            Err(ConfigError::EmptySubscription),
        ),
        (
            GroupConsumerConfig {
                group_id: "test-group".to_owned(),
                topics: Vec::with_capacity(4),
            },
            Err(ConfigError::EmptySubscription),
        ),
        (
            GroupConsumerConfig::new("", Vec::<String>::new()),
            Err(ConfigError::MissingGroupIdentity),
        ),
    ];
    for (group, expected) in cases {
        assert_eq!(group.validate(), expected, "{:?}", group);
        assert_eq!(group.is_valid(), expected.is_ok());
    }
}
