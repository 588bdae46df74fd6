//! Consumer and consumer group settings.

use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, FromClientConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::rules::{self, Rule};
use crate::util::{parse_value, split_list};

/// Where a consumer starts reading when it has no committed position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOffset {
    /// Start from the earliest available message.
    Beginning,
    /// Start after the latest message.
    #[default]
    End,
    /// Start at a specific offset.
    Offset(i64),
}

impl StartOffset {
    /// Sentinel raw value for [`StartOffset::Beginning`].
    pub const BEGINNING: i64 = -2;
    /// Sentinel raw value for [`StartOffset::End`].
    pub const END: i64 = -1;

    /// Converts a raw offset, interpreting the sentinel values.
    pub fn from_raw(raw: i64) -> StartOffset {
        match raw {
            StartOffset::BEGINNING => StartOffset::Beginning,
            StartOffset::END => StartOffset::End,
            n => StartOffset::Offset(n),
        }
    }

    /// Converts to the raw representation used on the wire.
    pub fn to_raw(self) -> i64 {
        match self {
            StartOffset::Beginning => StartOffset::BEGINNING,
            StartOffset::End => StartOffset::END,
            StartOffset::Offset(n) => n,
        }
    }
}

/// Consumer configuration.
///
/// `start_offset` is not judged here; the consumer protocol decides what to do
/// with an offset that is out of range.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Consumer group, empty for direct consumption.
    pub group_id: String,
    /// Starting position.
    pub start_offset: StartOffset,
    /// Byte budget of a single fetch request.
    pub max_fetch_bytes: i32,
}

impl Default for ConsumerConfig {
    fn default() -> ConsumerConfig {
        ConsumerConfig {
            group_id: String::new(),
            start_offset: StartOffset::End,
            max_fetch_bytes: 1024 * 1024,
        }
    }
}

const CONSUMER_RULES: &[Rule<ConsumerConfig>] = &[Rule {
    name: "max fetch bytes",
    holds: |c| c.max_fetch_bytes > 0,
    error: |c| ConfigError::InvalidFetchSize(c.max_fetch_bytes),
}];

impl ConsumerConfig {
    /// Validates the consumer configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        rules::check("consumer config", self, CONSUMER_RULES)
    }

    /// Returns whether the consumer reads as part of a group.
    pub fn is_group_member(&self) -> bool {
        !self.group_id.is_empty()
    }
}

impl FromClientConfig for ConsumerConfig {
    fn from_config(config: &ClientConfig) -> ConfigResult<ConsumerConfig> {
        let mut consumer = ConsumerConfig::default();
        if let Some(group_id) = config.get("group.id") {
            consumer.group_id = group_id.trim().to_owned();
        }
        if let Some(reset) = config.get("auto.offset.reset") {
            consumer.start_offset = match reset.trim().to_ascii_lowercase().as_str() {
                "earliest" | "smallest" | "beginning" => StartOffset::Beginning,
                "latest" | "largest" | "end" => StartOffset::End,
                _ => return Err(ConfigError::invalid_value("auto.offset.reset", reset)),
            };
        }
        // An explicit offset overrides the reset policy.
        if let Some(raw) = config.get("start.offset") {
            consumer.start_offset = StartOffset::from_raw(parse_value("start.offset", raw)?);
        }
        if let Some(bytes) = config.get("fetch.max.bytes") {
            consumer.max_fetch_bytes = parse_value("fetch.max.bytes", bytes)?;
        }
        consumer.validate()?;
        Ok(consumer)
    }
}

/// Consumer group membership configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupConsumerConfig {
    /// Group identity, required.
    pub group_id: String,
    /// Subscribed topics, in declaration order.
    pub topics: Vec<String>,
}

const GROUP_RULES: &[Rule<GroupConsumerConfig>] = &[
    Rule {
        name: "group id",
        holds: |g| !g.group_id.is_empty(),
        error: |_| ConfigError::MissingGroupIdentity,
    },
    Rule {
        name: "subscription",
        holds: |g| !g.topics.is_empty(),
        error: |_| ConfigError::EmptySubscription,
    },
];

impl GroupConsumerConfig {
    /// Creates a group consumer configuration.
    pub fn new<G, I, T>(group_id: G, topics: I) -> GroupConsumerConfig
    where
        G: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        GroupConsumerConfig {
            group_id: group_id.into(),
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates the group configuration: a group id and at least one topic
    /// are both required.
    pub fn validate(&self) -> ConfigResult<()> {
        rules::check("group consumer config", self, GROUP_RULES)
    }

    /// Returns whether [`GroupConsumerConfig::validate`] accepts the
    /// configuration.
    pub fn is_valid(&self) -> bool {
        !self.group_id.is_empty() && !self.topics.is_empty()
    }
}

impl FromClientConfig for GroupConsumerConfig {
    fn from_config(config: &ClientConfig) -> ConfigResult<GroupConsumerConfig> {
        let group = GroupConsumerConfig {
            group_id: config.get("group.id").map(str::trim).unwrap_or_default().to_owned(),
            topics: config.get("topics").map(split_list).unwrap_or_default(),
        };
        group.validate()?;
        Ok(group)
    }
}
