use crate::MessageBuilderError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_VERSION: &str = "latest";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_DELAY_SECONDS: u32 = 5;

/// Longest visibility delay the queue service accepts, 15 minutes.
pub const MAX_DELAY_SECONDS: u32 = 900;

/// Everything needed to address a queue and delay its messages.
///
/// Defaults are `api_version = "latest"`, `region = "us-east-1"`,
/// `delay_seconds = 5` and no queue name.
/// Deserializing runs [`QueueConfig::validate`], so a config file cannot
/// carry values the setters would refuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQueueConfig")]
pub struct QueueConfig {
    pub api_version: String,
    pub region: String,
    pub delay_seconds: u32,
    pub queue_name: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            region: DEFAULT_REGION.to_string(),
            delay_seconds: DEFAULT_DELAY_SECONDS,
            queue_name: String::new(),
        }
    }
}

// unchecked shape of a config file, defaults filled in
#[derive(Deserialize)]
#[serde(default)]
struct RawQueueConfig {
    api_version: String,
    region: String,
    delay_seconds: u32,
    queue_name: String,
}

impl Default for RawQueueConfig {
    fn default() -> Self {
        let QueueConfig {
            api_version,
            region,
            delay_seconds,
            queue_name,
        } = QueueConfig::default();
        Self {
            api_version,
            region,
            delay_seconds,
            queue_name,
        }
    }
}

impl TryFrom<RawQueueConfig> for QueueConfig {
    type Error = MessageBuilderError;

    fn try_from(raw: RawQueueConfig) -> Result<Self, Self::Error> {
        let config = Self {
            api_version: raw.api_version,
            region: raw.region,
            delay_seconds: raw.delay_seconds,
            queue_name: raw.queue_name,
        };
        config.validate()?;
        Ok(config)
    }
}

impl QueueConfig {
    pub fn new(queue_name: impl Into<String>) -> Self {
        Self {
            queue_name: queue_name.into(),
            ..Self::default()
        }
    }

    /// Reads `SQS_API_VERSION`, `AWS_REGION` (or `AWS_DEFAULT_REGION`),
    /// `SQS_DELAY_SECONDS` and `SQS_QUEUE_NAME`. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, MessageBuilderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MessageBuilderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup("SQS_API_VERSION") {
            config.api_version = non_empty("api_version", v)?;
        }
        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION")) {
            config.region = non_empty("region", v)?;
        }
        if let Some(v) = lookup("SQS_DELAY_SECONDS") {
            let seconds = v.trim().parse::<u32>().map_err(|e| {
                MessageBuilderError::invalid("delay_seconds", format!("'{v}' is not a number: {e}"))
            })?;
            config.delay_seconds = delay_in_range(seconds)?;
        }
        if let Some(v) = lookup("SQS_QUEUE_NAME") {
            config.queue_name = non_empty("queue_name", v)?;
        }
        log::debug!("Loaded queue config from environment: {config:?}");
        Ok(config)
    }

    /// Applies the setter checks to every field. An empty queue name means
    /// "not set yet" and passes; a blank one does not.
    pub fn validate(&self) -> Result<(), MessageBuilderError> {
        non_empty("api_version", self.api_version.as_str())?;
        non_empty("region", self.region.as_str())?;
        delay_in_range(self.delay_seconds)?;
        if !self.queue_name.is_empty() {
            non_empty("queue_name", self.queue_name.as_str())?;
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_version: self.api_version.clone(),
            region: self.region.clone(),
        }
    }
}

/// What a connector needs to build a queue service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_version: String,
    pub region: String,
}

pub(crate) fn non_empty(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, MessageBuilderError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(MessageBuilderError::invalid(field, "must not be empty"));
    }
    Ok(value)
}

pub(crate) fn delay_in_range(seconds: u32) -> Result<u32, MessageBuilderError> {
    if seconds > MAX_DELAY_SECONDS {
        return Err(MessageBuilderError::invalid(
            "delay_seconds",
            format!("{seconds} exceeds the maximum of {MAX_DELAY_SECONDS}"),
        ));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QueueConfig::default();
        assert_eq!(config.api_version, "latest");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.delay_seconds, 5);
        assert!(config.queue_name.is_empty());
    }

    #[test]
    fn test_from_lookup_overrides() {
        // given
        let lookup = lookup_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("SQS_DELAY_SECONDS", "30"),
            ("SQS_QUEUE_NAME", "orders"),
        ]);

        // when
        let config = QueueConfig::from_lookup(lookup).unwrap();

        // then
        assert_eq!(config.api_version, "latest");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.delay_seconds, 30);
        assert_eq!(config.queue_name, "orders");
    }

    #[test]
    fn test_from_lookup_falls_back_to_default_region_var() {
        let lookup = lookup_from(&[("AWS_DEFAULT_REGION", "ap-south-1")]);
        let config = QueueConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.region, "ap-south-1");
    }

    #[test]
    fn test_from_lookup_rejects_bad_delay() {
        let res = QueueConfig::from_lookup(lookup_from(&[("SQS_DELAY_SECONDS", "soon")]));
        assert!(matches!(
            res,
            Err(MessageBuilderError::InvalidArgument {
                field: "delay_seconds",
                ..
            })
        ));

        let res = QueueConfig::from_lookup(lookup_from(&[("SQS_DELAY_SECONDS", "901")]));
        assert!(res.is_err());
    }

    #[test]
    fn test_from_lookup_rejects_blank_queue_name() {
        let res = QueueConfig::from_lookup(lookup_from(&[("SQS_QUEUE_NAME", "  ")]));
        assert!(matches!(
            res,
            Err(MessageBuilderError::InvalidArgument {
                field: "queue_name",
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: QueueConfig =
            serde_json::from_str(r#"{"queue_name": "orders", "delay_seconds": 0}"#).unwrap();
        assert_eq!(config.queue_name, "orders");
        assert_eq!(config.delay_seconds, 0);
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn test_deserialize_rejects_invalid_values() {
        // given
        let json = r#"{"queue_name":"orders","region":"","api_version":" ","delay_seconds":5000}"#;

        // when
        let res = serde_json::from_str::<QueueConfig>(json);

        // then
        let err = res.unwrap_err().to_string();
        assert!(err.contains("api_version"), "{err}");

        let res = serde_json::from_str::<QueueConfig>(r#"{"delay_seconds": 901}"#);
        assert!(res.unwrap_err().to_string().contains("delay_seconds"));
        let res = serde_json::from_str::<QueueConfig>(r#"{"region": ""}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(QueueConfig::default().validate().is_ok());
        assert!(QueueConfig::new("orders").validate().is_ok());

        let blank_name = QueueConfig::new("  ");
        assert!(matches!(
            blank_name.validate(),
            Err(MessageBuilderError::InvalidArgument { field: "queue_name", .. })
        ));

        let slow = QueueConfig {
            delay_seconds: MAX_DELAY_SECONDS + 1,
            ..QueueConfig::default()
        };
        assert!(matches!(
            slow.validate(),
            Err(MessageBuilderError::InvalidArgument { field: "delay_seconds", .. })
        ));
    }

    #[test]
    fn test_client_config() {
        let config = QueueConfig::new("orders");
        assert_eq!(
            config.client_config(),
            ClientConfig {
                api_version: "latest".to_string(),
                region: "us-east-1".to_string(),
            }
        );
    }
}
