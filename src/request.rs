use crate::{AttributeValue, MessageBuilderError};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// https://docs.aws.amazon.com/AWSSimpleQueueService/latest/APIReference/API_SendMessageBatch.html
pub const MAX_BATCH_ENTRIES: usize = 10;

pub type Attributes = HashMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub queue_url: String,
    pub body: String,
    pub delay_seconds: u32,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub id: String,
    pub body: String,
    pub delay_seconds: u32,
    pub attributes: Attributes,
}

impl BatchEntry {
    /// Assigns a fresh random id. Ids are random 128 bit values, so
    /// collisions are unlikely but not ruled out.
    pub fn new(body: impl Into<String>, delay_seconds: u32, attributes: Attributes) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            body: body.into(),
            delay_seconds,
            attributes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageBatchRequest {
    pub queue_url: String,
    pub entries: Vec<BatchEntry>,
}

impl SendMessageBatchRequest {
    /// Checks the entry list the way the queue service would: one to ten
    /// entries with distinct ids.
    pub fn new(
        queue_url: impl Into<String>,
        entries: Vec<BatchEntry>,
    ) -> Result<Self, MessageBuilderError> {
        let queue_url = queue_url.into();
        if queue_url.is_empty() {
            return Err(MessageBuilderError::MissingQueueUrl);
        }
        if entries.is_empty() {
            return Err(MessageBuilderError::invalid(
                "entries",
                "a batch needs at least one entry",
            ));
        }
        if entries.len() > MAX_BATCH_ENTRIES {
            return Err(MessageBuilderError::BatchLimitExceeded {
                max: MAX_BATCH_ENTRIES,
            });
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(MessageBuilderError::invalid(
                    "entries",
                    format!("entry id '{}' appears more than once", entry.id),
                ));
            }
        }
        Ok(Self { queue_url, entries })
    }
}
