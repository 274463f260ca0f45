use crate::{MessageBuilderError, MessageRequestBuilder, QueueServiceConnector};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// A JSON event wrapper for message bodies, so consumers can route on
/// `event_type` without knowing the payload up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope<D> {
    id: Uuid,
    event_type: String,
    event_at: DateTime<Utc>,
    data: D,
}

impl<D: Serialize + DeserializeOwned> MessageEnvelope<D> {
    // will assign an id, so be sure to clone if you intend to resend the same event
    pub fn create(event_type: impl Into<String>, event_at: DateTime<Utc>, data: D) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            event_at,
            data,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_at(&self) -> &DateTime<Utc> {
        &self.event_at
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<K: QueueServiceConnector> MessageRequestBuilder<K> {
    /// Serializes the envelope and uses it as the body, with the usual body
    /// checks.
    pub fn set_envelope_body<D: Serialize + DeserializeOwned>(
        &mut self,
        envelope: &MessageEnvelope<D>,
    ) -> Result<&mut Self, MessageBuilderError> {
        let json = envelope
            .to_json()
            .map_err(|e| MessageBuilderError::invalid("body", e.to_string()))?;
        self.set_body(json)
    }
}
