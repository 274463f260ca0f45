use crate::{
    BoxError, ClientConfig, QueueServiceClient, QueueServiceConnector, SendMessageBatchRequest,
    SendMessageRequest,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub(crate) const MOCK_QUEUE_URL_PREFIX: &str = "https://sqs.mock.local/000000000000/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MockOutput {
    pub(crate) message_id: String,
}

#[derive(Debug)]
pub(crate) struct MockError(pub(crate) String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

#[derive(Default)]
struct Recorded {
    connects: Mutex<Vec<ClientConfig>>,
    resolved: Mutex<Vec<String>>,
    sent: Mutex<Vec<SendMessageRequest>>,
    batches: Mutex<Vec<SendMessageBatchRequest>>,
}

pub(crate) struct MockQueueClient {
    recorded: Arc<Recorded>,
    resolved_url: Option<String>,
    fail_resolve: bool,
    fail_send: bool,
}

#[async_trait]
impl QueueServiceClient for MockQueueClient {
    type SendOutput = MockOutput;
    type BatchOutput = Vec<MockOutput>;

    async fn resolve_queue_url(&self, queue_name: &str) -> Result<String, BoxError> {
        self.recorded
            .resolved
            .lock()
            .unwrap()
            .push(queue_name.to_string());
        if self.fail_resolve {
            return Err(Box::new(MockError(format!("no queue named {queue_name}"))));
        }
        Ok(self
            .resolved_url
            .clone()
            .unwrap_or_else(|| format!("{MOCK_QUEUE_URL_PREFIX}{queue_name}")))
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<MockOutput, BoxError> {
        if self.fail_send {
            return Err(Box::new(MockError("service unavailable".to_string())));
        }
        let mut sent = self.recorded.sent.lock().unwrap();
        sent.push(request);
        Ok(MockOutput {
            message_id: format!("msg-{}", sent.len()),
        })
    }

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<Vec<MockOutput>, BoxError> {
        if self.fail_send {
            return Err(Box::new(MockError("service unavailable".to_string())));
        }
        let outputs = request
            .entries
            .iter()
            .map(|entry| MockOutput {
                message_id: entry.id.clone(),
            })
            .collect();
        self.recorded.batches.lock().unwrap().push(request);
        Ok(outputs)
    }
}

/// Hands out clients that all record into the same place.
#[derive(Default)]
pub(crate) struct MockConnector {
    recorded: Arc<Recorded>,
    resolved_url: Option<String>,
    fail_resolve: bool,
    fail_send: bool,
}

impl MockConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // every queue name resolves to this url
    pub(crate) fn resolving_to(url: &str) -> Self {
        Self {
            resolved_url: Some(url.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn failing_resolve() -> Self {
        Self {
            fail_resolve: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_send() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    pub(crate) fn connects(&self) -> Vec<ClientConfig> {
        self.recorded.connects.lock().unwrap().clone()
    }

    pub(crate) fn resolved(&self) -> Vec<String> {
        self.recorded.resolved.lock().unwrap().clone()
    }

    pub(crate) fn sent(&self) -> Vec<SendMessageRequest> {
        self.recorded.sent.lock().unwrap().clone()
    }

    pub(crate) fn batches(&self) -> Vec<SendMessageBatchRequest> {
        self.recorded.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueServiceConnector for MockConnector {
    type Client = MockQueueClient;

    async fn connect(&self, config: &ClientConfig) -> Result<MockQueueClient, BoxError> {
        self.recorded.connects.lock().unwrap().push(config.clone());
        Ok(MockQueueClient {
            recorded: self.recorded.clone(),
            resolved_url: self.resolved_url.clone(),
            fail_resolve: self.fail_resolve,
            fail_send: self.fail_send,
        })
    }
}
