use crate::{BoxError, ClientConfig, SendMessageBatchRequest, SendMessageRequest};
use async_trait::async_trait;

// This trait abstracts away the queue service API. Implementations translate the
// requests into whatever the concrete client library wants and hand back its output.
#[async_trait]
pub trait QueueServiceClient: Send + Sync {
    type SendOutput: Send;
    type BatchOutput: Send;

    async fn resolve_queue_url(&self, queue_name: &str) -> Result<String, BoxError>;

    async fn send_message(&self, request: SendMessageRequest)
        -> Result<Self::SendOutput, BoxError>;

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<Self::BatchOutput, BoxError>;
}

/// Builds a client from an api version and region. The builder connects
/// right before each remote call so that setters applied in between take
/// effect.
#[async_trait]
pub trait QueueServiceConnector: Send + Sync {
    type Client: QueueServiceClient;

    async fn connect(&self, config: &ClientConfig) -> Result<Self::Client, BoxError>;
}
