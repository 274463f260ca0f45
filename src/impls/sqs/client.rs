use super::message::sqs_attributes;
use crate::{
    BoxError, ClientConfig, QueueServiceClient, QueueServiceConnector, SendMessageBatchRequest,
    SendMessageRequest, DEFAULT_API_VERSION,
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::{
    operation::{send_message::SendMessageOutput, send_message_batch::SendMessageBatchOutput},
    types::SendMessageBatchRequestEntry,
    Client,
};

pub struct SqsQueueClient {
    sqs_client: Client,
}

impl SqsQueueClient {
    pub fn new(sqs_client: Client) -> Self {
        Self { sqs_client }
    }
}

#[async_trait]
impl QueueServiceClient for SqsQueueClient {
    type SendOutput = SendMessageOutput;
    type BatchOutput = SendMessageBatchOutput;

    async fn resolve_queue_url(&self, queue_name: &str) -> Result<String, BoxError> {
        let output = self
            .sqs_client
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await?;
        output
            .queue_url
            .ok_or_else(|| format!("no url returned for queue {queue_name}").into())
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<SendMessageOutput, BoxError> {
        let output = self
            .sqs_client
            .send_message()
            .queue_url(request.queue_url)
            .message_body(request.body)
            .delay_seconds(i32::try_from(request.delay_seconds)?)
            .set_message_attributes(sqs_attributes(&request.attributes)?)
            .send()
            .await?;
        log::debug!("Queue accepted message {:?}", output.message_id);
        Ok(output)
    }

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<SendMessageBatchOutput, BoxError> {
        let entries = request
            .entries
            .iter()
            .map(SendMessageBatchRequestEntry::try_from)
            .collect::<Result<Vec<_>, BoxError>>()?;
        let output = self
            .sqs_client
            .send_message_batch()
            .queue_url(request.queue_url)
            .set_entries(Some(entries))
            .send()
            .await?;
        if !output.failed.is_empty() {
            log::warn!(
                "{} of {} batch entries were rejected by the queue",
                output.failed.len(),
                request.entries.len()
            );
        }
        Ok(output)
    }
}

/// Builds SQS clients from the default AWS credential chain, pinned to the
/// configured region.
#[derive(Debug, Clone, Default)]
pub struct SqsConnector {
    endpoint_url: Option<String>,
}

impl SqsConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points clients at another endpoint, e.g. a local emulator.
    pub fn with_endpoint_url(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
        }
    }
}

#[async_trait]
impl QueueServiceConnector for SqsConnector {
    type Client = SqsQueueClient;

    async fn connect(&self, config: &ClientConfig) -> Result<SqsQueueClient, BoxError> {
        // the SDK's API model is fixed at compile time
        if config.api_version != DEFAULT_API_VERSION {
            log::warn!(
                "Ignoring api version {}; using the SDK's latest behavior version",
                config.api_version
            );
        }
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        Ok(SqsQueueClient::new(Client::new(&sdk_config)))
    }
}
