use crate::{
    config::{delay_in_range, non_empty},
    AttributeValue, Attributes, BatchEntry, MessageBuilderError, QueueConfig, QueueServiceClient,
    QueueServiceConnector, SendMessageBatchRequest, SendMessageRequest, MAX_ATTRIBUTES,
};

/// Body sent when none was set; the queue service rejects empty bodies.
pub const DEFAULT_BODY: &str = "Empty";

/// https://docs.aws.amazon.com/AWSSimpleQueueService/latest/SQSDeveloperGuide/quotas-messages.html
pub const MAX_BODY_BYTES: usize = 262_144;

pub type SendOutput<K> =
    <<K as QueueServiceConnector>::Client as QueueServiceClient>::SendOutput;
pub type BatchOutput<K> =
    <<K as QueueServiceConnector>::Client as QueueServiceClient>::BatchOutput;

type Result<T> = std::result::Result<T, MessageBuilderError>;

/// Collects the settings and attributes of one message, then resolves the
/// queue and submits it through a client built by the connector.
///
/// Use one builder per logical message. Every method takes `&mut self`, so an
/// instance cannot be shared between tasks without external locking, and it
/// is not meant to be.
///
/// ```no_run
/// # use queue_message_builder::*;
/// # async fn run<K: QueueServiceConnector>(connector: K) -> Result<(), MessageBuilderError> {
/// let mut builder = MessageRequestBuilder::new(connector, QueueConfig::default())?;
/// builder
///     .set_queue_name("orders")?
///     .set_body("hello")?
///     .add_attribute("count", 0)?
///     .add_attribute("origin", "web")?;
/// let output = builder.send().await?;
/// # Ok(())
/// # }
/// ```
pub struct MessageRequestBuilder<K: QueueServiceConnector> {
    connector: K,
    config: QueueConfig,
    body: String,
    attributes: Attributes,
    queue_url: String,
}

impl<K: QueueServiceConnector> MessageRequestBuilder<K> {
    /// Fails with `InvalidArgument` when `config` holds a value its setter
    /// would refuse.
    pub fn new(connector: K, config: QueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            connector,
            config,
            body: DEFAULT_BODY.to_string(),
            attributes: Attributes::new(),
            queue_url: String::new(),
        })
    }

    pub fn connector(&self) -> &K {
        &self.connector
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Empty until [`Self::resolve_queue_url`] succeeds, and again after the
    /// queue name or region changes.
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    pub fn set_api_version(&mut self, api_version: impl Into<String>) -> Result<&mut Self> {
        self.config.api_version = non_empty("api_version", api_version)?;
        Ok(self)
    }

    pub fn set_region(&mut self, region: impl Into<String>) -> Result<&mut Self> {
        self.config.region = non_empty("region", region)?;
        self.queue_url.clear();
        Ok(self)
    }

    /// Accepts 0 to 900. Zero means the message is visible right away.
    pub fn set_delay_seconds(&mut self, delay_seconds: u32) -> Result<&mut Self> {
        self.config.delay_seconds = delay_in_range(delay_seconds)?;
        Ok(self)
    }

    pub fn set_queue_name(&mut self, queue_name: impl Into<String>) -> Result<&mut Self> {
        self.config.queue_name = non_empty("queue_name", queue_name)?;
        self.queue_url.clear();
        Ok(self)
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> Result<&mut Self> {
        let body = non_empty("body", body)?;
        if body.len() > MAX_BODY_BYTES {
            return Err(MessageBuilderError::invalid(
                "body",
                format!("{} bytes exceeds the maximum of {MAX_BODY_BYTES}", body.len()),
            ));
        }
        self.body = body;
        Ok(self)
    }

    /// Adds a typed attribute. The limit is checked first, so the eleventh
    /// call fails even when its arguments are also invalid.
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<&mut Self> {
        if self.attributes.len() >= MAX_ATTRIBUTES {
            return Err(MessageBuilderError::AttributeLimitExceeded {
                max: MAX_ATTRIBUTES,
            });
        }
        let name = non_empty("attribute name", name)?;
        let value = value.into();
        if value.is_empty() {
            return Err(MessageBuilderError::invalid(
                "attribute value",
                format!("value for '{name}' must not be empty"),
            ));
        }
        if self.attributes.contains_key(&name) {
            return Err(MessageBuilderError::DuplicateAttribute(name));
        }
        log::debug!("Adding {} attribute {name}", value.kind());
        self.attributes.insert(name, value);
        Ok(self)
    }

    /// Asks the queue service for the address of the configured queue and
    /// keeps it for the next request.
    pub async fn resolve_queue_url(&mut self) -> Result<&str> {
        let client = self.connect().await?;
        self.resolve_with(&client).await?;
        Ok(&self.queue_url)
    }

    pub fn message_request(&self) -> Result<SendMessageRequest> {
        let queue_url = self.require_queue_url()?;
        Ok(SendMessageRequest {
            queue_url,
            body: self.body.clone(),
            delay_seconds: self.config.delay_seconds,
            attributes: self.attributes.clone(),
        })
    }

    /// The current message as a batch entry with a newly generated id.
    pub fn batch_entry(&self) -> BatchEntry {
        BatchEntry::new(
            self.body.clone(),
            self.config.delay_seconds,
            self.attributes.clone(),
        )
    }

    /// A batch holding only the current message.
    pub fn batch_request(&self) -> Result<SendMessageBatchRequest> {
        let queue_url = self.require_queue_url()?;
        SendMessageBatchRequest::new(queue_url, vec![self.batch_entry()])
    }

    pub async fn send(&mut self) -> Result<SendOutput<K>> {
        let client = self.connect().await?;
        self.resolve_with(&client).await?;
        let request = self.message_request()?;
        log::debug!("Sending message to {}", request.queue_url);
        let output = client
            .send_message(request)
            .await
            .map_err(MessageBuilderError::Transport)?;
        log::info!("Sent message to queue {}", self.config.queue_name);
        Ok(output)
    }

    pub async fn send_batch(&mut self) -> Result<BatchOutput<K>> {
        let client = self.connect().await?;
        self.resolve_with(&client).await?;
        let request = self.batch_request()?;
        self.submit_batch(&client, request).await
    }

    /// Sends caller-assembled entries in one batch, e.g. several
    /// [`Self::batch_entry`] snapshots taken between edits.
    pub async fn send_entries(&mut self, entries: Vec<BatchEntry>) -> Result<BatchOutput<K>> {
        let client = self.connect().await?;
        self.resolve_with(&client).await?;
        let request = SendMessageBatchRequest::new(self.require_queue_url()?, entries)?;
        self.submit_batch(&client, request).await
    }

    async fn connect(&self) -> Result<K::Client> {
        let client_config = self.config.client_config();
        log::debug!(
            "Connecting to queue service in {} with api version {}",
            client_config.region,
            client_config.api_version
        );
        self.connector
            .connect(&client_config)
            .await
            .map_err(MessageBuilderError::Transport)
    }

    async fn resolve_with(&mut self, client: &K::Client) -> Result<()> {
        let queue_name = non_empty("queue_name", self.config.queue_name.as_str())?;
        self.queue_url = client
            .resolve_queue_url(&queue_name)
            .await
            .map_err(MessageBuilderError::Transport)?;
        log::debug!("Resolved queue {queue_name} to {}", self.queue_url);
        Ok(())
    }

    async fn submit_batch(
        &self,
        client: &K::Client,
        request: SendMessageBatchRequest,
    ) -> Result<BatchOutput<K>> {
        let count = request.entries.len();
        let output = client
            .send_message_batch(request)
            .await
            .map_err(MessageBuilderError::Transport)?;
        log::info!(
            "Sent batch of {count} message(s) to queue {}",
            self.config.queue_name
        );
        Ok(output)
    }

    fn require_queue_url(&self) -> Result<String> {
        if self.queue_url.trim().is_empty() {
            return Err(MessageBuilderError::MissingQueueUrl);
        }
        Ok(self.queue_url.clone())
    }
}
