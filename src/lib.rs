//! Builds single and batch message requests for a managed queue service and
//! hands them to an injected client.

mod attribute;
mod builder;
mod client;
mod config;
mod error;
mod request;

pub mod impls;

#[cfg(test)]
mod test_utils;

pub use attribute::{AttributeKind, AttributeValue, MAX_ATTRIBUTES};
pub use builder::{BatchOutput, MessageRequestBuilder, SendOutput, DEFAULT_BODY, MAX_BODY_BYTES};
pub use client::{QueueServiceClient, QueueServiceConnector};
pub use config::{
    ClientConfig, QueueConfig, DEFAULT_API_VERSION, DEFAULT_DELAY_SECONDS, DEFAULT_REGION,
    MAX_DELAY_SECONDS,
};
pub use error::{BoxError, MessageBuilderError};
pub use request::{
    Attributes, BatchEntry, SendMessageBatchRequest, SendMessageRequest, MAX_BATCH_ENTRIES,
};
