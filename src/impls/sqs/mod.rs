mod client;
mod message;

pub use client::{SqsConnector, SqsQueueClient};
