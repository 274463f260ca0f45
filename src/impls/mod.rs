#[cfg(feature = "message_format")]
pub mod message_format;
#[cfg(feature = "sqs")]
pub mod sqs;
