use thiserror::Error;

/// Errors raised by a queue service client. They are handed back to the
/// caller as the source of [`MessageBuilderError::Transport`], untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum MessageBuilderError {
    #[error("invalid value for {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    }, // empty, blank or out of range value

    #[error("attribute '{0}' has already been added to this message")]
    DuplicateAttribute(String), // same name added twice to one message

    #[error("a message carries at most {max} attributes")]
    AttributeLimitExceeded { max: usize }, // the eleventh attribute

    #[error("queue url has not been resolved")]
    MissingQueueUrl, // request built before the queue name resolved to an address

    #[error("a batch carries at most {max} entries")]
    BatchLimitExceeded { max: usize }, // more entries than one batch call takes

    #[error("queue service call failed: {0}")]
    Transport(#[source] BoxError), // anything the client reported, resolution or submission
}

impl MessageBuilderError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// The client's own error, when this is a transport failure. Use
    /// `downcast_ref` on it to get at the concrete type.
    pub fn transport_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
