use thiserror::Error;

use crate::classify::FailureKind;

/// Errors returned by the chat gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The question was empty or whitespace; no request was sent.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// Another question is still outstanding for the same conversation.
    #[error("a question is already being answered in this conversation")]
    Busy,

    /// The client could not be built (bad base URL, TLS setup).
    #[error("invalid chat client configuration: {0}")]
    InvalidConfig(String),

    /// The API key was rejected.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Rate or quota limit reached.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Network failure, timeout, malformed or empty response, or any other
    /// upstream error.
    #[error("transient error: {0}")]
    Transient(String),
}

impl ChatError {
    /// Build the upstream variant matching `kind`.
    #[must_use]
    pub fn upstream(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            FailureKind::Auth => ChatError::Auth(message),
            FailureKind::QuotaExceeded => ChatError::QuotaExceeded(message),
            FailureKind::Transient => ChatError::Transient(message),
        }
    }

    /// The upstream failure class, or `None` for errors raised before any
    /// request was made.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ChatError::Auth(_) => Some(FailureKind::Auth),
            ChatError::QuotaExceeded(_) => Some(FailureKind::QuotaExceeded),
            ChatError::Transient(_) => Some(FailureKind::Transient),
            ChatError::EmptyQuestion | ChatError::Busy | ChatError::InvalidConfig(_) => None,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transient(err.to_string())
    }
}
