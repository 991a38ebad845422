//! Mapping of upstream failures onto the chat failure taxonomy.
//!
//! Structured signals win: the HTTP status and the Google RPC status string
//! are checked first. Only when neither is conclusive does the free-text
//! message get inspected for `"API key"` or `"quota"`, which is how the
//! browser SDK surfaced these errors. If upstream rewords its messages the
//! substring fallback silently degrades to [`FailureKind::Transient`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Auth,
    QuotaExceeded,
    Transient,
}

impl FailureKind {
    /// Diagnostic description used in logs.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            FailureKind::Auth => "Authentication error. Please check API key.",
            FailureKind::QuotaExceeded => "API quota exceeded. Please try again later.",
            FailureKind::Transient => "Unable to generate response. Please try again.",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Auth => write!(f, "auth"),
            FailureKind::QuotaExceeded => write!(f, "quota_exceeded"),
            FailureKind::Transient => write!(f, "transient"),
        }
    }
}

/// Classify an upstream failure.
///
/// `http_status` is the response status when one was received, `rpc_status`
/// the `error.status` string from a Google error body (e.g.
/// `"RESOURCE_EXHAUSTED"`), and `message` the human-readable error text.
#[must_use]
pub fn classify(http_status: Option<u16>, rpc_status: Option<&str>, message: &str) -> FailureKind {
    match rpc_status {
        Some("UNAUTHENTICATED" | "PERMISSION_DENIED") => return FailureKind::Auth,
        Some("RESOURCE_EXHAUSTED") => return FailureKind::QuotaExceeded,
        _ => {}
    }

    match http_status {
        Some(401 | 403) => return FailureKind::Auth,
        Some(429) => return FailureKind::QuotaExceeded,
        _ => {}
    }

    let lowered = message.to_lowercase();
    if lowered.contains("api key") {
        FailureKind::Auth
    } else if lowered.contains("quota") {
        FailureKind::QuotaExceeded
    } else {
        FailureKind::Transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_status_takes_precedence() {
        assert_eq!(
            classify(Some(400), Some("RESOURCE_EXHAUSTED"), "bad request"),
            FailureKind::QuotaExceeded
        );
        assert_eq!(
            classify(Some(400), Some("PERMISSION_DENIED"), ""),
            FailureKind::Auth
        );
    }

    #[test]
    fn http_status_classifies_auth_and_quota() {
        assert_eq!(classify(Some(401), None, ""), FailureKind::Auth);
        assert_eq!(classify(Some(403), None, ""), FailureKind::Auth);
        assert_eq!(classify(Some(429), None, ""), FailureKind::QuotaExceeded);
    }

    #[test]
    fn message_fallback_detects_api_key() {
        assert_eq!(
            classify(
                Some(400),
                Some("INVALID_ARGUMENT"),
                "API key not valid. Please pass a valid API key."
            ),
            FailureKind::Auth
        );
    }

    #[test]
    fn message_fallback_detects_quota() {
        assert_eq!(
            classify(None, None, "quota exceeded for this project"),
            FailureKind::QuotaExceeded
        );
        assert_eq!(
            classify(Some(500), None, "Quota metric exhausted"),
            FailureKind::QuotaExceeded
        );
    }

    #[test]
    fn everything_else_is_transient() {
        assert_eq!(
            classify(Some(503), Some("UNAVAILABLE"), "The model is overloaded."),
            FailureKind::Transient
        );
        assert_eq!(
            classify(None, None, "connection reset"),
            FailureKind::Transient
        );
    }
}
