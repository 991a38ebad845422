use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickupApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `detail` is the server's `detail` text, or a fixed
    /// per-operation message when the body carried none.
    #[error("{detail}")]
    RequestFailed { status: u16, detail: String },

    #[error("invalid pickup API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
