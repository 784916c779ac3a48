//! Error types for WHOOP retrieval and aggregation.
//!
//! A 404 from the API is not represented here: it means "no records" and is
//! absorbed by the client before it can become an error.

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;

/// Every failure the engine can surface to a caller.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    // ---
    /// Still rate limited (429) after all retries were spent.
    #[error("WHOOP API rate limit exceeded for {path}")]
    RateLimited { path: String },

    /// The token was rejected (401/403).
    #[error("WHOOP API rejected the access token ({status}) for {path}")]
    Unauthorized { status: u16, path: String },

    /// Any other non-2xx status. Never retried.
    #[error("WHOOP API returned {status} for {path}")]
    Upstream { status: u16, path: String },

    /// The HTTP primitive itself failed (connect, TLS, body read).
    #[error("WHOOP API request failed for {path}: {reason}")]
    Transport { path: String, reason: String },

    /// A 2xx body that is not a valid page.
    #[error("could not decode WHOOP response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Caller supplied a date that is not `YYYY-MM-DD`.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// Caller asked for an unusable day window.
    #[error("invalid day range: {reason}")]
    InvalidRange { reason: String },
}

impl FetchError {
    // ---
    /// True for errors caused by the caller's input rather than the upstream API.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FetchError::InvalidDate { .. } | FetchError::InvalidRange { .. }
        )
    }
}
