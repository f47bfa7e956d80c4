use thiserror::Error;

/// Result type alias for guildsync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while talking to the community backend
#[derive(Error, Debug)]
pub enum SyncError {
    /// A read (single resource or any page of a paginated listing) returned
    /// a non-success status
    #[error("request to {url} failed with status {status}")]
    FetchFailed {
        /// URL of the offending request
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Request timed out
    #[error("request to {url} timed out after {secs} seconds")]
    Timeout {
        /// URL of the request that timed out
        url: String,
        /// Configured timeout
        secs: u64,
    },

    /// A mutation returned a non-success status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or error detail from the backend
        message: String,
    },

    /// The backend rejected the token on a mutation (401 or 403)
    #[error("authentication failed with status {status}: invalid token")]
    Unauthorized {
        /// HTTP status code
        status: u16,
    },

    /// A `next` link pointed at a page already visited
    #[error("pagination cycle detected at {url}")]
    PaginationCycle {
        /// URL that was about to be fetched a second time
        url: String,
    },

    /// Pagination went past the configured page bound
    #[error("pagination exceeded {limit} pages")]
    PageLimitExceeded {
        /// Maximum number of pages allowed
        limit: usize,
    },

    /// The backend payload does not honour the expected schema
    #[error("backend contract violation: {0}")]
    Contract(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Returns true if the error means a read never produced data.
    ///
    /// Timeouts count as fetch failures.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. }
                | Self::Timeout { .. }
                | Self::PaginationCycle { .. }
                | Self::PageLimitExceeded { .. }
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns the HTTP status code if the backend answered at all
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::FetchFailed { status, .. } => Some(*status),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
