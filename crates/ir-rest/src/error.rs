//! Error types for REST API operations
//!
//! Every failure a call can produce is normalized into [`RestError`]. Each
//! variant carries a human-readable message, maps to an [`ErrorKind`], and
//! exposes a machine-usable [`RestError::tag`] where the exchange or the
//! transport provides one.

use ir_auth::AuthError;

/// Broad classification of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client is missing something it needs (credentials, HTTP client)
    Configuration,
    /// Caller-supplied argument out of contract
    Validation,
    /// Request never completed (connect, timeout, DNS, body read)
    Transport,
    /// Non-2xx HTTP status
    Http,
    /// Exchange reported an error inside a 2xx response
    Application,
    /// 2xx response without a body
    EmptyResponse,
    /// Body could not be interpreted as structured data
    UnparsableResponse,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Client configuration problem, e.g. a private call without credentials
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credentials could not be loaded or were rejected
    #[error("Invalid credentials: {0}")]
    Auth(#[from] AuthError),

    /// Invalid request parameters, detected before anything is sent
    #[error("Invalid parameter: {0}")]
    Validation(String),

    /// The request did not complete
    #[error("{action} failed {description}: {source}")]
    Transport {
        /// Endpoint action name
        action: String,
        /// Method and URL of the request
        description: String,
        /// Short code naming the kind of transport failure
        code: String,
        /// Underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP status outside the 2xx range
    #[error("{action} HTTP status code {status} returned from {description}. Status message: {status_text}")]
    Http {
        /// Endpoint action name
        action: String,
        /// Method and URL of the request
        description: String,
        /// Numeric HTTP status
        status: u16,
        /// Reason phrase for the status
        status_text: String,
    },

    /// Exchange returned a `Message` field in a successful response
    #[error("{message}")]
    Application {
        /// Endpoint action name
        action: String,
        /// Message reported by the exchange
        message: String,
    },

    /// Successful status but no body
    #[error("{action} failed {description}. No data returned.")]
    EmptyResponse {
        /// Endpoint action name
        action: String,
        /// Method and URL of the request
        description: String,
    },

    /// Body was not JSON, or did not match the expected shape
    #[error("{action} could not parse response body from {description}. {detail}")]
    UnparsableResponse {
        /// Endpoint action name
        action: String,
        /// Method and URL of the request
        description: String,
        /// Extracted page text or decode failure
        detail: String,
    },
}

impl RestError {
    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::Auth(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Http,
            Self::Application { .. } => ErrorKind::Application,
            Self::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            Self::UnparsableResponse { .. } => ErrorKind::UnparsableResponse,
        }
    }

    /// Machine-usable name for the error
    ///
    /// The transport error code, the HTTP status number, or the message the
    /// exchange returned. `None` for errors without such a name.
    pub fn tag(&self) -> Option<String> {
        match self {
            Self::Transport { code, .. } => Some(code.clone()),
            Self::Http { status, .. } => Some(status.to_string()),
            Self::Application { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    /// HTTP status for [`RestError::Http`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if repeating the call could succeed
    ///
    /// The client never retries on its own. Note that a private call that is
    /// repeated is signed again with a fresh nonce.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
