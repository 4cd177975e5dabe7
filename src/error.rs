//! Error types for the LocationIQ provider and response normalization.

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the provider and the response parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or rejected API key
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// Payload could not be used (unparsable XML, wrong root element, bad HTTP status)
    #[error("Invalid server response: {message}")]
    InvalidServerResponse { message: String },

    /// The provider rejected the request because the key ran out of quota
    #[error("Quota exceeded for the configured API key")]
    QuotaExceeded,

    /// Autocomplete body was not valid JSON
    #[error("Malformed JSON response: {source}")]
    MalformedJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Invalid URL: {source}")]
    InvalidUrl {
        #[from]
        source: url::ParseError,
    },
}

impl Error {
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn invalid_server_response(message: impl Into<String>) -> Self {
        Self::InvalidServerResponse {
            message: message.into(),
        }
    }
}

/// Reasons a canonical address cannot be built from the accumulated fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("record has no usable coordinates")]
    MissingCoordinates,

    /// Admin levels are numbered from 1
    #[error("admin level {0} is out of range")]
    InvalidAdminLevel(u8),
}
