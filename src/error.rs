use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while building, dispatching or decoding an Alpha Vantage call.
///
/// Every variant maps to exactly one pipeline stage, so a caller can tell a bad
/// credential from a dead network, an unknown symbol or a provider schema change.
#[derive(Debug, Error)]
pub enum AlphaVantageError {
    /// Missing or invalid credential, base endpoint or other client setting.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection refused, timeout, DNS failure or an interrupted body read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON at all.
    #[error("malformed response: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The provider answered with an `"Error Message"` envelope.
    #[error("API error: {0}")]
    Api(String),

    /// The provider answered with an `"Information"` envelope (rate limits, plan notices).
    #[error("API information: {0}")]
    ApiInfo(String),

    /// Valid JSON that does not fit the requested record shape.
    #[error("schema error (HTTP {status}) at `{path}`: {source}; body: {body}")]
    Schema {
        status: StatusCode,
        path: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// A single optional field held a token that is neither a value nor the `None` sentinel.
    #[error("cannot decode field `{field}` from token {token:?}: {reason}")]
    FieldDecode {
        field: String,
        token: String,
        reason: String,
    },

    /// Failed to encode a record for the dump surface.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlphaVantageError {
    /// Short name of the stage that failed, for log lines and CLI output.
    pub fn stage(&self) -> &'static str {
        match self {
            AlphaVantageError::Configuration(_) => "configuration",
            AlphaVantageError::Transport(_) => "transport",
            AlphaVantageError::MalformedResponse { .. } => "malformed-response",
            AlphaVantageError::Api(_) => "api",
            AlphaVantageError::ApiInfo(_) => "api-info",
            AlphaVantageError::Schema { .. } => "schema",
            AlphaVantageError::FieldDecode { .. } => "field-decode",
            AlphaVantageError::Encode(_) => "encode",
            AlphaVantageError::Io(_) => "io",
        }
    }

    /// True when the provider refused the call with a usage or rate-limit notice.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AlphaVantageError::ApiInfo(_))
    }
}

pub type Result<T> = std::result::Result<T, AlphaVantageError>;
