use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_path_to_error::{Path, Segment};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{AlphaVantageError, Result};
use crate::models::{
    CompanyOverview, Config, OptionalDate, OptionalNumber, TokenError, DEFAULT_BASE_URL,
};

/// Query parameter carrying the credential. Callers must not set it themselves;
/// if they do, the client's key wins.
pub const API_KEY_PARAM: &str = "apikey";

/// Query parameter selecting the remote operation.
pub const FUNCTION_PARAM: &str = "function";

pub const OVERVIEW_FUNCTION: &str = "OVERVIEW";

const USER_AGENT: &str = concat!("rust-alphavantage/", env!("CARGO_PKG_VERSION"));

/// Per-call query parameters, merged with the API key before sending.
pub type QueryParameters = HashMap<String, String>;

/// A decoded record plus the response metadata it arrived with.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Alternate payload the provider sends, with HTTP 200, instead of the record.
#[derive(Debug, Default, PartialEq, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

impl ErrorEnvelope {
    /// Decodes the envelope fields of `body`, which must be a JSON object.
    fn parse(body: &[u8]) -> Result<Self> {
        let malformed = |source: serde_json::Error| AlphaVantageError::MalformedResponse {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        };
        // a derived struct also accepts arrays, so require an object first
        let object: Map<String, Value> = serde_json::from_slice(body).map_err(malformed)?;
        let envelope = Self::deserialize(&Value::Object(object)).map_err(malformed)?;

        Ok(Self {
            error_message: envelope.error_message.filter(|s| !s.is_empty()),
            information: envelope.information.filter(|s| !s.is_empty()),
        })
    }
}

/// Alpha Vantage API client
///
/// Cheap to clone; clones share the connection pool. The base URL and key are
/// fixed at construction and never mutated, so one client can serve concurrent
/// calls from many tasks.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Default)]
pub struct AlphaVantageClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl AlphaVantageClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Ignored when a custom transport is supplied through [`Self::http_client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<AlphaVantageClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AlphaVantageError::Configuration("API key is not set".to_string()))?;

        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| {
            AlphaVantageError::Configuration(format!("invalid base URL {:?}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AlphaVantageError::Configuration(format!(
                "base URL {} cannot carry a query",
                base_url
            )));
        }

        let client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().user_agent(USER_AGENT);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    AlphaVantageError::Configuration(format!("failed to create HTTP client: {}", e))
                })?
            }
        };

        Ok(AlphaVantageClient {
            client,
            base_url,
            api_key,
        })
    }
}

impl AlphaVantageClient {
    pub fn builder() -> AlphaVantageClientBuilder {
        AlphaVantageClientBuilder::default()
    }

    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Self::builder()
            .api_key(config.api_key.clone())
            .base_url(config.base_url.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Client configured from `AV_API_KEY` and friends.
    pub fn from_env() -> Result<Self> {
        Self::new(&Config::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds a GET for `params` against a copy of the base URL.
    ///
    /// Parameters already present on the base URL are kept unless `params`
    /// overrides them; `apikey` is always the client's own key.
    pub fn new_query(&self, params: &QueryParameters) -> Result<Request> {
        let mut url = self.base_url.clone();

        let base: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        if params.contains_key(API_KEY_PARAM) || base.iter().any(|(k, _)| k == API_KEY_PARAM) {
            debug!("Overriding supplied `{}` parameter with the client key", API_KEY_PARAM);
        }

        // base pairs keep their order and repeats; overridden keys are dropped
        let kept = base
            .iter()
            .filter(|(k, _)| k != API_KEY_PARAM && !params.contains_key(k));
        let overrides: BTreeMap<&str, &str> = params
            .iter()
            .filter(|(k, _)| k.as_str() != API_KEY_PARAM)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .extend_pairs(overrides)
            .append_pair(API_KEY_PARAM, &self.api_key);

        self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .build()
            .map_err(|e| {
                AlphaVantageError::Configuration(format!("failed to build request: {}", e))
            })
    }

    /// Sends `request` once and decodes the body into `T`.
    ///
    /// The provider reports logical errors with HTTP 200 and an envelope body,
    /// so the status code is never used to decide success.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<ApiResponse<T>> {
        debug!("GET {}", redacted_url(request.url()));

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("Alpha Vantage request failed: {}", e);
            AlphaVantageError::Transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read Alpha Vantage response body: {}", e);
            AlphaVantageError::Transport(e)
        })?;
        debug!("Alpha Vantage responded {} with {} bytes", status, body.len());

        let data = decode_response(status, &body).map_err(|e| {
            warn!("Alpha Vantage response rejected at {} stage: {}", e.stage(), e);
            e
        })?;

        Ok(ApiResponse {
            data,
            status,
            headers,
        })
    }

    /// [`Self::new_query`] followed by [`Self::execute`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        params: &QueryParameters,
    ) -> Result<ApiResponse<T>> {
        let request = self.new_query(params)?;
        self.execute(request).await
    }

    /// Fetch the company overview for a symbol
    pub async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let params = QueryParameters::from([
            (FUNCTION_PARAM.to_string(), OVERVIEW_FUNCTION.to_string()),
            ("symbol".to_string(), symbol.to_string()),
        ]);

        let response = self.get::<CompanyOverview>(&params).await?;
        info!("Fetched company overview for {}", response.data.symbol);
        Ok(response.into_inner())
    }
}

/// Checks `body` for an error envelope, then decodes it into `T`.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    let envelope = ErrorEnvelope::parse(body)?;
    if let Some(message) = envelope.error_message {
        return Err(AlphaVantageError::Api(message));
    }
    if let Some(message) = envelope.information {
        return Err(AlphaVantageError::ApiInfo(message));
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let path = e.path().clone();
        let source = e.into_inner();
        match codec_failure(body, &path, &source) {
            Some(failure) => AlphaVantageError::FieldDecode {
                field: path.to_string(),
                token: failure.token.clone(),
                reason: failure.to_string(),
            },
            None => AlphaVantageError::Schema {
                status,
                path: path.to_string(),
                source,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    })
}

/// The optional-value codec error behind `source`, if that is what failed.
///
/// Re-decodes the string token found at `path` with each codec and keeps the
/// failure whose message `source` reports.
fn codec_failure(body: &[u8], path: &Path, source: &serde_json::Error) -> Option<TokenError> {
    let document: Value = serde_json::from_slice(body).ok()?;
    let token = match value_at(&document, path)? {
        Value::String(text) => text.as_bytes(),
        _ => return None,
    };
    let message = source.to_string();
    [OptionalNumber::decode(token).err(), OptionalDate::decode(token).err()]
        .into_iter()
        .flatten()
        .find(|failure| message.starts_with(&failure.to_string()))
}

/// Node of `document` at `path`.
fn value_at<'a>(document: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut node = document;
    for segment in path.iter() {
        node = match segment {
            Segment::Map { key } => node.get(key.as_str())?,
            Segment::Seq { index } => node.get(*index)?,
            _ => return None,
        };
    }
    Some(node)
}

fn redacted_url(url: &Url) -> String {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .map(|(key, value)| {
            if key == API_KEY_PARAM {
                (key, "***".to_string())
            } else {
                (key, value)
            }
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}
