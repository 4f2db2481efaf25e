pub mod champion;
pub mod decode;
pub mod matches;
pub mod players;
pub mod response;
pub mod status;
pub mod teams;
pub mod telemetry;

pub use self::decode::{DecodeError, DecodeErrorKind};
pub use self::matches::{resolve_match, resolve_matches, Match};
pub use self::players::Player;
pub use self::response::{ApiError, Response};
pub use self::teams::Team;
pub use self::telemetry::{classify, Telemetry};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Gamelocker API using their DC01 datacenter, global shard.
pub const BASE_URL: &str = "https://api.dc01.gamelockerapp.com/shards/global/";
pub const STATUS_URL: &str = "https://api.dc01.gamelockerapp.com/status";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    HttpError(reqwest::Error),
    SerializeError(serde_json::Error),
    Decode(DecodeError),
    Api(Vec<ApiError>),
    InvalidUrl(String),
    InvalidFilter(&'static str),
    InvalidApiKey,
    RateLimitExhausted,
    TooManyRequests,
    NotFound,
    Forbidden,
    Unauthorized,
    BadRequest,
    ServiceError,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::HttpError(e) => Some(e),
            Error::SerializeError(e) => Some(e),
            Error::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Error::HttpError(e) => return e.fmt(f),
            Error::SerializeError(e) => return e.fmt(f),
            Error::Decode(e) => return write!(f, "Unexpected response shape: {}", e),
            Error::Api(errors) => {
                let errors = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                return write!(f, "Battlerite API error: {}", errors);
            }
            Error::InvalidUrl(url) => return write!(f, "Invalid request URL: {}", url),
            Error::InvalidFilter(msg) => msg,
            Error::InvalidApiKey => "API key is not a valid header value",
            Error::RateLimitExhausted => {
                "Request rate limit hit 0, wait for more requests \
                 (https://battlerite-docs.readthedocs.io/en/master/ratelimits/ratelimits.html)"
            }
            Error::TooManyRequests => "Too many requests",
            Error::NotFound => "Resource not found",
            Error::Forbidden => "API key is invalid",
            Error::Unauthorized => "Unauthorized",
            Error::BadRequest => "Bad request to Battlerite API",
            Error::ServiceError => "Battlerite API error",
        };
        write!(f, "{}", msg)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::HttpError(e)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializeError(e)
    }
}
impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

#[derive(Debug)]
pub struct Handle {
    pub web: reqwest::Client,
    pub base_url: String,
    pub status_url: String,
}

impl Handle {
    /// Issues a GET for `url` plus `query` and deserializes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut url = reqwest::Url::parse(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        tracing::debug!("GET {}", url);

        let res = self
            .web
            .execute(reqwest::Request::new(reqwest::Method::GET, url))
            .await?;

        if rate_limit_exhausted(res.headers()) {
            tracing::warn!("Battlerite rate limit exhausted");
            return Err(Error::RateLimitExhausted);
        }
        check_status(res.status())?;

        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches a JSON:API document, turning a data-less `errors` document into [`Error::Api`].
    pub(crate) async fn get_document(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Response> {
        let res: Response = self.get_json(url, query).await?;
        if res.data.is_none() && !res.errors.is_empty() {
            return Err(Error::Api(res.errors));
        }
        Ok(res)
    }

    pub(crate) fn shard_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<()> {
    match status {
        reqwest::StatusCode::NOT_FOUND => Err(Error::NotFound),
        reqwest::StatusCode::TOO_MANY_REQUESTS => Err(Error::TooManyRequests),
        reqwest::StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
        reqwest::StatusCode::FORBIDDEN => Err(Error::Forbidden),
        reqwest::StatusCode::BAD_REQUEST => Err(Error::BadRequest),
        s if s.is_server_error() => Err(Error::ServiceError),
        _ => Ok(()),
    }
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .map(|v| v.as_bytes() == b"0")
        .unwrap_or(false)
}

/// Client for interacting with the Battlerite game data service
pub struct Client {
    handle: Arc<Handle>,
}

impl Client {
    /// Client with the default endpoints and timeout.
    pub fn new(api_key: &str) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    pub fn status(&self) -> status::StatusRequestBuilder {
        status::StatusRequestBuilder::new(self.handle.clone())
    }
    pub fn players(&self) -> players::PlayerClient {
        players::PlayerClient::new(self.handle.clone())
    }
    pub fn teams(&self) -> teams::TeamClient {
        teams::TeamClient::new(self.handle.clone())
    }
    pub fn matches(&self) -> matches::MatchClient {
        matches::MatchClient::new(self.handle.clone())
    }
    /// Telemetry for a match, downloaded from its asset URL (`Match::asset`).
    pub fn telemetry(&self, url: &str) -> telemetry::TelemetryRequestBuilder {
        telemetry::TelemetryRequestBuilder::new(self.handle.clone(), url.to_string())
    }
}

impl Clone for Client {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    status_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: BASE_URL.to_string(),
            status_url: STATUS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
    /// Shard base URL; a trailing `/` is added when missing.
    pub fn base_url(mut self, base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }
    pub fn status_url(mut self, status_url: &str) -> Self {
        self.status_url = status_url.to_string();
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn build(self) -> Result<Client> {
        let mut shared_headers = HeaderMap::new();
        shared_headers.insert(
            AUTHORIZATION,
            self.api_key.parse().map_err(|_| Error::InvalidApiKey)?,
        );
        shared_headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.api+json"),
        );
        let web = reqwest::Client::builder()
            .default_headers(shared_headers)
            .timeout(self.timeout)
            .build()?;
        Ok(Client {
            handle: Arc::new(Handle {
                web,
                base_url: self.base_url,
                status_url: self.status_url,
            }),
        })
    }
}

/// Comma-joins a filter list the way the service expects (`a,b,c`).
pub(crate) fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
