// crates/reqres-contract/src/request.rs
// ============================================================================
// Module: Request Builder
// Description: Configured request context that validates every response.
// Purpose: Perform one HTTP round trip per call and gate the body on a contract.
// Dependencies: reqwest, serde, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`configure`] pairs an explicit [`RequestConfig`] with a
//! [`ResponseContractSpec`] and returns a [`RequestContext`]. There is no
//! global installed specification: each scenario owns its context.
//!
//! Each [`RequestContext::send`] performs exactly one round trip. No retries
//! are attempted; the only timeout is the client timeout from the config.
//! Every round trip, including failed ones, is appended to the context
//! transcript.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing::info;
use tracing::warn;
use url::Url;

use crate::contract::ResponseContractSpec;
use crate::contract::body_preview;
use crate::error::ContractError;
use crate::response::ContractResponse;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Client timeout applied when the config does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum response body size accepted by the request context.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Header carrying the reqres API key.
pub const API_KEY_HEADER: &str = "x-api-key";

// ============================================================================
// SECTION: Config
// ============================================================================

/// Explicit configuration passed to [`configure`].
///
/// # Invariants
/// - `base_url` path always ends with `/` so relative paths resolve beneath it.
#[derive(Clone)]
pub struct RequestConfig {
    /// Normalized service base URL.
    base_url: Url,
    /// Client timeout.
    timeout: Duration,
    /// Optional API key sent as [`API_KEY_HEADER`].
    api_key: Option<String>,
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RequestConfig {
    /// Parses and normalizes a base URL.
    ///
    /// `https://reqres.in` and `https://reqres.in/` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Config`] when the URL is invalid or cannot be
    /// a base.
    pub fn new(base_url: &str) -> Result<Self, ContractError> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|err| ContractError::Config(format!("invalid base url `{base_url}`: {err}")))?;
        if url.cannot_be_a_base() {
            return Err(ContractError::Config(format!("base url `{base_url}` cannot be a base")));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self {
            base_url: url,
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
        })
    }

    /// Overrides the client timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches an API key header value.
    #[must_use]
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the client timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves a path beneath the base URL; a leading `/` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Config`] when the joined URL is invalid.
    pub fn resolve(&self, path: &str) -> Result<Url, ContractError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ContractError::Config(format!("invalid request path `{path}`: {err}")))
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded round trip.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Resolved URL including query.
    pub url: String,
    /// Observed status; `None` when transport failed.
    pub status: Option<u16>,
    /// Request body (`null` when absent).
    pub request: Value,
    /// Response body as JSON, or as a string when not JSON.
    pub response: Value,
    /// Failure message, if the round trip failed.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Configured request context for one scenario.
///
/// # Invariants
/// - The contract is fixed for the lifetime of the context.
#[derive(Clone)]
pub struct RequestContext {
    /// Reqwest client instance.
    client: Client,
    /// Request configuration.
    config: RequestConfig,
    /// Contract checked on every response.
    contract: ResponseContractSpec,
    /// Shared transcript of round trips.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

/// Builds a request context for one scenario.
///
/// # Errors
///
/// Returns [`ContractError::Config`] when the HTTP client cannot be built.
pub fn configure(
    config: &RequestConfig,
    contract: ResponseContractSpec,
) -> Result<RequestContext, ContractError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .redirect(Policy::none())
        .build()
        .map_err(|err| ContractError::Config(format!("failed to build http client: {err}")))?;
    Ok(RequestContext {
        client,
        config: config.clone(),
        contract,
        transcript: Arc::new(Mutex::new(Vec::new())),
    })
}

impl RequestContext {
    /// Returns the installed contract.
    #[must_use]
    pub const fn contract(&self) -> &ResponseContractSpec {
        &self.contract
    }

    /// Returns the request configuration.
    #[must_use]
    pub const fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Sends `GET path` with query pairs.
    ///
    /// # Errors
    ///
    /// See [`RequestContext::send`].
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ContractResponse, ContractError> {
        self.send(Method::GET, path, query, None).await
    }

    /// Sends `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestContext::send`].
    pub async fn post_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ContractResponse, ContractError> {
        let body = encode_body(body)?;
        self.send(Method::POST, path, &[], Some(&body)).await
    }

    /// Sends `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestContext::send`].
    pub async fn put_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ContractResponse, ContractError> {
        let body = encode_body(body)?;
        self.send(Method::PUT, path, &[], Some(&body)).await
    }

    /// Sends `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`RequestContext::send`].
    pub async fn delete(&self, path: &str) -> Result<ContractResponse, ContractError> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Performs one round trip and checks the response against the contract.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Config`] for invalid paths or headers,
    /// [`ContractError::Transport`] for network failures or oversized bodies,
    /// and [`ContractError::ContractViolation`] or
    /// [`ContractError::ShapeViolation`] when the response breaks the contract.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<ContractResponse, ContractError> {
        let url = self.config.resolve(path)?;
        let mut builder = self.client.request(method.clone(), url).headers(self.headers()?);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder
            .build()
            .map_err(|err| ContractError::Config(format!("failed to build request: {err}")))?;
        let url = request.url().to_string();
        let request_body = body.cloned().unwrap_or(Value::Null);
        debug!(method = %method, url = %url, "sending request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let message = err.to_string();
                warn!(method = %method, url = %url, error = %message, "transport failure");
                self.record(&method, &url, None, request_body, Value::Null, Some(message.clone()));
                return Err(ContractError::Transport(format!("{method} {url}: {message}")));
            }
        };
        let status = response.status();
        let bytes = match read_response_body_with_limit(response, MAX_RESPONSE_BYTES).await {
            Ok(bytes) => bytes,
            Err(message) => {
                warn!(
                    method = %method,
                    url = %url,
                    status = status.as_u16(),
                    error = %message,
                    "response body read failed"
                );
                self.record(
                    &method,
                    &url,
                    Some(status),
                    request_body,
                    Value::Null,
                    Some(message.clone()),
                );
                return Err(ContractError::Transport(format!("{method} {url}: {message}")));
            }
        };
        info!(method = %method, url = %url, status = status.as_u16(), bytes = bytes.len(), "received response");

        let outcome = self.contract.validate(method.as_str(), &url, status, &bytes);
        let error = outcome.as_ref().err().map(ToString::to_string);
        if let Some(message) = &error {
            warn!(method = %method, url = %url, error = %message, "contract check failed");
        }
        self.record(&method, &url, Some(status), request_body, response_value(&bytes), error);
        let parsed = outcome?;
        Ok(ContractResponse::new(url, status, parsed))
    }

    /// Builds request headers.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Config`] when the API key is not a valid header
    /// value.
    fn headers(&self) -> Result<HeaderMap, ContractError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.config.api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|_| ContractError::Config("invalid api key header".to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }
        Ok(headers)
    }

    /// Appends a transcript entry.
    fn record(
        &self,
        method: &Method,
        url: &str,
        status: Option<StatusCode>,
        request: Value,
        response: Value,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.to_string(),
            url: url.to_string(),
            status: status.map(|status| status.as_u16()),
            request,
            response,
            error,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes a request record into a JSON body.
fn encode_body<T: Serialize>(body: &T) -> Result<Value, ContractError> {
    serde_json::to_value(body)
        .map_err(|err| ContractError::Config(format!("request body serialization failed: {err}")))
}

/// Renders a response body for the transcript.
fn response_value(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(body_preview(bytes)))
}

/// Reads a response body while enforcing a hard byte limit.
async fn read_response_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, String> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|err| err.to_string())? {
        let next_total = body.len().saturating_add(chunk.len());
        if next_total > limit {
            return Err(format!("response body exceeds size limit ({next_total} > {limit})"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
