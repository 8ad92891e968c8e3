// crates/langflow-mcp/src/client.rs
// ============================================================================
// Module: Langflow API Client
// Description: Async execution of Langflow REST operations.
// Purpose: Own authentication, URL construction, and response decoding.
// Dependencies: async-trait, base64, reqwest, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! [`LangflowApi`] is the seam between tool dispatch and the network. The
//! production implementation, [`HttpLangflowClient`], sends every request with
//! the configured `x-api-key` header and maps non-success statuses to
//! [`ApiError::Status`] with a sanitized body excerpt, so remote error payloads
//! never leak credentials back to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use langflow_mcp_config::LangflowApiConfig;
use reqwest::Client;
use reqwest::Response;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::operation::FileUpload;
use crate::operation::Operation;
use crate::operation::RequestBody;
use crate::operation::RequestPlan;
use crate::operation::ResponseKind;
use crate::sanitize::sanitize_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the Langflow API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path prefix of the Langflow REST API.
const API_PREFIX: &[&str] = &["api", "v1"];

/// Maximum characters of a non-JSON error body kept in a status error.
const MAX_ERROR_TEXT_CHARS: usize = 2048;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Boxed error used as a failure cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Remote call failures.
///
/// # Invariants
/// - Every message starts with the operation context.
/// - `Status` details are rendered from sanitized bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Remote answered with a non-success status.
    #[error("{context}: HTTP {status} - {detail}")]
    Status {
        /// Operation context.
        context: String,
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        detail: String,
    },
    /// Request never produced a response.
    #[error("{context}: Network error - {message}")]
    Network {
        /// Operation context.
        context: String,
        /// Transport message.
        message: String,
        /// Underlying transport error.
        #[source]
        source: Option<BoxError>,
    },
    /// Successful response could not be interpreted.
    #[error("{context}: {message}")]
    Decode {
        /// Operation context.
        context: String,
        /// Decode failure detail.
        message: String,
    },
    /// Response body exceeded the configured ceiling.
    #[error("{context}: response exceeds size limit of {max_bytes} bytes")]
    ResponseTooLarge {
        /// Operation context.
        context: String,
        /// Configured ceiling in bytes.
        max_bytes: usize,
    },
    /// Request could not be assembled.
    #[error("{context}: {message}")]
    Request {
        /// Operation context.
        context: String,
        /// Assembly failure detail.
        message: String,
    },
}

impl ApiError {
    /// Builds a request assembly error.
    pub(crate) fn request(context: &str, message: impl Into<String>) -> Self {
        Self::Request { context: context.to_string(), message: message.into() }
    }

    /// Builds a transport error from a reqwest failure.
    fn network(context: &str, err: reqwest::Error) -> Self {
        Self::Network {
            context: context.to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Builds a status error from a raw response body.
    #[must_use]
    pub fn status(context: &str, status: u16, body: &[u8]) -> Self {
        Self::Status { context: context.to_string(), status, detail: status_detail(status, body) }
    }
}

/// Client construction failures.
#[derive(Debug, Error)]
pub enum ClientInitError {
    /// Base URL is missing or unusable.
    #[error("invalid base url: {0}")]
    BaseUrl(String),
    /// API key is missing or not a valid header value.
    #[error("invalid api key: {0}")]
    ApiKey(String),
    /// HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Build(String),
}

// ============================================================================
// SECTION: API Seam
// ============================================================================

/// Executes Langflow operations.
#[async_trait]
pub trait LangflowApi: Send + Sync {
    /// Runs one operation and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failures and non-success statuses.
    async fn execute(&self, operation: Operation) -> Result<Value, ApiError>;
}

// ============================================================================
// SECTION: HTTP Client
// ============================================================================

/// reqwest-backed Langflow client.
///
/// # Invariants
/// - Every request carries the API key header.
/// - Paths are built from percent-encoded segments below `/api/v1`.
/// - No response body larger than `max_response_bytes` is buffered.
pub struct HttpLangflowClient {
    /// Server root.
    base_url: Url,
    /// HTTP client with default headers and timeouts.
    http: Client,
    /// Response body ceiling in bytes.
    max_response_bytes: usize,
}

impl fmt::Debug for HttpLangflowClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLangflowClient").field("base_url", &self.base_url.as_str()).finish()
    }
}

impl HttpLangflowClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientInitError`] when credentials are missing or the HTTP
    /// client cannot be built.
    pub fn new(config: &LangflowApiConfig) -> Result<Self, ClientInitError> {
        let base_url =
            config.parsed_base_url().map_err(|err| ClientInitError::BaseUrl(err.to_string()))?;
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| ClientInitError::ApiKey("api key is required".to_string()))?;
        let mut key_value = HeaderValue::from_str(api_key.expose())
            .map_err(|_| ClientInitError::ApiKey("api key is not a valid header value".to_string()))?;
        key_value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientInitError::Build(err.to_string()))?;
        Ok(Self { base_url, http, max_response_bytes: config.max_response_bytes })
    }

    /// Returns the server root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves plan segments against the server root.
    fn endpoint(&self, path: &[String], context: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::request(context, "base URL cannot carry a path"))?;
            segments.pop_if_empty().extend(API_PREFIX).extend(path);
        }
        Ok(url)
    }
}

#[async_trait]
impl LangflowApi for HttpLangflowClient {
    async fn execute(&self, operation: Operation) -> Result<Value, ApiError> {
        let RequestPlan { method, path, query, headers, body, response, context } =
            operation.into_plan()?;
        let url = self.endpoint(&path, &context)?;
        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        for (name, value) in headers {
            let mut value = HeaderValue::from_str(value.expose()).map_err(|_| {
                ApiError::request(&context, format!("{name} is not a valid header value"))
            })?;
            value.set_sensitive(true);
            request = request.header(name, value);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(body) => request.json(&body),
            RequestBody::Form(fields) => request.form(&fields),
            RequestBody::Multipart(upload) => request.multipart(multipart_form(upload, &context)?),
        };
        let mut reply = request.send().await.map_err(|err| ApiError::network(&context, err))?;
        let status = reply.status();
        let content_type = reply
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = read_response_limited(&mut reply, self.max_response_bytes, &context).await?;
        if !status.is_success() {
            return Err(ApiError::status(&context, status.as_u16(), &bytes));
        }
        decode_response(&response, content_type.as_deref(), &bytes, &context)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body in chunks, failing once it passes `max_bytes`.
async fn read_response_limited(
    reply: &mut Response,
    max_bytes: usize,
    context: &str,
) -> Result<Vec<u8>, ApiError> {
    let too_large = || ApiError::ResponseTooLarge { context: context.to_string(), max_bytes };
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if reply.content_length().is_some_and(|expected| expected > limit) {
        return Err(too_large());
    }
    let mut body = Vec::new();
    while let Some(chunk) = reply.chunk().await.map_err(|err| ApiError::network(context, err))? {
        if body.len().saturating_add(chunk.len()) > max_bytes {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Builds a single-part multipart form.
fn multipart_form(upload: FileUpload, context: &str) -> Result<Form, ApiError> {
    let FileUpload { file_name, bytes, content_type } = upload;
    let mut part = Part::bytes(bytes).file_name(file_name);
    if let Some(mime) = content_type {
        part = part.mime_str(&mime).map_err(|err| ApiError::request(context, err.to_string()))?;
    }
    Ok(Form::new().part("file", part))
}

/// Renders the detail of a status error.
fn status_detail(status: u16, body: &[u8]) -> String {
    if body.iter().all(u8::is_ascii_whitespace) {
        return format!("Request failed with status code {status}");
    }
    let value = serde_json::from_slice::<Value>(body).map_or_else(
        |_| {
            let text: String =
                String::from_utf8_lossy(body).chars().take(MAX_ERROR_TEXT_CHARS).collect();
            Value::String(text)
        },
        |value| sanitize_value(&value),
    );
    value.to_string()
}

/// Interprets a successful response body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when a component catalog is not JSON.
pub fn decode_response(
    kind: &ResponseKind,
    content_type: Option<&str>,
    body: &[u8],
    context: &str,
) -> Result<Value, ApiError> {
    match kind {
        ResponseKind::Json => Ok(decode_json(body)),
        ResponseKind::Binary { file_name } => Ok(encode_binary(file_name, content_type, body)),
        ResponseKind::JsonOrBinary { file_name } => {
            if content_type.is_some_and(|value| value.contains("json")) {
                Ok(decode_json(body))
            } else {
                Ok(encode_binary(file_name, content_type, body))
            }
        }
        ResponseKind::Components => {
            let catalog = serde_json::from_slice::<Value>(body).map_err(|err| ApiError::Decode {
                context: context.to_string(),
                message: format!("invalid component catalog: {err}"),
            })?;
            Ok(flatten_components(catalog))
        }
    }
}

/// Parses JSON, falling back to text; empty bodies become `null`.
fn decode_json(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Wraps raw bytes for transport in a text envelope.
fn encode_binary(file_name: &str, content_type: Option<&str>, body: &[u8]) -> Value {
    json!({
        "file_name": file_name,
        "content_type": content_type,
        "size": body.len(),
        "content_base64": STANDARD.encode(body),
    })
}

/// Flattens `{category: {name: info}}` into a component list.
#[must_use]
pub fn flatten_components(catalog: Value) -> Value {
    let mut components = Vec::new();
    let Value::Object(categories) = catalog else {
        return Value::Array(components);
    };
    for (category, entries) in categories {
        let Value::Object(entries) = entries else {
            continue;
        };
        for (name, info) in entries {
            let display_name = info
                .get("display_name")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .unwrap_or(name.as_str())
                .to_string();
            let description =
                info.get("description").and_then(Value::as_str).unwrap_or_default().to_string();
            components.push(json!({
                "name": name,
                "display_name": display_name,
                "description": description,
                "type": category,
            }));
        }
    }
    Value::Array(components)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
