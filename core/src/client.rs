//! The request wrapper every resource client funnels through.
//!
//! # Design
//! `ApiClient` holds the base address and a `Transport`, nothing else. A call
//! is split into three steps so the rules stay testable without a network:
//! `build_request` resolves the URL and headers, the transport executes it,
//! and `normalize_response` turns the raw response into either the parsed
//! body or a `NormalizedError`.
//!
//! Failures travel through `Failure` until the boundary of `fetch_api`: a
//! `Rejected` error already carries the response status and is returned as
//! is, while anything else becomes the generic network error. A body that is
//! not valid JSON, or is JSON `null` on a non-success status, is treated
//! like a transport failure even when a status was received.

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::{FieldErrors, NormalizedError, TransportError, FALLBACK_ERROR_MESSAGE};
use crate::http::{HttpRequest, HttpResponse, RequestOptions, APPLICATION_JSON, CONTENT_TYPE};
use crate::resources::{AttendanceApi, EmployeeApi};
use crate::transport::{ReqwestTransport, Transport};

/// Failure before collapsing into a `NormalizedError`.
#[derive(Debug)]
enum Failure {
    /// The server answered with a non-success status.
    Rejected(NormalizedError),
    /// No usable response.
    Transport,
}

impl From<TransportError> for Failure {
    fn from(_: TransportError) -> Self {
        Failure::Transport
    }
}

impl From<Failure> for NormalizedError {
    fn from(f: Failure) -> Self {
        match f {
            Failure::Rejected(err) => err,
            Failure::Transport => NormalizedError::network(),
        }
    }
}

/// Stateless client for the HRMS API.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn employees(&self) -> EmployeeApi<'_, T> {
        EmployeeApi::new(self)
    }

    pub fn attendance(&self) -> AttendanceApi<'_, T> {
        AttendanceApi::new(self)
    }

    /// Resolve `path` against the base address. `Content-Type:
    /// application/json` always comes first; a caller-supplied content type
    /// is dropped.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        headers.extend(
            options
                .headers
                .into_iter()
                .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE)),
        );
        HttpRequest {
            method: options.method,
            url: format!("{}{path}", self.base_url),
            headers,
            body: options.body,
        }
    }

    /// Perform one request and return the parsed JSON body on a 2xx status.
    pub async fn fetch_api(&self, path: &str, options: RequestOptions) -> Result<Value, NormalizedError> {
        let request = self.build_request(path, options);
        self.exchange(request).await.map_err(NormalizedError::from)
    }

    async fn exchange(&self, request: HttpRequest) -> Result<Value, Failure> {
        let response = self.transport.execute(request).await?;
        interpret(response)
    }
}

/// Apply the normalization rules to a response that has already arrived.
pub fn normalize_response(response: HttpResponse) -> Result<Value, NormalizedError> {
    interpret(response).map_err(NormalizedError::from)
}

fn interpret(response: HttpResponse) -> Result<Value, Failure> {
    let data: Value = serde_json::from_str(&response.body).map_err(|_| Failure::Transport)?;

    if response.is_success() {
        return Ok(data);
    }
    // A `null` error body has no fields to read; treated like no response.
    if data.is_null() {
        return Err(Failure::Transport);
    }

    let message = data
        .get("message")
        .and_then(message_text)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
    let errors = data
        .get("errors")
        .and_then(Value::as_object)
        .map(field_errors)
        .unwrap_or_default();

    Err(Failure::Rejected(NormalizedError::from_status(
        response.status,
        message,
        errors,
    )))
}

/// Text of a `message` field. Empty strings, `0`, `false` and `null` count as
/// absent; other non-string values keep their JSON text.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Flatten an `errors` object into one message per field. The backend sends
/// lists of strings; those are joined with a space.
fn field_errors(map: &Map<String, Value>) -> FieldErrors {
    map.iter()
        .map(|(field, value)| (field.clone(), field_message(value)))
        .collect()
}

fn field_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}
