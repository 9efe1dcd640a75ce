//! Transport seam between the client and the wire.
//!
//! `HttpTransport` is the production implementation over reqwest; tests
//! drive the client and submission controller through an in-memory fake.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::error::ApiError;
use super::operation::HttpMethod;
use crate::media::StagedFile;

/// Form fields plus binary parts for a multipart submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    /// Flattened text fields, in submission order.
    pub fields: Vec<(String, String)>,
    /// Binary parts as (part name, staged file). Part names follow the
    /// API contract: `mainImage`, `galleryImages` (repeated), `image`.
    pub files: Vec<(String, StagedFile)>,
}

impl MultipartPayload {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self {
            fields,
            files: Vec::new(),
        }
    }

    pub fn attach(&mut self, part_name: impl Into<String>, file: StagedFile) {
        self.files.push((part_name.into(), file));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized with a JSON content type.
    Json(Value),
    /// Sent as multipart/form-data; the transport must not set an explicit
    /// content type so the boundary is generated correctly.
    Multipart(MultipartPayload),
}

/// One normalized request, ready for a transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub token: Option<String>,
    pub body: RequestBody,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and return the decoded JSON body. Non-2xx
    /// statuses, connection failures, and undecodable success bodies all
    /// surface as distinct `ApiError` variants.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// reqwest-backed transport against the configured API base URL.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{} {}", request.method.as_str(), url);

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(payload) => builder.multipart(build_form(payload)?),
        };

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(err.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: extract_error_message(&text, &status),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Pull a human-readable message out of an error response: prefer the
/// JSON `message` field, then the raw body, then the status line.
fn extract_error_message(body: &str, status: &reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn build_form(payload: MultipartPayload) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }
    for (part_name, file) in payload.files {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.content_type)
            .map_err(|err| ApiError::Network(format!("invalid part content type: {err}")))?;
        form = form.part(part_name, part);
    }
    Ok(form)
}
