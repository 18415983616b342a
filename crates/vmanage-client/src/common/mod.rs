//! Common utilities for the vManage API client
//!
//! Requests and responses are described as plain data so the client can be
//! driven by any [`Transport`]. [`HttpClient`] is the reqwest-backed
//! transport used against a real server.

pub mod endpoint;

use crate::config::VManageConfig;
use crate::error::{status_reason, VManageError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// HTTP method of an [`ApiRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of an [`ApiRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

/// An HTTP request described as plain data
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a header value, ignoring name case
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response as returned by vManage, unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header value, ignoring name case
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Meaning of the status code according to the vManage API documentation
    pub fn status_text(&self) -> &'static str {
        status_reason(self.status).unwrap_or("Unexpected status")
    }

    /// Turn a non-success status into an error, passing 2xx responses through
    ///
    /// # Returns
    /// * `Ok(ApiResponse)` - The same response, for any 2xx status
    /// * `Err(VManageError::Authentication)` - 401 or 403
    /// * `Err(VManageError::NotFound)` - 404
    /// * `Err(VManageError::Api)` - Any other status
    pub fn error_for_status(self) -> Result<Self, VManageError> {
        if self.is_success() {
            return Ok(self);
        }

        match self.status {
            401 | 403 => Err(VManageError::Authentication(format!(
                "{} {} - {}",
                self.status,
                self.status_text(),
                self.body
            ))),
            404 => Err(VManageError::NotFound(format!(
                "{} - {}",
                self.status_text(),
                self.body
            ))),
            status => Err(VManageError::Api {
                status,
                reason: self.status_text().to_string(),
                body: self.body,
            }),
        }
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Executes [`ApiRequest`]s against a vManage server
///
/// This trait is the seam used to swap the network out in tests.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, VManageError>;
}

/// Options the reqwest client of an [`HttpClient`] is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    /// Skip certificate verification (the inverse of `verify_tls`)
    pub accept_invalid_certs: bool,
    pub timeout: Option<Duration>,
}

impl TransportSettings {
    pub fn from_config(config: &VManageConfig) -> Self {
        Self {
            accept_invalid_certs: !config.verify_tls,
            timeout: config.timeout(),
        }
    }
}

/// Blocking reqwest transport with a session cookie store
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    settings: TransportSettings,
}

impl HttpClient {
    /// Create a transport honouring the TLS and timeout settings of `config`
    pub fn new(config: &VManageConfig) -> Result<Self, VManageError> {
        let settings = TransportSettings::from_config(config);
        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .timeout(settings.timeout)
            .build()
            .map_err(VManageError::Http)?;

        Ok(Self { client, settings })
    }

    /// Settings the underlying client was built with
    pub fn settings(&self) -> TransportSettings {
        self.settings
    }
}

impl Transport for HttpClient {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, VManageError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            Some(RequestBody::Form(fields)) => builder.form(fields),
            Some(RequestBody::Json(value)) => {
                let payload = serde_json::to_vec(value)?;
                let builder = if request.header("content-type").is_none() {
                    builder.header(CONTENT_TYPE, "application/json")
                } else {
                    builder
                };
                builder.body(payload)
            }
            None => builder,
        };

        let response = builder.send().map_err(VManageError::Http)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().map_err(VManageError::Http)?;

        debug!("{} {} -> {}", request.method, request.url, status);
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
