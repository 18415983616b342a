//! vManage API client
//!
//! Logs in once with a form post against the session check endpoint, then
//! issues requests under `https://{host}:{port}/dataservice` reusing the
//! session cookie.

use crate::common::endpoint::{self, DeviceType};
use crate::common::{ApiRequest, ApiResponse, HttpClient, HttpMethod, RequestBody, Transport};
use crate::config::VManageConfig;
use crate::error::VManageError;
use tracing::{debug, info, warn};

/// Headers sent with every request unless the caller supplies their own
pub fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Connection".to_string(), "keep-alive".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

fn form_headers() -> Vec<(String, String)> {
    vec![(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    )]
}

/// vManage API client
///
/// Every call blocks until the server answers. The client is not meant to be
/// shared between threads issuing requests concurrently; give each worker its
/// own instance.
#[derive(Debug)]
pub struct VManageClient<T: Transport = HttpClient> {
    transport: T,
    config: VManageConfig,
    base_url: String,
    login_response: ApiResponse,
}

impl VManageClient<HttpClient> {
    /// Create a client over HTTPS and log in
    ///
    /// Must not be called from inside an async runtime.
    ///
    /// # Arguments
    /// * `config` - Server address and credentials
    ///
    /// # Returns
    /// * `Ok(VManageClient)` - Client holding the session, even if vManage rejected the
    ///   credentials
    /// * `Err(VManageError)` - If the config is invalid or the server could not be reached
    pub fn connect(config: VManageConfig) -> Result<Self, VManageError> {
        let transport = HttpClient::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> VManageClient<T> {
    /// Create a client over an arbitrary transport and log in
    ///
    /// The login status is stored, not checked: a rejected login still
    /// yields a client, and later calls get whatever vManage returns to an
    /// unauthenticated session. Inspect [`Self::login_response`] to tell.
    pub fn with_transport(config: VManageConfig, transport: T) -> Result<Self, VManageError> {
        config.validate()?;
        let base_url = config.base_url();

        info!("Logging in to vManage at {} as {}", base_url, config.username);
        let login_url = format!("{}{}", base_url, endpoint::LOGIN);
        let request = ApiRequest::new(HttpMethod::Post, login_url)
            .with_headers(form_headers())
            .with_body(RequestBody::Form(vec![
                ("j_username".to_string(), config.username.clone()),
                ("j_password".to_string(), config.password.clone()),
            ]));
        let login_response = transport.execute(&request)?;
        debug!("Login returned {}", login_response.status);

        Ok(Self {
            transport,
            config,
            base_url,
            login_response,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &VManageConfig {
        &self.config
    }

    /// Response of the login request made at construction
    pub fn login_response(&self) -> &ApiResponse {
        &self.login_response
    }

    /// Transport the client sends through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: ApiRequest) -> Result<ApiResponse, VManageError> {
        self.transport.execute(&request)
    }

    /// GET `path` with the default headers
    pub fn get(&self, path: &str) -> Result<ApiResponse, VManageError> {
        self.get_with_headers(path, default_headers())
    }

    /// GET `path` with `headers` in place of the defaults
    pub fn get_with_headers(
        &self,
        path: &str,
        headers: Vec<(String, String)>,
    ) -> Result<ApiResponse, VManageError> {
        self.send(ApiRequest::new(HttpMethod::Get, self.url(path)).with_headers(headers))
    }

    /// POST form-encoded `fields` to `path`
    pub fn post_form(
        &self,
        path: &str,
        headers: Vec<(String, String)>,
        fields: &[(&str, &str)],
    ) -> Result<ApiResponse, VManageError> {
        let fields = fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.send(
            ApiRequest::new(HttpMethod::Post, self.url(path))
                .with_headers(headers)
                .with_body(RequestBody::Form(fields)),
        )
    }

    /// POST a JSON body to `path` with the default headers
    pub fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, VManageError> {
        self.send_json(HttpMethod::Post, path, body)
    }

    /// PUT a JSON body to `path` with the default headers
    pub fn put(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse, VManageError> {
        self.send_json(HttpMethod::Put, path, body)
    }

    /// DELETE `path` with the default headers
    pub fn delete(&self, path: &str) -> Result<ApiResponse, VManageError> {
        self.send(
            ApiRequest::new(HttpMethod::Delete, self.url(path)).with_headers(default_headers()),
        )
    }

    fn send_json(
        &self,
        method: HttpMethod,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, VManageError> {
        self.send(
            ApiRequest::new(method, self.url(path))
                .with_headers(default_headers())
                .with_body(RequestBody::Json(body.clone())),
        )
    }

    /// Get the device inventory of one category
    ///
    /// # Arguments
    /// * `device_type` - `"vedges"` or `"controllers"`
    ///
    /// # Returns
    /// * `Ok(ApiResponse)` - Raw response of `/system/device/{device_type}`
    /// * `Err(VManageError::InvalidArgument)` - For any other device type, without contacting
    ///   the server
    pub fn get_devices(&self, device_type: &str) -> Result<ApiResponse, VManageError> {
        let device_type: DeviceType = device_type.parse()?;
        debug!("Fetching {} from vManage", device_type);
        self.get(&endpoint::devices(device_type))
    }

    /// Get the running configuration of a device
    ///
    /// `xml` is accepted for compatibility but vManage is queried the same
    /// way either way.
    pub fn get_running_config(
        &self,
        device_id: &str,
        xml: bool,
    ) -> Result<ApiResponse, VManageError> {
        if xml {
            warn!(
                "XML output requested for {} but is not supported; using the default format",
                device_id
            );
        }
        debug!("Fetching running config of device {}", device_id);
        self.get(&endpoint::running_config(device_id))
    }

    /// Get geo location data of all devices
    pub fn get_device_maps(&self) -> Result<ApiResponse, VManageError> {
        self.get(endpoint::DEVICE_MAPS)
    }
}
