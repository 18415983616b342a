//! vManage REST API Client
//!
//! A blocking Rust client for the vManage SD-WAN management API.
//! Logs in with the form-based session check, then exposes the device
//! inventory, running configuration and device map endpoints.
//!
//! # Example
//!
//! ```no_run
//! use vmanage_client::{VManageClient, VManageConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client; this logs in immediately
//! let config = VManageConfig::new("admin", "secret", "10.0.0.1");
//! let client = VManageClient::connect(config)?;
//!
//! // List vEdge routers
//! let response = client.get_devices("vedges")?;
//! println!("{} {}", response.status, response.body);
//!
//! // Fail on anything but 2xx
//! let running = client.get_running_config("10.1.1.1", false)?.error_for_status()?;
//! println!("{}", running.body);
//! # Ok(())
//! # }
//! ```
//!
//! Responses are handed back unparsed as [`ApiResponse`]. HTTP error
//! statuses are not errors unless the caller asks for it with
//! [`ApiResponse::error_for_status`].

pub mod client;
pub mod common;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;


pub use client::{default_headers, VManageClient};
pub use common::endpoint::DeviceType;
pub use common::{
    ApiRequest, ApiResponse, HttpClient, HttpMethod, RequestBody, Transport, TransportSettings,
};
pub use config::{VManageConfig, DEFAULT_PORT};
pub use error::{status_reason, VManageError};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
