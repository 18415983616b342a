//! vManage API endpoint paths
//!
//! All paths are relative to the `/dataservice` base URL.

use crate::error::VManageError;
use std::fmt;
use std::str::FromStr;

/// Session check endpoint used for form login
pub const LOGIN: &str = "/j_security_check";

/// Geo location data of all devices
pub const DEVICE_MAPS: &str = "/group/map/devices";

/// Device category accepted by the inventory endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    #[default]
    VEdges,
    Controllers,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::VEdges => "vedges",
            DeviceType::Controllers => "controllers",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = VManageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vedges" => Ok(DeviceType::VEdges),
            "controllers" => Ok(DeviceType::Controllers),
            other => Err(VManageError::InvalidArgument(format!(
                "Invalid device type: {}",
                other
            ))),
        }
    }
}

/// Inventory of one device category
pub fn devices(device_type: DeviceType) -> String {
    format!("/system/device/{}", device_type)
}

/// Running configuration of a single device
pub fn running_config(device_id: &str) -> String {
    format!("/template/config/running/{}", device_id)
}
