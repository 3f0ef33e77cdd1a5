//! Enumerations and request payload models shared by the gateways.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported cloud deployment targets. Each environment has independent
/// credentials, endpoints and token cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudEnvironment {
    Ospc,
    Flex,
}

impl CloudEnvironment {
    pub const ALL: [CloudEnvironment; 2] = [CloudEnvironment::Ospc, CloudEnvironment::Flex];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudEnvironment::Ospc => "ospc",
            CloudEnvironment::Flex => "flex",
        }
    }
}

impl Default for CloudEnvironment {
    fn default() -> Self {
        CloudEnvironment::Ospc
    }
}

impl fmt::Display for CloudEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic datacenter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Dfw,
    Ord,
    Iad,
    Lon,
    Syd,
    Hkg,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Dfw,
        Region::Ord,
        Region::Iad,
        Region::Lon,
        Region::Syd,
        Region::Hkg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Dfw => "dfw",
            Region::Ord => "ord",
            Region::Iad => "iad",
            Region::Lon => "lon",
            Region::Syd => "syd",
            Region::Hkg => "hkg",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------
// Servers
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCreate {
    pub name: String,
    /// Friendly OS image name; resolved to an image UUID before forwarding.
    #[serde(rename = "imageRef")]
    pub image_ref: String,
    /// Friendly flavor name; resolved to a flavor id before forwarding.
    #[serde(rename = "flavorRef")]
    pub flavor_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<HashMap<String, Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerCreateList {
    pub servers: Vec<ServerCreate>,
}

/// Body of the rebuild-with-keypair action.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyPairAssociation {
    pub key_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeAttachmentCreate {
    #[serde(rename = "volumeId")]
    pub volume_id: String,
    /// None lets the compute API pick the device path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

// ---------------------------------------------------------------------
// Block storage
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeCreate {
    /// Size in GiB.
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
    /// SATA or SSD.
    #[serde(default = "default_volume_type", skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_volid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    /// Set for bootable volumes.
    #[serde(rename = "imageRef", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

fn default_volume_type() -> Option<String> {
    Some("SATA".to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeCreateList {
    pub volumes: Vec<VolumeCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
}

// ---------------------------------------------------------------------
// Networking
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkCreate {
    pub name: String,
    #[serde(default = "default_true")]
    pub admin_state_up: bool,
    #[serde(default)]
    pub shared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkCreateList {
    pub networks: Vec<NetworkCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetCreate {
    pub network_id: String,
    pub cidr: String,
    #[serde(default = "default_ip_version")]
    pub ip_version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub enable_dhcp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_pools: Option<Vec<HashMap<String, String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_nameservers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubnetCreateList {
    pub subnets: Vec<SubnetCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dhcp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_nameservers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortCreate {
    pub network_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ips: Option<Vec<HashMap<String, String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortCreateList {
    pub ports: Vec<PortCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ips: Option<Vec<HashMap<String, String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityGroupCreate {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityGroupCreateList {
    pub security_groups: Vec<SecurityGroupCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityGroupRuleCreate {
    pub security_group_id: String,
    pub direction: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_min: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_max: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_group_id: Option<String>,
    /// IPv4 or IPv6.
    #[serde(default = "default_ethertype")]
    pub ethertype: String,
}

fn default_ethertype() -> String {
    "IPv4".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityGroupRuleCreateList {
    pub security_group_rules: Vec<SecurityGroupRuleCreate>,
}

// ---------------------------------------------------------------------
// Key pairs
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPairCreate {
    /// Key pair name, unique per account.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPairImport {
    pub name: String,
    /// SSH public key content.
    pub public_key: String,
}

fn default_true() -> bool {
    true
}

fn default_ip_version() -> u8 {
    4
}
