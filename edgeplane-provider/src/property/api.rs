//! Property manager API surface (hostnames only)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct GetLatestVersionRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersion {
    pub property_version: i64,
    #[serde(default)]
    pub staging_status: String,
    #[serde(default)]
    pub production_status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLatestVersionResponse {
    pub property_id: String,
    pub version: PropertyVersion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetPropertyVersionHostnamesRequest {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
    pub include_cert_status: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertStatus {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub staging_status: Option<String>,
    #[serde(default)]
    pub production_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyHostname {
    #[serde(default)]
    pub cname_type: String,
    #[serde(default)]
    pub edge_hostname_id: String,
    pub cname_from: String,
    #[serde(default)]
    pub cname_to: String,
    #[serde(default)]
    pub cert_provisioning_type: String,
    #[serde(default)]
    pub cert_status: Option<CertStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertyVersionHostnamesResponse {
    pub property_id: String,
    pub property_version: i64,
    #[serde(default)]
    pub hostnames: Vec<PropertyHostname>,
}

/// Property manager API
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn get_latest_version(&self, req: GetLatestVersionRequest) -> Result<GetLatestVersionResponse, ClientError>;
    async fn get_property_version_hostnames(
        &self,
        req: GetPropertyVersionHostnamesRequest,
    ) -> Result<GetPropertyVersionHostnamesResponse, ClientError>;
}
