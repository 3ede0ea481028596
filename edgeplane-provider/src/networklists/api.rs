//! Network list activation API surface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct GetActivationsRequest {
    pub activation_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    #[serde(skip)]
    pub network_list_id: String,
    /// `ACTIVATE` or `DEACTIVATE`
    #[serde(skip)]
    pub action: String,
    #[serde(skip)]
    pub network: String,
    pub comments: String,
    pub notification_recipients: Vec<String>,
}

pub type CreateActivationsRequest = ActivationRequest;
pub type RemoveActivationsRequest = ActivationRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationsResponse {
    pub activation_id: i64,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub network_list_id: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Network list activation API
#[async_trait]
pub trait NetworkListsApi: Send + Sync {
    async fn get_activations(&self, req: GetActivationsRequest) -> Result<ActivationsResponse, ClientError>;
    async fn create_activations(&self, req: CreateActivationsRequest) -> Result<ActivationsResponse, ClientError>;
    async fn remove_activations(&self, req: RemoveActivationsRequest) -> Result<ActivationsResponse, ClientError>;
}
