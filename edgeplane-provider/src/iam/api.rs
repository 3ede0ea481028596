//! Identity and access management API surface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// User profile fields sent on create and basic-info updates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBasicInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub tfa_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub ui_identity_id: String,
    #[serde(default)]
    pub ui_user_name: String,
    #[serde(flatten)]
    pub basic: UserBasicInfo,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub last_login_date: Option<String>,
    #[serde(default)]
    pub password_expiry_date: Option<String>,
    #[serde(default)]
    pub tfa_configured: bool,
    #[serde(default)]
    pub email_update_pending: bool,
    /// Raw auth grant objects
    #[serde(default)]
    pub auth_grants: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub basic: UserBasicInfo,
    pub auth_grants: Vec<serde_json::Value>,
    #[serde(skip)]
    pub send_email: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetUserRequest {
    pub identity_id: String,
    pub auth_grants: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserInfoRequest {
    pub identity_id: String,
    pub basic: UserBasicInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserAuthGrantsRequest {
    pub identity_id: String,
    pub auth_grants: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveUserRequest {
    pub identity_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportedCountriesRequest;

/// Identity and access management API
#[async_trait]
pub trait IamApi: Send + Sync {
    async fn create_user(&self, req: CreateUserRequest) -> Result<User, ClientError>;
    async fn get_user(&self, req: GetUserRequest) -> Result<User, ClientError>;
    async fn update_user_info(&self, req: UpdateUserInfoRequest) -> Result<UserBasicInfo, ClientError>;
    async fn update_user_auth_grants(
        &self,
        req: UpdateUserAuthGrantsRequest,
    ) -> Result<Vec<serde_json::Value>, ClientError>;
    async fn remove_user(&self, req: RemoveUserRequest) -> Result<(), ClientError>;
    async fn supported_countries(&self, req: SupportedCountriesRequest) -> Result<Vec<String>, ClientError>;
}
