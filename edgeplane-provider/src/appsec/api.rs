//! Application security API surface
//!
//! One method per upstream endpoint, each taking a request struct and
//! returning a response struct. Path parameters are skipped when a request
//! is serialized as the body.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

// =============================================================================
// Configurations and versions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetConfigurationRequest {
    pub config_id: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigurationResponse {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub latest_version: i64,
    #[serde(default)]
    pub staging_version: Option<i64>,
    #[serde(default)]
    pub production_version: Option<i64>,
}

impl GetConfigurationResponse {
    /// True when `version` is active on either network
    pub fn is_active(&self, version: i64) -> bool {
        self.staging_version == Some(version) || self.production_version == Some(version)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetConfigurationsRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigurationsResponse {
    #[serde(default)]
    pub configurations: Vec<GetConfigurationResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigurationVersionCloneRequest {
    #[serde(skip)]
    pub config_id: i64,
    pub create_from_version: i64,
    pub rule_update: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigurationVersionCloneResponse {
    pub config_id: i64,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetConfigurationVersionsRequest {
    pub config_id: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationVersion {
    pub version: i64,
    #[serde(default)]
    pub version_notes: Option<String>,
    #[serde(default)]
    pub staging: NetworkStatus,
    #[serde(default)]
    pub production: NetworkStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigurationVersionsResponse {
    pub config_id: i64,
    #[serde(default)]
    pub config_name: String,
    pub last_created_version: i64,
    #[serde(default)]
    pub version_list: Vec<ConfigurationVersion>,
}

// =============================================================================
// Selected hostnames
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetSelectedHostnamesRequest {
    pub config_id: i64,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hostname {
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedHostnamesResponse {
    #[serde(default)]
    pub hostname_list: Vec<Hostname>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectedHostnamesRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    pub hostname_list: Vec<Hostname>,
}

// =============================================================================
// Policy protections
// =============================================================================

/// Key shared by per-policy settings
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRequest {
    pub config_id: i64,
    pub version: i64,
    pub policy_id: String,
}

pub type GetPenaltyBoxRequest = PolicyRequest;
pub type GetRateProtectionRequest = PolicyRequest;
pub type GetReputationAnalysisRequest = PolicyRequest;
pub type GetWafModeRequest = PolicyRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyBoxResponse {
    pub penalty_box_protection: bool,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePenaltyBoxRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    #[serde(skip)]
    pub policy_id: String,
    pub penalty_box_protection: bool,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtectionsResponse {
    pub apply_api_constraints: bool,
    pub apply_application_layer_controls: bool,
    pub apply_botman_controls: bool,
    pub apply_network_layer_controls: bool,
    pub apply_rate_controls: bool,
    pub apply_reputation_controls: bool,
    pub apply_slow_post_controls: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRateProtectionRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    #[serde(skip)]
    pub policy_id: String,
    pub apply_rate_controls: bool,
}

// =============================================================================
// Reputation
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetReputationProfileRequest {
    pub config_id: i64,
    pub version: i64,
    pub reputation_profile_id: i64,
}

pub type RemoveReputationProfileRequest = GetReputationProfileRequest;

/// Reputation profile document; fields other than the id are passed through
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReputationProfileResponse {
    pub id: i64,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReputationProfileRequest {
    pub config_id: i64,
    pub version: i64,
    pub json_payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReputationProfileRequest {
    pub config_id: i64,
    pub version: i64,
    pub reputation_profile_id: i64,
    pub json_payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetReputationProfileActionRequest {
    pub config_id: i64,
    pub version: i64,
    pub policy_id: String,
    pub reputation_profile_id: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReputationProfileActionResponse {
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateReputationProfileActionRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    #[serde(skip)]
    pub policy_id: String,
    #[serde(skip)]
    pub reputation_profile_id: i64,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReputationAnalysisResponse {
    #[serde(rename = "forwardToHTTPHeader", default)]
    pub forward_to_http_header: bool,
    #[serde(rename = "forwardSharedIPToHTTPHeaderAndSIEM", default)]
    pub forward_shared_ip_to_http_header_and_siem: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateReputationAnalysisRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    #[serde(skip)]
    pub policy_id: String,
    #[serde(rename = "forwardToHTTPHeader")]
    pub forward_to_http_header: bool,
    #[serde(rename = "forwardSharedIPToHTTPHeaderAndSIEM")]
    pub forward_shared_ip_to_http_header_and_siem: bool,
}

pub type RemoveReputationAnalysisRequest = UpdateReputationAnalysisRequest;

// =============================================================================
// Match targets
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetMatchTargetRequest {
    pub config_id: i64,
    pub version: i64,
    pub target_id: i64,
}

pub type RemoveMatchTargetRequest = GetMatchTargetRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTargetResponse {
    pub target_id: i64,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateMatchTargetRequest {
    pub config_id: i64,
    pub version: i64,
    pub json_payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMatchTargetRequest {
    pub config_id: i64,
    pub version: i64,
    pub target_id: i64,
    pub json_payload: serde_json::Value,
}

// =============================================================================
// Advanced settings
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetAdvancedSettingsPragmaRequest {
    pub config_id: i64,
    pub version: i64,
    /// Configuration-wide setting when unset
    pub policy_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAdvancedSettingsPragmaRequest {
    pub config_id: i64,
    pub version: i64,
    pub policy_id: Option<String>,
    pub json_payload: serde_json::Value,
}

// =============================================================================
// Evaluation rules and hosts
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetEvalRuleConditionExceptionRequest {
    pub config_id: i64,
    pub version: i64,
    pub policy_id: String,
    pub rule_id: i64,
}

pub type RemoveEvalRuleConditionExceptionRequest = GetEvalRuleConditionExceptionRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEvalRuleConditionExceptionRequest {
    pub config_id: i64,
    pub version: i64,
    pub policy_id: String,
    pub rule_id: i64,
    pub json_payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetEvalProtectHostRequest {
    pub config_id: i64,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvalHostnamesResponse {
    #[serde(default)]
    pub hostnames: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateEvalProtectHostRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    pub hostnames: Vec<String>,
}

// =============================================================================
// SIEM settings
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetSiemSettingsRequest {
    pub config_id: i64,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiemSettingsResponse {
    pub enable_for_all_policies: bool,
    pub enable_siem: bool,
    pub enabled_botman_siem_events: bool,
    pub siem_definition_id: i64,
    pub firewall_policy_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiemSettingsRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    pub enable_for_all_policies: bool,
    pub enable_siem: bool,
    pub enabled_botman_siem_events: bool,
    pub siem_definition_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_policy_ids: Option<Vec<String>>,
}

pub type RemoveSiemSettingsRequest = UpdateSiemSettingsRequest;

// =============================================================================
// WAF mode and rule upgrades
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WafModeResponse {
    #[serde(default)]
    pub current: String,
    pub mode: String,
    #[serde(default)]
    pub eval: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRuleUpgradeRequest {
    #[serde(skip)]
    pub config_id: i64,
    #[serde(skip)]
    pub version: i64,
    #[serde(skip)]
    pub policy_id: String,
    pub upgrade: bool,
}

// =============================================================================
// Read-only listings
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GetCustomRulesRequest {
    pub config_id: i64,
    /// Restrict the listing to one rule
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRuleSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRulesResponse {
    #[serde(default)]
    pub custom_rules: Vec<CustomRuleSummary>,
}

/// Key shared by per-version listings
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRequest {
    pub config_id: i64,
    pub version: i64,
}

pub type GetExportConfigurationRequest = VersionRequest;
pub type GetSecurityPoliciesRequest = VersionRequest;
pub type GetVersionNotesRequest = VersionRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPolicy {
    pub policy_id: String,
    pub policy_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPoliciesResponse {
    pub config_id: i64,
    pub version: i64,
    #[serde(default)]
    pub policies: Vec<SecurityPolicy>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VersionNotesResponse {
    #[serde(default)]
    pub notes: String,
}

/// Application security configuration API
#[async_trait]
pub trait AppSecApi: Send + Sync {
    async fn get_configuration(&self, req: GetConfigurationRequest) -> Result<GetConfigurationResponse, ClientError>;
    async fn get_configurations(&self, req: GetConfigurationsRequest) -> Result<GetConfigurationsResponse, ClientError>;
    async fn create_configuration_version_clone(
        &self,
        req: CreateConfigurationVersionCloneRequest,
    ) -> Result<CreateConfigurationVersionCloneResponse, ClientError>;
    async fn get_configuration_versions(
        &self,
        req: GetConfigurationVersionsRequest,
    ) -> Result<GetConfigurationVersionsResponse, ClientError>;

    async fn get_selected_hostnames(&self, req: GetSelectedHostnamesRequest) -> Result<SelectedHostnamesResponse, ClientError>;
    async fn update_selected_hostnames(
        &self,
        req: UpdateSelectedHostnamesRequest,
    ) -> Result<SelectedHostnamesResponse, ClientError>;

    async fn get_penalty_box(&self, req: GetPenaltyBoxRequest) -> Result<PenaltyBoxResponse, ClientError>;
    async fn update_penalty_box(&self, req: UpdatePenaltyBoxRequest) -> Result<PenaltyBoxResponse, ClientError>;

    async fn get_rate_protection(&self, req: GetRateProtectionRequest) -> Result<ProtectionsResponse, ClientError>;
    async fn update_rate_protection(&self, req: UpdateRateProtectionRequest) -> Result<ProtectionsResponse, ClientError>;

    async fn get_reputation_profile(&self, req: GetReputationProfileRequest) -> Result<ReputationProfileResponse, ClientError>;
    async fn create_reputation_profile(
        &self,
        req: CreateReputationProfileRequest,
    ) -> Result<ReputationProfileResponse, ClientError>;
    async fn update_reputation_profile(
        &self,
        req: UpdateReputationProfileRequest,
    ) -> Result<ReputationProfileResponse, ClientError>;
    async fn remove_reputation_profile(&self, req: RemoveReputationProfileRequest) -> Result<(), ClientError>;

    async fn get_reputation_profile_action(
        &self,
        req: GetReputationProfileActionRequest,
    ) -> Result<ReputationProfileActionResponse, ClientError>;
    async fn update_reputation_profile_action(
        &self,
        req: UpdateReputationProfileActionRequest,
    ) -> Result<ReputationProfileActionResponse, ClientError>;

    async fn get_reputation_analysis(&self, req: GetReputationAnalysisRequest) -> Result<ReputationAnalysisResponse, ClientError>;
    async fn update_reputation_analysis(
        &self,
        req: UpdateReputationAnalysisRequest,
    ) -> Result<ReputationAnalysisResponse, ClientError>;
    async fn remove_reputation_analysis(
        &self,
        req: RemoveReputationAnalysisRequest,
    ) -> Result<ReputationAnalysisResponse, ClientError>;

    async fn get_match_target(&self, req: GetMatchTargetRequest) -> Result<MatchTargetResponse, ClientError>;
    async fn create_match_target(&self, req: CreateMatchTargetRequest) -> Result<MatchTargetResponse, ClientError>;
    async fn update_match_target(&self, req: UpdateMatchTargetRequest) -> Result<MatchTargetResponse, ClientError>;
    async fn remove_match_target(&self, req: RemoveMatchTargetRequest) -> Result<(), ClientError>;

    async fn get_advanced_settings_pragma(
        &self,
        req: GetAdvancedSettingsPragmaRequest,
    ) -> Result<serde_json::Value, ClientError>;
    async fn update_advanced_settings_pragma(
        &self,
        req: UpdateAdvancedSettingsPragmaRequest,
    ) -> Result<serde_json::Value, ClientError>;

    async fn get_eval_rule_condition_exception(
        &self,
        req: GetEvalRuleConditionExceptionRequest,
    ) -> Result<serde_json::Value, ClientError>;
    async fn update_eval_rule_condition_exception(
        &self,
        req: UpdateEvalRuleConditionExceptionRequest,
    ) -> Result<serde_json::Value, ClientError>;
    async fn remove_eval_rule_condition_exception(
        &self,
        req: RemoveEvalRuleConditionExceptionRequest,
    ) -> Result<(), ClientError>;

    async fn get_eval_protect_host(&self, req: GetEvalProtectHostRequest) -> Result<EvalHostnamesResponse, ClientError>;
    async fn update_eval_protect_host(&self, req: UpdateEvalProtectHostRequest) -> Result<EvalHostnamesResponse, ClientError>;

    async fn get_siem_settings(&self, req: GetSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError>;
    async fn update_siem_settings(&self, req: UpdateSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError>;
    async fn remove_siem_settings(&self, req: RemoveSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError>;

    async fn get_waf_mode(&self, req: GetWafModeRequest) -> Result<WafModeResponse, ClientError>;
    async fn update_rule_upgrade(&self, req: UpdateRuleUpgradeRequest) -> Result<WafModeResponse, ClientError>;

    async fn get_custom_rules(&self, req: GetCustomRulesRequest) -> Result<CustomRulesResponse, ClientError>;
    async fn get_export_configuration(&self, req: GetExportConfigurationRequest) -> Result<serde_json::Value, ClientError>;
    async fn get_security_policies(&self, req: GetSecurityPoliciesRequest) -> Result<SecurityPoliciesResponse, ClientError>;
    async fn get_version_notes(&self, req: GetVersionNotesRequest) -> Result<VersionNotesResponse, ClientError>;
}
