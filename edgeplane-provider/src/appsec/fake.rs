//! Scripted `AppSecApi` double

use async_trait::async_trait;

use super::api::*;
use crate::client::ClientError;
use crate::fake::Script;

#[derive(Default)]
pub struct FakeAppSec {
    pub script: Script,
}

impl FakeAppSec {
    /// Expect a configuration lookup reporting `latest_version`, inactive
    pub fn expect_latest_version(&self, config_id: i64, latest_version: i64) {
        self.script.expect(
            "GetConfiguration",
            GetConfigurationRequest { config_id },
            GetConfigurationResponse {
                id: config_id,
                name: "Example".to_string(),
                latest_version,
                ..Default::default()
            },
        );
    }
}

#[async_trait]
impl AppSecApi for FakeAppSec {
    async fn get_configuration(&self, req: GetConfigurationRequest) -> Result<GetConfigurationResponse, ClientError> {
        self.script.call("GetConfiguration", &req)
    }

    async fn get_configurations(&self, req: GetConfigurationsRequest) -> Result<GetConfigurationsResponse, ClientError> {
        self.script.call("GetConfigurations", &req)
    }

    async fn create_configuration_version_clone(&self, req: CreateConfigurationVersionCloneRequest) -> Result<CreateConfigurationVersionCloneResponse, ClientError> {
        self.script.call("CreateConfigurationVersionClone", &req)
    }

    async fn get_configuration_versions(&self, req: GetConfigurationVersionsRequest) -> Result<GetConfigurationVersionsResponse, ClientError> {
        self.script.call("GetConfigurationVersions", &req)
    }

    async fn get_selected_hostnames(&self, req: GetSelectedHostnamesRequest) -> Result<SelectedHostnamesResponse, ClientError> {
        self.script.call("GetSelectedHostnames", &req)
    }

    async fn update_selected_hostnames(&self, req: UpdateSelectedHostnamesRequest) -> Result<SelectedHostnamesResponse, ClientError> {
        self.script.call("UpdateSelectedHostnames", &req)
    }

    async fn get_penalty_box(&self, req: GetPenaltyBoxRequest) -> Result<PenaltyBoxResponse, ClientError> {
        self.script.call("GetPenaltyBox", &req)
    }

    async fn update_penalty_box(&self, req: UpdatePenaltyBoxRequest) -> Result<PenaltyBoxResponse, ClientError> {
        self.script.call("UpdatePenaltyBox", &req)
    }

    async fn get_rate_protection(&self, req: GetRateProtectionRequest) -> Result<ProtectionsResponse, ClientError> {
        self.script.call("GetRateProtection", &req)
    }

    async fn update_rate_protection(&self, req: UpdateRateProtectionRequest) -> Result<ProtectionsResponse, ClientError> {
        self.script.call("UpdateRateProtection", &req)
    }

    async fn get_reputation_profile(&self, req: GetReputationProfileRequest) -> Result<ReputationProfileResponse, ClientError> {
        self.script.call("GetReputationProfile", &req)
    }

    async fn create_reputation_profile(&self, req: CreateReputationProfileRequest) -> Result<ReputationProfileResponse, ClientError> {
        self.script.call("CreateReputationProfile", &req)
    }

    async fn update_reputation_profile(&self, req: UpdateReputationProfileRequest) -> Result<ReputationProfileResponse, ClientError> {
        self.script.call("UpdateReputationProfile", &req)
    }

    async fn remove_reputation_profile(&self, req: RemoveReputationProfileRequest) -> Result<(), ClientError> {
        self.script.call("RemoveReputationProfile", &req)
    }

    async fn get_reputation_profile_action(&self, req: GetReputationProfileActionRequest) -> Result<ReputationProfileActionResponse, ClientError> {
        self.script.call("GetReputationProfileAction", &req)
    }

    async fn update_reputation_profile_action(&self, req: UpdateReputationProfileActionRequest) -> Result<ReputationProfileActionResponse, ClientError> {
        self.script.call("UpdateReputationProfileAction", &req)
    }

    async fn get_reputation_analysis(&self, req: GetReputationAnalysisRequest) -> Result<ReputationAnalysisResponse, ClientError> {
        self.script.call("GetReputationAnalysis", &req)
    }

    async fn update_reputation_analysis(&self, req: UpdateReputationAnalysisRequest) -> Result<ReputationAnalysisResponse, ClientError> {
        self.script.call("UpdateReputationAnalysis", &req)
    }

    async fn remove_reputation_analysis(&self, req: RemoveReputationAnalysisRequest) -> Result<ReputationAnalysisResponse, ClientError> {
        self.script.call("RemoveReputationAnalysis", &req)
    }

    async fn get_match_target(&self, req: GetMatchTargetRequest) -> Result<MatchTargetResponse, ClientError> {
        self.script.call("GetMatchTarget", &req)
    }

    async fn create_match_target(&self, req: CreateMatchTargetRequest) -> Result<MatchTargetResponse, ClientError> {
        self.script.call("CreateMatchTarget", &req)
    }

    async fn update_match_target(&self, req: UpdateMatchTargetRequest) -> Result<MatchTargetResponse, ClientError> {
        self.script.call("UpdateMatchTarget", &req)
    }

    async fn remove_match_target(&self, req: RemoveMatchTargetRequest) -> Result<(), ClientError> {
        self.script.call("RemoveMatchTarget", &req)
    }

    async fn get_advanced_settings_pragma(&self, req: GetAdvancedSettingsPragmaRequest) -> Result<serde_json::Value, ClientError> {
        self.script.call("GetAdvancedSettingsPragma", &req)
    }

    async fn update_advanced_settings_pragma(&self, req: UpdateAdvancedSettingsPragmaRequest) -> Result<serde_json::Value, ClientError> {
        self.script.call("UpdateAdvancedSettingsPragma", &req)
    }

    async fn get_eval_rule_condition_exception(&self, req: GetEvalRuleConditionExceptionRequest) -> Result<serde_json::Value, ClientError> {
        self.script.call("GetEvalRuleConditionException", &req)
    }

    async fn update_eval_rule_condition_exception(&self, req: UpdateEvalRuleConditionExceptionRequest) -> Result<serde_json::Value, ClientError> {
        self.script.call("UpdateEvalRuleConditionException", &req)
    }

    async fn remove_eval_rule_condition_exception(&self, req: RemoveEvalRuleConditionExceptionRequest) -> Result<(), ClientError> {
        self.script.call("RemoveEvalRuleConditionException", &req)
    }

    async fn get_eval_protect_host(&self, req: GetEvalProtectHostRequest) -> Result<EvalHostnamesResponse, ClientError> {
        self.script.call("GetEvalProtectHost", &req)
    }

    async fn update_eval_protect_host(&self, req: UpdateEvalProtectHostRequest) -> Result<EvalHostnamesResponse, ClientError> {
        self.script.call("UpdateEvalProtectHost", &req)
    }

    async fn get_siem_settings(&self, req: GetSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError> {
        self.script.call("GetSiemSettings", &req)
    }

    async fn update_siem_settings(&self, req: UpdateSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError> {
        self.script.call("UpdateSiemSettings", &req)
    }

    async fn remove_siem_settings(&self, req: RemoveSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError> {
        self.script.call("RemoveSiemSettings", &req)
    }

    async fn get_waf_mode(&self, req: GetWafModeRequest) -> Result<WafModeResponse, ClientError> {
        self.script.call("GetWAFMode", &req)
    }

    async fn update_rule_upgrade(&self, req: UpdateRuleUpgradeRequest) -> Result<WafModeResponse, ClientError> {
        self.script.call("UpdateRuleUpgrade", &req)
    }

    async fn get_custom_rules(&self, req: GetCustomRulesRequest) -> Result<CustomRulesResponse, ClientError> {
        self.script.call("GetCustomRules", &req)
    }

    async fn get_export_configuration(&self, req: GetExportConfigurationRequest) -> Result<serde_json::Value, ClientError> {
        self.script.call("GetExportConfiguration", &req)
    }

    async fn get_security_policies(&self, req: GetSecurityPoliciesRequest) -> Result<SecurityPoliciesResponse, ClientError> {
        self.script.call("GetSecurityPolicies", &req)
    }

    async fn get_version_notes(&self, req: GetVersionNotesRequest) -> Result<VersionNotesResponse, ClientError> {
        self.script.call("GetVersionNotes", &req)
    }

}
