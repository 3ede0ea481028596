//! `AppSecApi` over the REST client

use async_trait::async_trait;

use super::api::*;
use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone)]
pub struct HttpAppSec {
    client: RestClient,
}

impl HttpAppSec {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn config_path(config_id: i64) -> String {
    format!("/appsec/v1/configs/{}", config_id)
}

fn version_path(config_id: i64, version: i64) -> String {
    format!("{}/versions/{}", config_path(config_id), version)
}

fn policy_path(config_id: i64, version: i64, policy_id: &str) -> String {
    format!("{}/security-policies/{}", version_path(config_id, version), policy_id)
}

fn pragma_path(config_id: i64, version: i64, policy_id: Option<&str>) -> String {
    let base = match policy_id {
        Some(policy_id) => policy_path(config_id, version, policy_id),
        None => version_path(config_id, version),
    };
    format!("{}/advanced-settings/pragma-header", base)
}

#[async_trait]
impl AppSecApi for HttpAppSec {
    async fn get_configuration(&self, req: GetConfigurationRequest) -> Result<GetConfigurationResponse, ClientError> {
        self.client.get(&config_path(req.config_id), &[]).await
    }

    async fn get_configurations(&self, _req: GetConfigurationsRequest) -> Result<GetConfigurationsResponse, ClientError> {
        self.client.get("/appsec/v1/configs", &[]).await
    }

    async fn create_configuration_version_clone(
        &self,
        req: CreateConfigurationVersionCloneRequest,
    ) -> Result<CreateConfigurationVersionCloneResponse, ClientError> {
        let path = format!("{}/versions", config_path(req.config_id));
        self.client.post(&path, &[], &req).await
    }

    async fn get_configuration_versions(
        &self,
        req: GetConfigurationVersionsRequest,
    ) -> Result<GetConfigurationVersionsResponse, ClientError> {
        let path = format!("{}/versions", config_path(req.config_id));
        self.client.get(&path, &[]).await
    }

    async fn get_selected_hostnames(&self, req: GetSelectedHostnamesRequest) -> Result<SelectedHostnamesResponse, ClientError> {
        let path = format!("{}/selected-hostnames", version_path(req.config_id, req.version));
        self.client.get(&path, &[]).await
    }

    async fn update_selected_hostnames(
        &self,
        req: UpdateSelectedHostnamesRequest,
    ) -> Result<SelectedHostnamesResponse, ClientError> {
        let path = format!("{}/selected-hostnames", version_path(req.config_id, req.version));
        self.client.put(&path, &req).await
    }

    async fn get_penalty_box(&self, req: GetPenaltyBoxRequest) -> Result<PenaltyBoxResponse, ClientError> {
        let path = format!("{}/penalty-box", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.get(&path, &[]).await
    }

    async fn update_penalty_box(&self, req: UpdatePenaltyBoxRequest) -> Result<PenaltyBoxResponse, ClientError> {
        let path = format!("{}/penalty-box", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.put(&path, &req).await
    }

    async fn get_rate_protection(&self, req: GetRateProtectionRequest) -> Result<ProtectionsResponse, ClientError> {
        let path = format!("{}/protections", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.get(&path, &[]).await
    }

    async fn update_rate_protection(&self, req: UpdateRateProtectionRequest) -> Result<ProtectionsResponse, ClientError> {
        let path = format!("{}/protections", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.put(&path, &req).await
    }

    async fn get_reputation_profile(&self, req: GetReputationProfileRequest) -> Result<ReputationProfileResponse, ClientError> {
        let path = format!(
            "{}/reputation-profiles/{}",
            version_path(req.config_id, req.version),
            req.reputation_profile_id
        );
        self.client.get(&path, &[]).await
    }

    async fn create_reputation_profile(
        &self,
        req: CreateReputationProfileRequest,
    ) -> Result<ReputationProfileResponse, ClientError> {
        let path = format!("{}/reputation-profiles", version_path(req.config_id, req.version));
        self.client.post(&path, &[], &req.json_payload).await
    }

    async fn update_reputation_profile(
        &self,
        req: UpdateReputationProfileRequest,
    ) -> Result<ReputationProfileResponse, ClientError> {
        let path = format!(
            "{}/reputation-profiles/{}",
            version_path(req.config_id, req.version),
            req.reputation_profile_id
        );
        self.client.put(&path, &req.json_payload).await
    }

    async fn remove_reputation_profile(&self, req: RemoveReputationProfileRequest) -> Result<(), ClientError> {
        let path = format!(
            "{}/reputation-profiles/{}",
            version_path(req.config_id, req.version),
            req.reputation_profile_id
        );
        self.client.delete(&path).await
    }

    async fn get_reputation_profile_action(
        &self,
        req: GetReputationProfileActionRequest,
    ) -> Result<ReputationProfileActionResponse, ClientError> {
        let path = format!(
            "{}/reputation-profiles/{}",
            policy_path(req.config_id, req.version, &req.policy_id),
            req.reputation_profile_id
        );
        self.client.get(&path, &[]).await
    }

    async fn update_reputation_profile_action(
        &self,
        req: UpdateReputationProfileActionRequest,
    ) -> Result<ReputationProfileActionResponse, ClientError> {
        let path = format!(
            "{}/reputation-profiles/{}",
            policy_path(req.config_id, req.version, &req.policy_id),
            req.reputation_profile_id
        );
        self.client.put(&path, &req).await
    }

    async fn get_reputation_analysis(&self, req: GetReputationAnalysisRequest) -> Result<ReputationAnalysisResponse, ClientError> {
        let path = format!("{}/reputation-analysis", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.get(&path, &[]).await
    }

    async fn update_reputation_analysis(
        &self,
        req: UpdateReputationAnalysisRequest,
    ) -> Result<ReputationAnalysisResponse, ClientError> {
        let path = format!("{}/reputation-analysis", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.put(&path, &req).await
    }

    async fn remove_reputation_analysis(
        &self,
        req: RemoveReputationAnalysisRequest,
    ) -> Result<ReputationAnalysisResponse, ClientError> {
        let path = format!("{}/reputation-analysis", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.put(&path, &req).await
    }

    async fn get_match_target(&self, req: GetMatchTargetRequest) -> Result<MatchTargetResponse, ClientError> {
        let path = format!("{}/match-targets/{}", version_path(req.config_id, req.version), req.target_id);
        self.client.get(&path, &[]).await
    }

    async fn create_match_target(&self, req: CreateMatchTargetRequest) -> Result<MatchTargetResponse, ClientError> {
        let path = format!("{}/match-targets", version_path(req.config_id, req.version));
        self.client.post(&path, &[], &req.json_payload).await
    }

    async fn update_match_target(&self, req: UpdateMatchTargetRequest) -> Result<MatchTargetResponse, ClientError> {
        let path = format!("{}/match-targets/{}", version_path(req.config_id, req.version), req.target_id);
        self.client.put(&path, &req.json_payload).await
    }

    async fn remove_match_target(&self, req: RemoveMatchTargetRequest) -> Result<(), ClientError> {
        let path = format!("{}/match-targets/{}", version_path(req.config_id, req.version), req.target_id);
        self.client.delete(&path).await
    }

    async fn get_advanced_settings_pragma(
        &self,
        req: GetAdvancedSettingsPragmaRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let path = pragma_path(req.config_id, req.version, req.policy_id.as_deref());
        self.client.get(&path, &[]).await
    }

    async fn update_advanced_settings_pragma(
        &self,
        req: UpdateAdvancedSettingsPragmaRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let path = pragma_path(req.config_id, req.version, req.policy_id.as_deref());
        self.client.put(&path, &req.json_payload).await
    }

    async fn get_eval_rule_condition_exception(
        &self,
        req: GetEvalRuleConditionExceptionRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!(
            "{}/eval-rules/{}/condition-exception",
            policy_path(req.config_id, req.version, &req.policy_id),
            req.rule_id
        );
        self.client.get(&path, &[]).await
    }

    async fn update_eval_rule_condition_exception(
        &self,
        req: UpdateEvalRuleConditionExceptionRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!(
            "{}/eval-rules/{}/condition-exception",
            policy_path(req.config_id, req.version, &req.policy_id),
            req.rule_id
        );
        self.client.put(&path, &req.json_payload).await
    }

    async fn remove_eval_rule_condition_exception(
        &self,
        req: RemoveEvalRuleConditionExceptionRequest,
    ) -> Result<(), ClientError> {
        let path = format!(
            "{}/eval-rules/{}/condition-exception",
            policy_path(req.config_id, req.version, &req.policy_id),
            req.rule_id
        );
        self.client.delete(&path).await
    }

    async fn get_eval_protect_host(&self, req: GetEvalProtectHostRequest) -> Result<EvalHostnamesResponse, ClientError> {
        let path = format!("{}/protect-eval-hostnames", version_path(req.config_id, req.version));
        self.client.get(&path, &[]).await
    }

    async fn update_eval_protect_host(&self, req: UpdateEvalProtectHostRequest) -> Result<EvalHostnamesResponse, ClientError> {
        let path = format!("{}/protect-eval-hostnames", version_path(req.config_id, req.version));
        self.client.put(&path, &req).await
    }

    async fn get_siem_settings(&self, req: GetSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError> {
        let path = format!("{}/siem", version_path(req.config_id, req.version));
        self.client.get(&path, &[]).await
    }

    async fn update_siem_settings(&self, req: UpdateSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError> {
        let path = format!("{}/siem", version_path(req.config_id, req.version));
        self.client.put(&path, &req).await
    }

    async fn remove_siem_settings(&self, req: RemoveSiemSettingsRequest) -> Result<SiemSettingsResponse, ClientError> {
        let path = format!("{}/siem", version_path(req.config_id, req.version));
        self.client.put(&path, &req).await
    }

    async fn get_waf_mode(&self, req: GetWafModeRequest) -> Result<WafModeResponse, ClientError> {
        let path = format!("{}/mode", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.get(&path, &[]).await
    }

    async fn update_rule_upgrade(&self, req: UpdateRuleUpgradeRequest) -> Result<WafModeResponse, ClientError> {
        let path = format!("{}/rules/upgrade", policy_path(req.config_id, req.version, &req.policy_id));
        self.client.put(&path, &req).await
    }

    async fn get_custom_rules(&self, req: GetCustomRulesRequest) -> Result<CustomRulesResponse, ClientError> {
        let path = format!("{}/custom-rules", config_path(req.config_id));
        let mut response: CustomRulesResponse = self.client.get(&path, &[]).await?;
        if let Some(id) = req.id {
            response.custom_rules.retain(|rule| rule.id == id);
        }
        Ok(response)
    }

    async fn get_export_configuration(&self, req: GetExportConfigurationRequest) -> Result<serde_json::Value, ClientError> {
        let path = format!("/appsec/v1/export/configs/{}/versions/{}", req.config_id, req.version);
        self.client.get(&path, &[]).await
    }

    async fn get_security_policies(&self, req: GetSecurityPoliciesRequest) -> Result<SecurityPoliciesResponse, ClientError> {
        let path = format!("{}/security-policies", version_path(req.config_id, req.version));
        self.client.get(&path, &[]).await
    }

    async fn get_version_notes(&self, req: GetVersionNotesRequest) -> Result<VersionNotesResponse, ClientError> {
        let path = format!("{}/version-notes", version_path(req.config_id, req.version));
        self.client.get(&path, &[]).await
    }
}
