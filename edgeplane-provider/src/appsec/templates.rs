//! Named output templates for application security responses

use std::sync::LazyLock;

use edgeplane_core::output::{Column, OutputTemplates};

static TEMPLATES: LazyLock<OutputTemplates> = LazyLock::new(build);

pub fn templates() -> &'static OutputTemplates {
    &TEMPLATES
}

fn protections() -> Vec<Column> {
    vec![
        Column::new("APIConstraints", "/applyApiConstraints"),
        Column::new("ApplicationLayerControls", "/applyApplicationLayerControls"),
        Column::new("BotmanControls", "/applyBotmanControls"),
        Column::new("NetworkLayerControls", "/applyNetworkLayerControls"),
        Column::new("RateControls", "/applyRateControls"),
        Column::new("ReputationControls", "/applyReputationControls"),
        Column::new("SlowPostControls", "/applySlowPostControls"),
    ]
}

fn build() -> OutputTemplates {
    OutputTemplates::new()
        .tabular(
            "configuration",
            "/configurations",
            vec![
                Column::new("Config_id", "/id"),
                Column::new("Name", "/name"),
                Column::new("Latest_version", "/latestVersion"),
                Column::new("Version_active_in_staging", "/stagingVersion").dash(),
                Column::new("Version_active_in_production", "/productionVersion").dash(),
            ],
        )
        .tabular(
            "configurationVersion",
            "/versionList",
            vec![
                Column::new("Version Number", "/version"),
                Column::new("Staging Status", "/staging/status"),
                Column::new("Production Status", "/production/status"),
            ],
        )
        .tabular("rateProtectionDS", "", protections())
        .tabular(
            "RuleConditionException",
            "",
            vec![
                Column::new("Conditions", "/conditions"),
                Column::new("Exceptions", "/exception"),
            ],
        )
        .tabular(
            "customRules",
            "/customRules",
            vec![Column::new("ID", "/id"), Column::new("Name", "/name")],
        )
        .tabular(
            "securityPoliciesDS",
            "/policies",
            vec![Column::new("ID", "/policyId"), Column::new("Name", "/policyName")],
        )
        .text("versionNotesDS", |value| {
            value
                .get("notes")
                .and_then(|notes| notes.as_str())
                .map(str::to_string)
        })
        // Sections of a configuration export
        .tabular("selectedHosts", "/selectedHosts", vec![Column::new("Hostnames", "")])
        .tabular(
            "ratePolicies",
            "/ratePolicies",
            vec![Column::new("ID", "/id"), Column::new("Name", "/name")],
        )
        .tabular(
            "reputationProfiles",
            "/reputationProfiles",
            vec![Column::new("ID", "/id"), Column::new("Name(Title)", "/name")],
        )
        .tabular(
            "matchTargets",
            "/matchTargets/websiteTargets",
            vec![
                Column::new("ID", "/id"),
                Column::new("PolicyID", "/securityPolicy/policyId"),
            ],
        )
        .tabular(
            "securityPolicies",
            "/securityPolicies",
            vec![Column::new("ID", "/id"), Column::new("Name", "/name")],
        )
        .text("selectedHosts.tf", selected_hosts_resource)
}

/// Resource block recreating the exported selected hostnames
fn selected_hosts_resource(export: &serde_json::Value) -> Option<String> {
    let config_id = export.get("configId")?.as_i64()?;
    let hostnames: Vec<String> = export
        .get("selectedHosts")?
        .as_array()?
        .iter()
        .filter_map(|h| h.as_str())
        .map(|h| format!("\"{}\"", h))
        .collect();
    Some(format!(
        "\nresource \"appsec_selected_hostnames\" \"config_{config_id}\" {{\n  config_id = {config_id}\n  hostnames = [{}]\n  mode      = \"REPLACE\"\n}}\n",
        hostnames.join(", ")
    ))
}
