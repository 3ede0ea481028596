//! Application security configurations
//!
//! Most settings live inside one version of a security configuration.
//! Writes target the modifiable version (see [`version`]); reads pin the
//! version recorded in the identifier.

pub mod api;
pub mod data;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;
mod keys;
mod templates;
mod version;

mod advanced_settings_pragma_header;
mod eval_protect_host;
mod eval_rule_condition_exception;
mod match_target;
mod penalty_box;
mod rate_protection;
mod reputation_analysis;
mod reputation_profile;
mod reputation_profile_action;
mod rule_upgrade;
mod selected_hostnames;
mod siem_settings;

pub use advanced_settings_pragma_header::PragmaHeaderResource;
pub use api::AppSecApi;
pub use eval_protect_host::EvalProtectHostResource;
pub use eval_rule_condition_exception::EvalRuleConditionExceptionResource;
pub use http::HttpAppSec;
pub use match_target::MatchTargetResource;
pub use penalty_box::PenaltyBoxResource;
pub use rate_protection::RateProtectionResource;
pub use reputation_analysis::ReputationAnalysisResource;
pub use reputation_profile::ReputationProfileResource;
pub use reputation_profile_action::ReputationProfileActionResource;
pub use rule_upgrade::RuleUpgradeResource;
pub use selected_hostnames::SelectedHostnamesResource;
pub use siem_settings::SiemSettingsResource;

/// Actions a policy may take on a matching request
pub(crate) const ACTIONS: [&str; 3] = ["alert", "deny", "none"];
