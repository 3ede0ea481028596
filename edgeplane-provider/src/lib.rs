//! Edgeplane Provider
//!
//! Resources and data sources for the application security, identity,
//! network list and property APIs.

pub mod appsec;
pub mod client;
#[cfg(test)]
mod fake;
pub mod iam;
pub mod meta;
pub mod networklists;
pub mod property;

use edgeplane_core::registry::Registry;

pub use meta::ProviderMeta;

/// Every resource and data source this provider handles
pub fn registry() -> Registry<ProviderMeta> {
    Registry::new()
        .resource(appsec::SelectedHostnamesResource)
        .resource(appsec::PenaltyBoxResource)
        .resource(appsec::RateProtectionResource)
        .resource(appsec::ReputationProfileResource)
        .resource(appsec::ReputationProfileActionResource)
        .resource(appsec::ReputationAnalysisResource)
        .resource(appsec::MatchTargetResource)
        .resource(appsec::PragmaHeaderResource)
        .resource(appsec::EvalRuleConditionExceptionResource)
        .resource(appsec::SiemSettingsResource)
        .resource(appsec::RuleUpgradeResource)
        .resource(appsec::EvalProtectHostResource)
        .resource(iam::UserResource)
        .resource(networklists::ActivationsResource)
        .data_source(appsec::data::ConfigurationDataSource)
        .data_source(appsec::data::ConfigurationVersionDataSource)
        .data_source(appsec::data::CustomRulesDataSource)
        .data_source(appsec::data::ExportConfigurationDataSource)
        .data_source(appsec::data::SecurityPolicyDataSource)
        .data_source(appsec::data::VersionNotesDataSource)
        .data_source(iam::CountriesDataSource)
        .data_source(property::HostnamesDataSource)
}
