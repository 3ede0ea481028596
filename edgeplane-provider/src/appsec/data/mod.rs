//! Read-only appsec lookups

mod configuration;
mod configuration_version;
mod custom_rules;
mod export_configuration;
mod security_policy;
mod version_notes;

pub use configuration::ConfigurationDataSource;
pub use configuration_version::ConfigurationVersionDataSource;
pub use custom_rules::CustomRulesDataSource;
pub use export_configuration::ExportConfigurationDataSource;
pub use security_policy::SecurityPolicyDataSource;
pub use version_notes::VersionNotesDataSource;
