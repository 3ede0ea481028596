//! Version history of a security configuration

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::appsec::api::GetConfigurationVersionsRequest;
use crate::appsec::templates::templates;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_configuration_version";

pub struct ConfigurationVersionDataSource;

impl ResourceType for ConfigurationVersionDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(
                AttributeSchema::new("version", types::positive_int())
                    .with_description("Version whose network status is reported"),
            )
            .attribute(AttributeSchema::new("latest_version", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("staging_status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("production_status", AttributeType::String).computed())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for ConfigurationVersionDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let version = data.optional_int("version")?;
        let api = meta.appsec()?;
        let versions = meta
            .call(
                NAME,
                "GetConfigurationVersions",
                api.get_configuration_versions(GetConfigurationVersionsRequest { config_id }),
            )
            .await?;

        data.set("latest_version", versions.last_created_version)?;
        if let Some(entry) = version.and_then(|v| versions.version_list.iter().find(|e| e.version == v)) {
            data.set("staging_status", entry.staging.status.as_str())?;
            data.set("production_status", entry.production.status.as_str())?;
        }
        set_output_text(data, templates(), "configurationVersion", &versions)?;
        data.set_id(config_id.to_string());
        Ok(())
    }
}
