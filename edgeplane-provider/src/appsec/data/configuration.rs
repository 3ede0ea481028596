//! Security configuration lookup by name

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::provider::{DataSourceHandler, ProviderError, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use crate::appsec::api::GetConfigurationsRequest;
use crate::appsec::templates::templates;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_configuration";

/// Id of a read without `name`
const LISTING_ID: &str = "configurations";

pub struct ConfigurationDataSource;

impl ResourceType for ConfigurationDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .with_description("Looks up a configuration by name, or lists all of them")
            .attribute(AttributeSchema::new("name", AttributeType::String))
            .attribute(AttributeSchema::new("config_id", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("latest_version", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("staging_version", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("production_version", AttributeType::Int).computed())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for ConfigurationDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let name = data.optional_string("name")?;
        let api = meta.appsec()?;
        let listing = meta
            .call(NAME, "GetConfigurations", api.get_configurations(GetConfigurationsRequest))
            .await?;

        match name {
            Some(name) => {
                let config = listing
                    .configurations
                    .iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| ProviderError::configuration("name", format!("no configuration named '{}'", name)))?;
                data.set("config_id", config.id)?;
                data.set("latest_version", config.latest_version)?;
                data.set_optional("staging_version", config.staging_version)?;
                data.set_optional("production_version", config.production_version)?;
                data.set_id(config.id.to_string());
            }
            None => data.set_id(LISTING_ID),
        }
        set_output_text(data, templates(), "configuration", &listing)
    }
}
