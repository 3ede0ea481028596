//! Full export of one configuration version

use async_trait::async_trait;

use edgeplane_core::output::OUTPUT_TEXT;
use edgeplane_core::payload::to_json_string;
use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::appsec::api::GetExportConfigurationRequest;
use crate::appsec::templates::templates;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_export_configuration";

pub struct ExportConfigurationDataSource;

impl ResourceType for ExportConfigurationDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()).required())
            .attribute(
                AttributeSchema::new("search", AttributeType::List(Box::new(AttributeType::String)))
                    .with_description("Export sections to render into output_text, in order"),
            )
            .attribute(AttributeSchema::new("json", AttributeType::String).computed())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for ExportConfigurationDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let version = data.required_int("version")?;
        let api = meta.appsec()?;
        let export = meta
            .call(
                NAME,
                "GetExportConfiguration",
                api.get_export_configuration(GetExportConfigurationRequest { config_id, version }),
            )
            .await?;

        data.set("json", to_json_string("json", &export)?)?;

        // Unknown section names are skipped
        let search = data.optional_string_list("search")?.unwrap_or_default();
        let text: String = search
            .iter()
            .filter_map(|section| match templates().render(section, &export) {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("{}: section '{}' not rendered: {}", NAME, section, e);
                    None
                }
            })
            .collect();
        if text.is_empty() {
            data.remove(OUTPUT_TEXT);
        } else {
            data.set(OUTPUT_TEXT, text)?;
        }

        data.set_id(config_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::appsec::fake::FakeAppSec;

    fn export() -> serde_json::Value {
        json!({
            "configId": 43253,
            "version": 7,
            "selectedHosts": ["example.com"],
            "ratePolicies": [{"id": 1, "name": "Page View Requests"}]
        })
    }

    fn meta_with_export() -> (Arc<FakeAppSec>, ProviderMeta) {
        let fake = Arc::new(FakeAppSec::default());
        fake.script.expect(
            "GetExportConfiguration",
            GetExportConfigurationRequest {
                config_id: 43253,
                version: 7,
            },
            export(),
        );
        let meta = ProviderMeta::new().with_appsec(fake.clone());
        (fake, meta)
    }

    #[tokio::test]
    async fn renders_requested_sections_in_order() {
        let (fake, meta) = meta_with_export();
        let mut data = ResourceData::new(&ExportConfigurationDataSource.schema())
            .with_attribute("config_id", 43253_i64)
            .with_attribute("version", 7_i64)
            .with_attribute(
                "search",
                vec!["ratePolicies".to_string(), "bogus".to_string(), "selectedHosts.tf".to_string()],
            );
        ExportConfigurationDataSource.read(&meta, &mut data).await.unwrap();

        assert_eq!(data.id(), Some("43253"));
        let text = data.required_string(OUTPUT_TEXT).unwrap();
        let policies = text.find("Page View Requests").unwrap();
        let resource = text.find("resource \"appsec_selected_hostnames\"").unwrap();
        assert!(policies < resource);
        fake.script.assert_done();
    }

    #[tokio::test]
    async fn without_search_only_json_is_set() {
        let (_fake, meta) = meta_with_export();
        let mut data = ResourceData::new(&ExportConfigurationDataSource.schema())
            .with_attribute("config_id", 43253_i64)
            .with_attribute("version", 7_i64);
        ExportConfigurationDataSource.read(&meta, &mut data).await.unwrap();

        assert!(!data.contains(OUTPUT_TEXT));
        let json: serde_json::Value = serde_json::from_str(&data.required_string("json").unwrap()).unwrap();
        assert_eq!(json, export());
    }
}
