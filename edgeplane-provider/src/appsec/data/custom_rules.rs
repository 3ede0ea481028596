//! Custom rules of a security configuration

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::payload::to_json_string;
use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::appsec::api::GetCustomRulesRequest;
use crate::appsec::templates::templates;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_custom_rules";

pub struct CustomRulesDataSource;

impl ResourceType for CustomRulesDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("custom_rule_id", types::positive_int()))
            .attribute(AttributeSchema::new("json", AttributeType::String).computed())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for CustomRulesDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let api = meta.appsec()?;
        let rules = meta
            .call(
                NAME,
                "GetCustomRules",
                api.get_custom_rules(GetCustomRulesRequest {
                    config_id,
                    id: data.optional_int("custom_rule_id")?,
                }),
            )
            .await?;

        data.set("json", to_json_string("json", &rules)?)?;
        set_output_text(data, templates(), "customRules", &rules)?;
        data.set_id(config_id.to_string());
        Ok(())
    }
}
