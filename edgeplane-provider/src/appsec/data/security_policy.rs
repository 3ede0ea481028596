//! Security policies of a configuration version

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::appsec::api::GetSecurityPoliciesRequest;
use crate::appsec::keys::VersionKey;
use crate::appsec::templates::templates;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_security_policy";

pub struct SecurityPolicyDataSource;

impl ResourceType for SecurityPolicyDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()).required())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .with_description("Policy name; the first policy is reported when unset"),
            )
            .attribute(AttributeSchema::new("policy_id", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new("policy_list", AttributeType::List(Box::new(AttributeType::String)))
                    .computed(),
            )
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for SecurityPolicyDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let version = data.required_int("version")?;
        let name = data.optional_string("name")?;
        let api = meta.appsec()?;
        let policies = meta
            .call(
                NAME,
                "GetSecurityPolicies",
                api.get_security_policies(GetSecurityPoliciesRequest { config_id, version }),
            )
            .await?;

        let selected = match name {
            Some(name) => policies.policies.iter().find(|p| p.policy_name == name),
            None => policies.policies.first(),
        };
        data.set_optional("policy_id", selected.map(|p| p.policy_id.as_str()))?;
        data.set(
            "policy_list",
            policies
                .policies
                .iter()
                .map(|p| p.policy_id.clone())
                .collect::<Vec<_>>(),
        )?;
        set_output_text(data, templates(), "securityPoliciesDS", &policies)?;
        data.set_id(VersionKey { config_id, version }.encode());
        Ok(())
    }
}
