//! Upgrade of a policy's rule set to the latest release

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{PolicyRequest, UpdateRuleUpgradeRequest};
use super::keys::ConfigPolicyKey;
use super::version::{latest_version, modifiable_version};
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_rule_upgrade";

pub struct RuleUpgradeResource;

impl RuleUpgradeResource {
    async fn upgrade(&self, meta: &ProviderMeta, key: &ConfigPolicyKey) -> ProviderResult<()> {
        let version = modifiable_version(meta, NAME, key.config_id).await?;
        let api = meta.appsec()?;
        let mode = meta
            .call(
                NAME,
                "UpdateRuleUpgrade",
                api.update_rule_upgrade(UpdateRuleUpgradeRequest {
                    config_id: key.config_id,
                    version,
                    policy_id: key.security_policy_id.clone(),
                    upgrade: true,
                }),
            )
            .await?;
        log::info!(
            "{}: policy {} now on rule set {}",
            NAME,
            key.security_policy_id,
            mode.current
        );
        Ok(())
    }
}

impl ResourceType for RuleUpgradeResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("security_policy_id", types::key_component()).required())
            .attribute(AttributeSchema::new("current_ruleset", AttributeType::String).computed())
            .attribute(AttributeSchema::new("mode", AttributeType::String).computed())
            .attribute(AttributeSchema::new("eval_status", AttributeType::String).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for RuleUpgradeResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = ConfigPolicyKey {
            config_id: data.required_int("config_id")?,
            security_policy_id: data.required_string("security_policy_id")?,
        };
        self.upgrade(meta, &key).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = ConfigPolicyKey::decode(data.require_id()?)?;
        let version = latest_version(meta, NAME, key.config_id).await?;
        let api = meta.appsec()?;
        let mode = meta
            .call(
                NAME,
                "GetWAFMode",
                api.get_waf_mode(PolicyRequest {
                    config_id: key.config_id,
                    version,
                    policy_id: key.security_policy_id.clone(),
                }),
            )
            .await?;

        data.set("config_id", key.config_id)?;
        data.set("security_policy_id", key.security_policy_id)?;
        data.set("current_ruleset", mode.current)?;
        data.set("mode", mode.mode)?;
        data.set_optional("eval_status", mode.eval)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = ConfigPolicyKey::decode_unchanged(data)?;
        self.upgrade(meta, &key).await
    }

    /// An upgrade cannot be undone; the object is only forgotten
    async fn delete(&self, _meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        ConfigPolicyKey::decode(data.require_id()?)?;
        Ok(())
    }
}
