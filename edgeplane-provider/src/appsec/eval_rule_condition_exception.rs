//! Conditions and exceptions of one evaluation rule

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::payload::{preserve_equivalent, to_json_string};
use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{GetEvalRuleConditionExceptionRequest, UpdateEvalRuleConditionExceptionRequest};
use super::keys::RuleKey;
use super::templates::templates;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_eval_rule_condition_exception";
const PAYLOAD: &str = "condition_exception";

impl RuleKey {
    fn request(&self) -> GetEvalRuleConditionExceptionRequest {
        GetEvalRuleConditionExceptionRequest {
            config_id: self.config_id,
            version: self.version,
            policy_id: self.security_policy_id.clone(),
            rule_id: self.rule_id,
        }
    }
}

pub struct EvalRuleConditionExceptionResource;

impl EvalRuleConditionExceptionResource {
    async fn write(&self, meta: &ProviderMeta, key: &RuleKey, json_payload: serde_json::Value) -> ProviderResult<()> {
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateEvalRuleConditionException",
            api.update_eval_rule_condition_exception(UpdateEvalRuleConditionExceptionRequest {
                config_id: key.config_id,
                version: key.version,
                policy_id: key.security_policy_id.clone(),
                rule_id: key.rule_id,
                json_payload,
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for EvalRuleConditionExceptionResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(AttributeSchema::new("security_policy_id", types::key_component()).required())
            .attribute(AttributeSchema::new("rule_id", types::positive_int()).required())
            .attribute(AttributeSchema::new(PAYLOAD, AttributeType::Json).required())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for EvalRuleConditionExceptionResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let key = RuleKey {
            config_id,
            version: write_version(meta, NAME, config_id, data.optional_int("version")?).await?,
            security_policy_id: data.required_string("security_policy_id")?,
            rule_id: data.required_int("rule_id")?,
        };
        self.write(meta, &key, data.required_json(PAYLOAD)?).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = RuleKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let exception = meta
            .call(
                NAME,
                "GetEvalRuleConditionException",
                api.get_eval_rule_condition_exception(key.request()),
            )
            .await?;

        let current = data.optional_string(PAYLOAD)?;
        let fetched = to_json_string(PAYLOAD, &exception)?;
        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("security_policy_id", key.security_policy_id.as_str())?;
        data.set("rule_id", key.rule_id)?;
        data.set(PAYLOAD, preserve_equivalent(current.as_deref(), fetched))?;
        set_output_text(data, templates(), "RuleConditionException", &exception)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = RuleKey::decode_unchanged(data)?;
        self.write(meta, &key, data.required_json(PAYLOAD)?).await
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = RuleKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "RemoveEvalRuleConditionException",
            api.remove_eval_rule_condition_exception(key.request()),
        )
        .await
    }
}
