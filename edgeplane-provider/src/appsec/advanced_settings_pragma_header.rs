//! Pragma header advanced setting, configuration-wide or per policy

use async_trait::async_trait;

use edgeplane_core::payload::{preserve_equivalent, to_json_string};
use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{GetAdvancedSettingsPragmaRequest, UpdateAdvancedSettingsPragmaRequest};
use super::keys::PragmaKey;
use super::version::{latest_version, modifiable_version};
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_advanced_settings_pragma_header";
const PAYLOAD: &str = "pragma_header";

pub struct PragmaHeaderResource;

impl PragmaHeaderResource {
    async fn write(&self, meta: &ProviderMeta, key: &PragmaKey, json_payload: serde_json::Value) -> ProviderResult<()> {
        let version = modifiable_version(meta, NAME, key.config_id).await?;
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateAdvancedSettingsPragma",
            api.update_advanced_settings_pragma(UpdateAdvancedSettingsPragmaRequest {
                config_id: key.config_id,
                version,
                policy_id: key.security_policy_id.clone(),
                json_payload,
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for PragmaHeaderResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(
                AttributeSchema::new("security_policy_id", types::key_component())
                    .with_description("Policy to scope the setting to; configuration-wide when unset"),
            )
            .attribute(AttributeSchema::new(PAYLOAD, AttributeType::Json).required())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for PragmaHeaderResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = PragmaKey {
            config_id: data.required_int("config_id")?,
            security_policy_id: data.optional_string("security_policy_id")?,
        };
        self.write(meta, &key, data.required_json(PAYLOAD)?).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PragmaKey::decode(data.require_id()?)?;
        let version = latest_version(meta, NAME, key.config_id).await?;
        let api = meta.appsec()?;
        let pragma = meta
            .call(
                NAME,
                "GetAdvancedSettingsPragma",
                api.get_advanced_settings_pragma(GetAdvancedSettingsPragmaRequest {
                    config_id: key.config_id,
                    version,
                    policy_id: key.security_policy_id.clone(),
                }),
            )
            .await?;

        let current = data.optional_string(PAYLOAD)?;
        let fetched = to_json_string(PAYLOAD, &pragma)?;
        data.set("config_id", key.config_id)?;
        data.set_optional("security_policy_id", key.security_policy_id)?;
        data.set(PAYLOAD, preserve_equivalent(current.as_deref(), fetched))
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = PragmaKey::decode_unchanged(data)?;
        self.write(meta, &key, data.required_json(PAYLOAD)?).await
    }

    /// Writes an empty setting
    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PragmaKey::decode(data.require_id()?)?;
        self.write(meta, &key, serde_json::json!({})).await
    }
}
