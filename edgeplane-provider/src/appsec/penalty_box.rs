//! Penalty box setting of a security policy

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::ACTIONS;
use super::api::UpdatePenaltyBoxRequest;
use super::keys::PolicyKey;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_penalty_box";

#[derive(Debug, Clone, PartialEq)]
struct PenaltyBox {
    config_id: i64,
    version: Option<i64>,
    security_policy_id: String,
    protection: bool,
    action: String,
}

impl PenaltyBox {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            config_id: data.required_int("config_id")?,
            version: data.optional_int("version")?,
            security_policy_id: data.required_string("security_policy_id")?,
            protection: data.required_bool("penalty_box_protection")?,
            action: data.required_string("penalty_box_action")?,
        })
    }
}

pub struct PenaltyBoxResource;

impl PenaltyBoxResource {
    async fn write(&self, meta: &ProviderMeta, key: &PolicyKey, protection: bool, action: String) -> ProviderResult<()> {
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdatePenaltyBox",
            api.update_penalty_box(UpdatePenaltyBoxRequest {
                config_id: key.config_id,
                version: key.version,
                policy_id: key.security_policy_id.clone(),
                penalty_box_protection: protection,
                action,
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for PenaltyBoxResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(AttributeSchema::new("security_policy_id", types::key_component()).required())
            .attribute(AttributeSchema::new("penalty_box_protection", AttributeType::Bool).required())
            .attribute(AttributeSchema::new("penalty_box_action", types::string_enum(&ACTIONS)).required())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for PenaltyBoxResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let attrs = PenaltyBox::from_data(data)?;
        let key = PolicyKey {
            config_id: attrs.config_id,
            version: write_version(meta, NAME, attrs.config_id, attrs.version).await?,
            security_policy_id: attrs.security_policy_id,
        };
        self.write(meta, &key, attrs.protection, attrs.action).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PolicyKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let penalty_box = meta
            .call(NAME, "GetPenaltyBox", api.get_penalty_box(key.request()))
            .await?;

        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("security_policy_id", key.security_policy_id.as_str())?;
        data.set("penalty_box_protection", penalty_box.penalty_box_protection)?;
        data.set("penalty_box_action", penalty_box.action)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = PolicyKey::decode_unchanged(data)?;
        let attrs = PenaltyBox::from_data(data)?;
        self.write(meta, &key, attrs.protection, attrs.action).await
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PolicyKey::decode(data.require_id()?)?;
        self.write(meta, &key, false, "none".to_string()).await
    }
}
