//! Action a security policy takes for one reputation profile

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, ResourceSchema, types};

use super::ACTIONS;
use super::api::{GetReputationProfileActionRequest, UpdateReputationProfileActionRequest};
use super::keys::ReputationProfileActionKey;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_reputation_profile_action";

pub struct ReputationProfileActionResource;

impl ReputationProfileActionResource {
    async fn write(&self, meta: &ProviderMeta, key: &ReputationProfileActionKey, action: String) -> ProviderResult<()> {
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateReputationProfileAction",
            api.update_reputation_profile_action(UpdateReputationProfileActionRequest {
                config_id: key.config_id,
                version: key.version,
                policy_id: key.security_policy_id.clone(),
                reputation_profile_id: key.reputation_profile_id,
                action,
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for ReputationProfileActionResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(AttributeSchema::new("security_policy_id", types::key_component()).required())
            .attribute(AttributeSchema::new("reputation_profile_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("action", types::string_enum(&ACTIONS)).required())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for ReputationProfileActionResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let key = ReputationProfileActionKey {
            config_id,
            version: write_version(meta, NAME, config_id, data.optional_int("version")?).await?,
            security_policy_id: data.required_string("security_policy_id")?,
            reputation_profile_id: data.required_int("reputation_profile_id")?,
        };
        self.write(meta, &key, data.required_string("action")?).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = ReputationProfileActionKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let response = meta
            .call(
                NAME,
                "GetReputationProfileAction",
                api.get_reputation_profile_action(GetReputationProfileActionRequest {
                    config_id: key.config_id,
                    version: key.version,
                    policy_id: key.security_policy_id.clone(),
                    reputation_profile_id: key.reputation_profile_id,
                }),
            )
            .await?;

        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("security_policy_id", key.security_policy_id)?;
        data.set("reputation_profile_id", key.reputation_profile_id)?;
        data.set("action", response.action)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = ReputationProfileActionKey::decode_unchanged(data)?;
        self.write(meta, &key, data.required_string("action")?).await
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = ReputationProfileActionKey::decode(data.require_id()?)?;
        self.write(meta, &key, "none".to_string()).await
    }
}
