//! Reputation profiles, passed through as JSON documents

use async_trait::async_trait;

use edgeplane_core::payload::preserve_equivalent;
use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{
    CreateReputationProfileRequest, GetReputationProfileRequest, ReputationProfileResponse,
    UpdateReputationProfileRequest,
};
use super::keys::ReputationProfileKey;
use super::version::{latest_version, modifiable_version};
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_reputation_profile";
const PAYLOAD: &str = "reputation_profile";

/// Profile document without its server-assigned id
fn document(profile: ReputationProfileResponse) -> String {
    serde_json::Value::Object(profile.fields).to_string()
}

pub struct ReputationProfileResource;

impl ResourceType for ReputationProfileResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new(PAYLOAD, AttributeType::Json).required())
            .attribute(AttributeSchema::new("reputation_profile_id", AttributeType::Int).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for ReputationProfileResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let json_payload = data.required_json(PAYLOAD)?;
        let version = modifiable_version(meta, NAME, config_id).await?;

        let api = meta.appsec()?;
        let created = meta
            .call(
                NAME,
                "CreateReputationProfile",
                api.create_reputation_profile(CreateReputationProfileRequest {
                    config_id,
                    version,
                    json_payload,
                }),
            )
            .await?;

        let key = ReputationProfileKey {
            config_id,
            reputation_profile_id: created.id,
        };
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = ReputationProfileKey::decode(data.require_id()?)?;
        let version = latest_version(meta, NAME, key.config_id).await?;
        let api = meta.appsec()?;
        let profile = meta
            .call(
                NAME,
                "GetReputationProfile",
                api.get_reputation_profile(GetReputationProfileRequest {
                    config_id: key.config_id,
                    version,
                    reputation_profile_id: key.reputation_profile_id,
                }),
            )
            .await?;

        let current = data.optional_string(PAYLOAD)?;
        data.set("config_id", key.config_id)?;
        data.set("reputation_profile_id", profile.id)?;
        data.set(PAYLOAD, preserve_equivalent(current.as_deref(), document(profile)))
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = ReputationProfileKey::decode_unchanged(data)?;
        let json_payload = data.required_json(PAYLOAD)?;
        let version = modifiable_version(meta, NAME, key.config_id).await?;

        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateReputationProfile",
            api.update_reputation_profile(UpdateReputationProfileRequest {
                config_id: key.config_id,
                version,
                reputation_profile_id: key.reputation_profile_id,
                json_payload,
            }),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = ReputationProfileKey::decode(data.require_id()?)?;
        let version = modifiable_version(meta, NAME, key.config_id).await?;
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "RemoveReputationProfile",
            api.remove_reputation_profile(GetReputationProfileRequest {
                config_id: key.config_id,
                version,
                reputation_profile_id: key.reputation_profile_id,
            }),
        )
        .await
    }
}
