//! Match targets, passed through as JSON documents

use async_trait::async_trait;

use edgeplane_core::payload::preserve_equivalent;
use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{CreateMatchTargetRequest, GetMatchTargetRequest, UpdateMatchTargetRequest};
use super::keys::MatchTargetKey;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_match_target";
const PAYLOAD: &str = "match_target";

impl MatchTargetKey {
    fn request(&self) -> GetMatchTargetRequest {
        GetMatchTargetRequest {
            config_id: self.config_id,
            version: self.version,
            target_id: self.match_target_id,
        }
    }
}

pub struct MatchTargetResource;

impl ResourceType for MatchTargetResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(AttributeSchema::new(PAYLOAD, AttributeType::Json).required())
            .attribute(AttributeSchema::new("match_target_id", AttributeType::Int).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for MatchTargetResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let json_payload = data.required_json(PAYLOAD)?;
        let version = write_version(meta, NAME, config_id, data.optional_int("version")?).await?;

        let api = meta.appsec()?;
        let created = meta
            .call(
                NAME,
                "CreateMatchTarget",
                api.create_match_target(CreateMatchTargetRequest {
                    config_id,
                    version,
                    json_payload,
                }),
            )
            .await?;

        let key = MatchTargetKey {
            config_id,
            version,
            match_target_id: created.target_id,
        };
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = MatchTargetKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let target = meta
            .call(NAME, "GetMatchTarget", api.get_match_target(key.request()))
            .await?;

        let current = data.optional_string(PAYLOAD)?;
        let fetched = serde_json::Value::Object(target.fields).to_string();
        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("match_target_id", target.target_id)?;
        data.set(PAYLOAD, preserve_equivalent(current.as_deref(), fetched))
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = MatchTargetKey::decode_unchanged(data)?;
        let json_payload = data.required_json(PAYLOAD)?;

        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateMatchTarget",
            api.update_match_target(UpdateMatchTargetRequest {
                config_id: key.config_id,
                version: key.version,
                target_id: key.match_target_id,
                json_payload,
            }),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = MatchTargetKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        meta.call(NAME, "RemoveMatchTarget", api.remove_match_target(key.request()))
            .await
    }
}
