//! Hostnames moved from evaluation into protection

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{GetEvalProtectHostRequest, UpdateEvalProtectHostRequest};
use super::keys::VersionKey;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_eval_protect_host";

pub struct EvalProtectHostResource;

impl EvalProtectHostResource {
    async fn write(&self, meta: &ProviderMeta, key: &VersionKey, hostnames: Vec<String>) -> ProviderResult<()> {
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateEvalProtectHost",
            api.update_eval_protect_host(UpdateEvalProtectHostRequest {
                config_id: key.config_id,
                version: key.version,
                hostnames,
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for EvalProtectHostResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(
                AttributeSchema::new("hostnames", AttributeType::List(Box::new(AttributeType::String)))
                    .required(),
            )
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for EvalProtectHostResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let hostnames = data.optional_string_list("hostnames")?.unwrap_or_default();
        let key = VersionKey {
            config_id,
            version: write_version(meta, NAME, config_id, data.optional_int("version")?).await?,
        };
        self.write(meta, &key, hostnames).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = VersionKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let hosts = meta
            .call(
                NAME,
                "GetEvalProtectHost",
                api.get_eval_protect_host(GetEvalProtectHostRequest {
                    config_id: key.config_id,
                    version: key.version,
                }),
            )
            .await?;

        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("hostnames", hosts.hostnames)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = VersionKey::decode_unchanged(data)?;
        let hostnames = data.optional_string_list("hostnames")?.unwrap_or_default();
        self.write(meta, &key, hostnames).await
    }

    /// Writes an empty hostname list
    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = VersionKey::decode(data.require_id()?)?;
        self.write(meta, &key, Vec::new()).await
    }
}
