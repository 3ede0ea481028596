//! Reputation analysis forwarding flags of a security policy

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::UpdateReputationAnalysisRequest;
use super::keys::PolicyKey;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_reputation_analysis";
const FORWARD_HEADER: &str = "forward_to_http_header";
const FORWARD_SHARED_IP: &str = "forward_shared_ip_to_http_header_siem";

fn request(key: &PolicyKey, forward_header: bool, forward_shared_ip: bool) -> UpdateReputationAnalysisRequest {
    UpdateReputationAnalysisRequest {
        config_id: key.config_id,
        version: key.version,
        policy_id: key.security_policy_id.clone(),
        forward_to_http_header: forward_header,
        forward_shared_ip_to_http_header_and_siem: forward_shared_ip,
    }
}

pub struct ReputationAnalysisResource;

impl ReputationAnalysisResource {
    async fn write(&self, meta: &ProviderMeta, key: &PolicyKey, data: &ResourceData) -> ProviderResult<()> {
        let req = request(
            key,
            data.required_bool(FORWARD_HEADER)?,
            data.required_bool(FORWARD_SHARED_IP)?,
        );
        let api = meta.appsec()?;
        meta.call(NAME, "UpdateReputationAnalysis", api.update_reputation_analysis(req))
            .await?;
        Ok(())
    }
}

impl ResourceType for ReputationAnalysisResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(AttributeSchema::new("security_policy_id", types::key_component()).required())
            .attribute(AttributeSchema::new(FORWARD_HEADER, AttributeType::Bool).required())
            .attribute(AttributeSchema::new(FORWARD_SHARED_IP, AttributeType::Bool).required())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for ReputationAnalysisResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let key = PolicyKey {
            config_id,
            version: write_version(meta, NAME, config_id, data.optional_int("version")?).await?,
            security_policy_id: data.required_string("security_policy_id")?,
        };
        self.write(meta, &key, data).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PolicyKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let analysis = meta
            .call(NAME, "GetReputationAnalysis", api.get_reputation_analysis(key.request()))
            .await?;

        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("security_policy_id", key.security_policy_id)?;
        data.set(FORWARD_HEADER, analysis.forward_to_http_header)?;
        data.set(FORWARD_SHARED_IP, analysis.forward_shared_ip_to_http_header_and_siem)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = PolicyKey::decode_unchanged(data)?;
        self.write(meta, &key, data).await
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PolicyKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "RemoveReputationAnalysis",
            api.remove_reputation_analysis(request(&key, false, false)),
        )
        .await?;
        Ok(())
    }
}
