//! Rate protection switch of a security policy

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::UpdateRateProtectionRequest;
use super::keys::PolicyKey;
use super::templates::templates;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_rate_protection";

#[derive(Debug, Clone, PartialEq)]
struct RateProtection {
    config_id: i64,
    version: Option<i64>,
    security_policy_id: String,
    enabled: bool,
}

impl RateProtection {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            config_id: data.required_int("config_id")?,
            version: data.optional_int("version")?,
            security_policy_id: data.required_string("security_policy_id")?,
            enabled: data.required_bool("enabled")?,
        })
    }
}

pub struct RateProtectionResource;

impl RateProtectionResource {
    async fn write(&self, meta: &ProviderMeta, key: &PolicyKey, enabled: bool) -> ProviderResult<()> {
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateRateProtection",
            api.update_rate_protection(UpdateRateProtectionRequest {
                config_id: key.config_id,
                version: key.version,
                policy_id: key.security_policy_id.clone(),
                apply_rate_controls: enabled,
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for RateProtectionResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .with_description("Rate controls of one security policy")
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(
                AttributeSchema::new("version", types::positive_int())
                    .with_description("Configuration version; the modifiable version when unset"),
            )
            .attribute(AttributeSchema::new("security_policy_id", types::key_component()).required())
            .attribute(AttributeSchema::new("enabled", AttributeType::Bool).required())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for RateProtectionResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let attrs = RateProtection::from_data(data)?;
        let key = PolicyKey {
            config_id: attrs.config_id,
            version: write_version(meta, NAME, attrs.config_id, attrs.version).await?,
            security_policy_id: attrs.security_policy_id,
        };
        self.write(meta, &key, attrs.enabled).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PolicyKey::decode(data.require_id()?)?;
        let api = meta.appsec()?;
        let protections = meta
            .call(NAME, "GetRateProtection", api.get_rate_protection(key.request()))
            .await?;

        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("security_policy_id", key.security_policy_id.as_str())?;
        data.set("enabled", protections.apply_rate_controls)?;
        set_output_text(data, templates(), "rateProtectionDS", &protections)
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = PolicyKey::decode_unchanged(data)?;
        let enabled = data.required_bool("enabled")?;
        self.write(meta, &key, enabled).await
    }

    /// Switches rate controls off; the policy itself stays
    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = PolicyKey::decode(data.require_id()?)?;
        self.write(meta, &key, false).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use edgeplane_core::lifecycle::{ManagedObject, ObjectStatus};
    use edgeplane_core::provider::ProviderError;

    use super::*;
    use crate::appsec::api::{PolicyRequest, ProtectionsResponse};
    use crate::appsec::fake::FakeAppSec;
    use crate::client::ClientError;

    fn policy() -> PolicyRequest {
        PolicyRequest {
            config_id: 43253,
            version: 7,
            policy_id: "AAAA_81230".to_string(),
        }
    }

    fn update(enabled: bool) -> UpdateRateProtectionRequest {
        UpdateRateProtectionRequest {
            config_id: 43253,
            version: 7,
            policy_id: "AAAA_81230".to_string(),
            apply_rate_controls: enabled,
        }
    }

    fn protections(enabled: bool) -> ProtectionsResponse {
        ProtectionsResponse {
            apply_rate_controls: enabled,
            apply_application_layer_controls: true,
            ..Default::default()
        }
    }

    fn desired() -> ResourceData {
        ResourceData::new(&RateProtectionResource.schema())
            .with_attribute("config_id", 43253_i64)
            .with_attribute("security_policy_id", "AAAA_81230")
            .with_attribute("enabled", true)
    }

    #[tokio::test]
    async fn create_resolves_version_and_reads_back() {
        let fake = Arc::new(FakeAppSec::default());
        fake.expect_latest_version(43253, 7);
        fake.script.expect("UpdateRateProtection", update(true), protections(true));
        fake.script.expect("GetRateProtection", policy(), protections(true));
        fake.script.expect("GetRateProtection", policy(), protections(true));
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let mut object = ManagedObject::new(desired());
        object.create(&RateProtectionResource, &meta).await.unwrap();

        assert_eq!(object.status(), ObjectStatus::PresentClean);
        assert_eq!(object.data().id(), Some("43253:7:AAAA_81230"));
        assert_eq!(object.data().required_int("version").unwrap(), 7);
        assert!(object.data().required_bool("enabled").unwrap());
        let text = object.data().required_string(OUTPUT_TEXT).unwrap();
        assert!(text.contains("RATEPROTECTIONDS"));
        assert!(text.contains("RATECONTROLS"));

        object.read(&RateProtectionResource, &meta).await.unwrap();
        assert_eq!(
            fake.script.calls(),
            vec![
                "GetConfiguration",
                "UpdateRateProtection",
                "GetRateProtection",
                "GetRateProtection"
            ]
        );
        fake.script.assert_done();
    }

    #[tokio::test]
    async fn explicit_version_skips_lookup() {
        let fake = Arc::new(FakeAppSec::default());
        fake.script.expect("UpdateRateProtection", update(false), protections(false));
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let mut data = desired()
            .with_attribute("version", 7_i64)
            .with_attribute("enabled", false);
        RateProtectionResource.create(&meta, &mut data).await.unwrap();
        assert_eq!(data.id(), Some("43253:7:AAAA_81230"));
        fake.script.assert_done();
    }

    #[tokio::test]
    async fn delete_writes_neutral_payload() {
        let fake = Arc::new(FakeAppSec::default());
        fake.script.expect("UpdateRateProtection", update(false), protections(false));
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let mut object = ManagedObject::existing(desired().with_id("43253:7:AAAA_81230"));
        object.delete(&RateProtectionResource, &meta).await.unwrap();
        assert_eq!(object.status(), ObjectStatus::Absent);
        assert_eq!(object.data().id(), None);
        assert_eq!(fake.script.calls(), vec!["UpdateRateProtection"]);
    }

    #[tokio::test]
    async fn failed_delete_keeps_identifier() {
        let fake = Arc::new(FakeAppSec::default());
        fake.script.expect_error(
            "UpdateRateProtection",
            update(false),
            ClientError::Api {
                status: 500,
                title: "Internal Server Error".to_string(),
                detail: None,
            },
        );
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let mut object = ManagedObject::existing(desired().with_id("43253:7:AAAA_81230"));
        let err = object.delete(&RateProtectionResource, &meta).await.unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { .. }));
        assert_eq!(object.status(), ObjectStatus::AbsentPendingRetry);
        assert_eq!(object.data().id(), Some("43253:7:AAAA_81230"));
    }

    #[tokio::test]
    async fn malformed_identifier_makes_no_calls() {
        let fake = Arc::new(FakeAppSec::default());
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let mut data = desired().with_id("43253:7");
        let err = RateProtectionResource.read(&meta, &mut data).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
        assert!(fake.script.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_field_fails_before_any_call() {
        let fake = Arc::new(FakeAppSec::default());
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let mut data = ResourceData::new(&RateProtectionResource.schema())
            .with_attribute("config_id", 43253_i64)
            .with_attribute("enabled", true);
        let err = RateProtectionResource.create(&meta, &mut data).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration { ref field, .. } if field == "security_policy_id"));
        assert!(fake.script.calls().is_empty());
    }
}
