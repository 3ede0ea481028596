//! SIEM integration settings of a configuration version

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{GetSiemSettingsRequest, SiemSettingsResponse, UpdateSiemSettingsRequest};
use super::keys::VersionKey;
use super::version::write_version;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_siem_settings";

#[derive(Debug, Clone, PartialEq)]
struct SiemSettings {
    enable_siem: bool,
    enable_for_all_policies: bool,
    enable_botman_siem: bool,
    siem_id: i64,
    security_policy_ids: Option<Vec<String>>,
}

impl SiemSettings {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            enable_siem: data.required_bool("enable_siem")?,
            enable_for_all_policies: data.required_bool("enable_for_all_policies")?,
            enable_botman_siem: data.required_bool("enable_botman_siem")?,
            siem_id: data.required_int("siem_id")?,
            security_policy_ids: data
                .optional_set("security_policy_ids")?
                .map(|ids| ids.into_iter().collect()),
        })
    }

    /// Settings with every event stream switched off
    fn disabled(siem_id: i64) -> Self {
        Self {
            enable_siem: false,
            enable_for_all_policies: false,
            enable_botman_siem: false,
            siem_id,
            security_policy_ids: None,
        }
    }

    fn request(self, key: &VersionKey) -> UpdateSiemSettingsRequest {
        UpdateSiemSettingsRequest {
            config_id: key.config_id,
            version: key.version,
            enable_for_all_policies: self.enable_for_all_policies,
            enable_siem: self.enable_siem,
            enabled_botman_siem_events: self.enable_botman_siem,
            siem_definition_id: self.siem_id,
            firewall_policy_ids: self.security_policy_ids,
        }
    }
}

pub struct SiemSettingsResource;

impl SiemSettingsResource {
    async fn write(&self, meta: &ProviderMeta, key: &VersionKey, settings: SiemSettings) -> ProviderResult<()> {
        let api = meta.appsec()?;
        meta.call(NAME, "UpdateSiemSettings", api.update_siem_settings(settings.request(key)))
            .await?;
        Ok(())
    }

    async fn fetch(&self, meta: &ProviderMeta, key: &VersionKey) -> ProviderResult<SiemSettingsResponse> {
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "GetSiemSettings",
            api.get_siem_settings(GetSiemSettingsRequest {
                config_id: key.config_id,
                version: key.version,
            }),
        )
        .await
    }
}

impl ResourceType for SiemSettingsResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()))
            .attribute(AttributeSchema::new("enable_siem", AttributeType::Bool).required())
            .attribute(AttributeSchema::new("enable_for_all_policies", AttributeType::Bool).required())
            .attribute(AttributeSchema::new("enable_botman_siem", AttributeType::Bool).required())
            .attribute(AttributeSchema::new("siem_id", types::positive_int()).required())
            .attribute(
                AttributeSchema::new("security_policy_ids", AttributeType::Set)
                    .with_description("Policies to send events for when not enabled for all"),
            )
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for SiemSettingsResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let settings = SiemSettings::from_data(data)?;
        let config_id = data.required_int("config_id")?;
        let key = VersionKey {
            config_id,
            version: write_version(meta, NAME, config_id, data.optional_int("version")?).await?,
        };
        self.write(meta, &key, settings).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = VersionKey::decode(data.require_id()?)?;
        let settings = self.fetch(meta, &key).await?;

        data.set("config_id", key.config_id)?;
        data.set("version", key.version)?;
        data.set("enable_siem", settings.enable_siem)?;
        data.set("enable_for_all_policies", settings.enable_for_all_policies)?;
        data.set("enable_botman_siem", settings.enabled_botman_siem_events)?;
        data.set("siem_id", settings.siem_definition_id)?;
        data.set_optional(
            "security_policy_ids",
            settings
                .firewall_policy_ids
                .map(|ids| ids.into_iter().collect::<std::collections::BTreeSet<_>>()),
        )
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let key = VersionKey::decode_unchanged(data)?;
        self.write(meta, &key, SiemSettings::from_data(data)?).await
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = VersionKey::decode(data.require_id()?)?;
        // Known only from state; an object addressed by identifier alone is fetched first
        let siem_id = match data.optional_int("siem_id")? {
            Some(siem_id) => siem_id,
            None => self.fetch(meta, &key).await?.siem_definition_id,
        };
        let settings = SiemSettings::disabled(siem_id);
        let api = meta.appsec()?;
        meta.call(NAME, "RemoveSiemSettings", api.remove_siem_settings(settings.request(&key)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use edgeplane_core::lifecycle::ManagedObject;

    use super::*;
    use crate::appsec::fake::FakeAppSec;

    fn disabled() -> UpdateSiemSettingsRequest {
        UpdateSiemSettingsRequest {
            config_id: 43253,
            version: 7,
            enable_for_all_policies: false,
            enable_siem: false,
            enabled_botman_siem_events: false,
            siem_definition_id: 1,
            firewall_policy_ids: None,
        }
    }

    fn enabled() -> SiemSettingsResponse {
        SiemSettingsResponse {
            enable_for_all_policies: false,
            enable_siem: true,
            enabled_botman_siem_events: true,
            siem_definition_id: 1,
            firewall_policy_ids: Some(vec!["12345".to_string()]),
        }
    }

    #[tokio::test]
    async fn create_read_and_disable() {
        let fake = Arc::new(FakeAppSec::default());
        fake.script.expect(
            "UpdateSiemSettings",
            UpdateSiemSettingsRequest {
                config_id: 43253,
                version: 7,
                enable_for_all_policies: false,
                enable_siem: true,
                enabled_botman_siem_events: true,
                siem_definition_id: 1,
                firewall_policy_ids: Some(vec!["12345".to_string()]),
            },
            enabled(),
        );
        fake.script.expect(
            "GetSiemSettings",
            GetSiemSettingsRequest {
                config_id: 43253,
                version: 7,
            },
            enabled(),
        );
        fake.script.expect("RemoveSiemSettings", disabled(), SiemSettingsResponse::default());
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let data = ResourceData::new(&SiemSettingsResource.schema())
            .with_attribute("config_id", 43253_i64)
            .with_attribute("version", 7_i64)
            .with_attribute("enable_siem", true)
            .with_attribute("enable_for_all_policies", false)
            .with_attribute("enable_botman_siem", true)
            .with_attribute("siem_id", 1_i64)
            .with_attribute("security_policy_ids", BTreeSet::from(["12345".to_string()]));
        let mut object = ManagedObject::new(data);
        object.create(&SiemSettingsResource, &meta).await.unwrap();
        assert_eq!(object.data().id(), Some("43253:7"));
        assert_eq!(
            object.data().required_set("security_policy_ids").unwrap(),
            BTreeSet::from(["12345".to_string()])
        );

        object.delete(&SiemSettingsResource, &meta).await.unwrap();
        assert_eq!(object.data().id(), None);
        fake.script.assert_done();
    }

    #[tokio::test]
    async fn delete_by_identifier_alone_fetches_siem_id() {
        let fake = Arc::new(FakeAppSec::default());
        fake.script.expect(
            "GetSiemSettings",
            GetSiemSettingsRequest {
                config_id: 43253,
                version: 7,
            },
            enabled(),
        );
        fake.script.expect("RemoveSiemSettings", disabled(), SiemSettingsResponse::default());
        let meta = ProviderMeta::new().with_appsec(fake.clone());

        let data = ResourceData::new(&SiemSettingsResource.schema()).with_id("43253:7");
        let mut object = ManagedObject::existing(data);
        object.delete(&SiemSettingsResource, &meta).await.unwrap();
        assert_eq!(object.data().id(), None);
        assert_eq!(fake.script.calls(), vec!["GetSiemSettings", "RemoveSiemSettings"]);
        fake.script.assert_done();
    }
}
