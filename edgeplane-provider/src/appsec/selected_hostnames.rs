//! Hostnames protected by a configuration
//!
//! The caller's hostnames are combined with the current remote set under a
//! reconciliation mode before they are written. The current set is read
//! from the latest version; the result goes to the modifiable version.

use std::collections::BTreeSet;

use async_trait::async_trait;

use edgeplane_core::provider::{ProviderError, ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::reconcile::{Mode, reconcile};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{GetSelectedHostnamesRequest, Hostname, UpdateSelectedHostnamesRequest};
use super::keys::ConfigKey;
use super::version::{latest_version, modifiable_version};
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_selected_hostnames";

#[derive(Debug, Clone, PartialEq)]
struct SelectedHostnames {
    config_id: i64,
    hostnames: BTreeSet<String>,
    mode: Mode,
}

impl SelectedHostnames {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        let mode = data.required_string("mode")?;
        Ok(Self {
            config_id: data.required_int("config_id")?,
            hostnames: data.required_set("hostnames")?,
            mode: mode
                .parse()
                .map_err(|e: String| ProviderError::configuration("mode", e))?,
        })
    }
}

pub struct SelectedHostnamesResource;

impl SelectedHostnamesResource {
    async fn current(&self, meta: &ProviderMeta, config_id: i64) -> ProviderResult<BTreeSet<String>> {
        let version = latest_version(meta, NAME, config_id).await?;
        let api = meta.appsec()?;
        let response = meta
            .call(
                NAME,
                "GetSelectedHostnames",
                api.get_selected_hostnames(GetSelectedHostnamesRequest { config_id, version }),
            )
            .await?;
        Ok(response.hostname_list.into_iter().map(|h| h.hostname).collect())
    }

    async fn write(&self, meta: &ProviderMeta, attrs: SelectedHostnames) -> ProviderResult<()> {
        let current = self.current(meta, attrs.config_id).await?;
        let hostnames = reconcile(&current, &attrs.hostnames, attrs.mode);
        log::debug!(
            "{}: {} of {} hostnames against {} current",
            NAME,
            attrs.mode,
            attrs.hostnames.len(),
            current.len()
        );

        let version = modifiable_version(meta, NAME, attrs.config_id).await?;
        let api = meta.appsec()?;
        meta.call(
            NAME,
            "UpdateSelectedHostnames",
            api.update_selected_hostnames(UpdateSelectedHostnamesRequest {
                config_id: attrs.config_id,
                version,
                hostname_list: hostnames.into_iter().map(|hostname| Hostname { hostname }).collect(),
            }),
        )
        .await?;
        Ok(())
    }
}

impl ResourceType for SelectedHostnamesResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("hostnames", AttributeType::Set).required())
            .attribute(
                AttributeSchema::new("mode", types::string_enum(&Mode::VARIANTS))
                    .required()
                    .with_description("How hostnames combine with the current set"),
            )
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for SelectedHostnamesResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let attrs = SelectedHostnames::from_data(data)?;
        let key = ConfigKey {
            config_id: attrs.config_id,
        };
        self.write(meta, attrs).await?;
        data.set_id(key.encode());
        Ok(())
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let key = ConfigKey::decode(data.require_id()?)?;
        let hostnames = self.current(meta, key.config_id).await?;

        data.set("config_id", key.config_id)?;
        data.set("hostnames", hostnames)?;
        // The upstream does not report a mode
        if !data.contains("mode") {
            data.set("mode", Mode::Replace.as_str())?;
        }
        Ok(())
    }

    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        ConfigKey::decode_unchanged(data)?;
        let attrs = SelectedHostnames::from_data(data)?;
        self.write(meta, attrs).await
    }

    /// Only forgets the object; the hostnames stay selected upstream
    async fn delete(&self, _meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        ConfigKey::decode(data.require_id()?)?;
        Ok(())
    }
}
