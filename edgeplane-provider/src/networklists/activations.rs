//! Activation of a network list on the staging or production network

use async_trait::async_trait;

use edgeplane_core::id::parse_part;
use edgeplane_core::provider::{ProviderResult, ResourceHandler, ResourceType};
use edgeplane_core::resource::{ResourceData, Value};
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{ActivationRequest, GetActivationsRequest};
use crate::meta::ProviderMeta;

const NAME: &str = "networklist_activations";
const NETWORKS: [&str; 2] = ["STAGING", "PRODUCTION"];

pub struct ActivationsResource;

impl ActivationsResource {
    fn request(data: &ResourceData, action: &str) -> ProviderResult<ActivationRequest> {
        Ok(ActivationRequest {
            network_list_id: data.required_string("network_list_id")?,
            action: action.to_string(),
            network: data
                .optional_string("network")?
                .unwrap_or_else(|| NETWORKS[0].to_string()),
            comments: data.optional_string("notes")?.unwrap_or_default(),
            notification_recipients: data
                .optional_set("notification_emails")?
                .map(|emails| emails.into_iter().collect())
                .unwrap_or_default(),
        })
    }

    async fn activate(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let request = Self::request(data, "ACTIVATE")?;
        let api = meta.networklists()?;
        let activation = meta
            .call(NAME, "CreateActivations", api.create_activations(request))
            .await?;
        log::info!(
            "{}: activation {} is {}",
            NAME,
            activation.activation_id,
            activation.status
        );
        data.set_id(activation.activation_id.to_string());
        Ok(())
    }
}

impl ResourceType for ActivationsResource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("network_list_id", types::not_blank()).required())
            .attribute(
                AttributeSchema::new("network", types::string_enum(&NETWORKS))
                    .with_default(Value::String(NETWORKS[0].to_string())),
            )
            .attribute(AttributeSchema::new("notes", AttributeType::String))
            .attribute(AttributeSchema::new("notification_emails", AttributeType::Set).required())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
    }
}

#[async_trait]
impl ResourceHandler<ProviderMeta> for ActivationsResource {
    async fn create(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.activate(meta, data).await
    }

    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let id = data.require_id()?;
        let activation_id: i64 = parse_part(id, id, "activation_id")?;
        let api = meta.networklists()?;
        let activation = meta
            .call(NAME, "GetActivations", api.get_activations(GetActivationsRequest { activation_id }))
            .await?;

        if !activation.network_list_id.is_empty() {
            data.set("network_list_id", activation.network_list_id)?;
        }
        if !activation.network.is_empty() {
            data.set("network", activation.network)?;
        }
        data.set("status", activation.status)
    }

    /// Activates again; the new activation replaces the identifier
    async fn update(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.activate(meta, data).await
    }

    async fn delete(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        if !data.contains("network_list_id") {
            self.read(meta, data).await?;
        }
        let request = Self::request(data, "DEACTIVATE")?;
        let api = meta.networklists()?;
        let activation = meta
            .call(NAME, "RemoveActivations", api.remove_activations(request))
            .await?;
        log::info!("{}: deactivation {} is {}", NAME, activation.activation_id, activation.status);
        Ok(())
    }
}
