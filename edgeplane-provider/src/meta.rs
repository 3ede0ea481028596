//! Provider metadata handed to every resource handler call
//!
//! Holds the upstream clients, the cancellation flag and the per-run cache
//! of modifiable configuration versions.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use edgeplane_core::config::ProviderConfig;
use edgeplane_core::context::CancellationToken;
use edgeplane_core::provider::{ProviderError, ProviderResult, upstream};

use crate::appsec::{AppSecApi, HttpAppSec};
use crate::client::{ClientError, RestClient};
use crate::iam::{HttpIam, IamApi};
use crate::networklists::{HttpNetworkLists, NetworkListsApi};
use crate::property::{HttpProperty, PropertyApi};

#[derive(Default)]
pub struct ProviderMeta {
    appsec: Option<Arc<dyn AppSecApi>>,
    iam: Option<Arc<dyn IamApi>>,
    networklists: Option<Arc<dyn NetworkListsApi>>,
    property: Option<Arc<dyn PropertyApi>>,
    cancel: CancellationToken,
    /// config_id -> version safe to write during this run
    pub(crate) modifiable_versions: Mutex<HashMap<i64, i64>>,
}

impl ProviderMeta {
    /// Metadata without any client; add them with the `with_*` builders
    pub fn new() -> Self {
        Self::default()
    }

    /// HTTP clients for every API family
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ClientError> {
        let client = RestClient::from_config(config)?;
        Ok(Self::new()
            .with_appsec(Arc::new(HttpAppSec::new(client.clone())))
            .with_iam(Arc::new(HttpIam::new(client.clone())))
            .with_networklists(Arc::new(HttpNetworkLists::new(client.clone())))
            .with_property(Arc::new(HttpProperty::new(client))))
    }

    pub fn with_appsec(mut self, api: Arc<dyn AppSecApi>) -> Self {
        self.appsec = Some(api);
        self
    }

    pub fn with_iam(mut self, api: Arc<dyn IamApi>) -> Self {
        self.iam = Some(api);
        self
    }

    pub fn with_networklists(mut self, api: Arc<dyn NetworkListsApi>) -> Self {
        self.networklists = Some(api);
        self
    }

    pub fn with_property(mut self, api: Arc<dyn PropertyApi>) -> Self {
        self.property = Some(api);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn appsec(&self) -> ProviderResult<&dyn AppSecApi> {
        self.appsec.as_deref().ok_or_else(|| not_configured("appsec"))
    }

    pub fn iam(&self) -> ProviderResult<&dyn IamApi> {
        self.iam.as_deref().ok_or_else(|| not_configured("iam"))
    }

    pub fn networklists(&self) -> ProviderResult<&dyn NetworkListsApi> {
        self.networklists
            .as_deref()
            .ok_or_else(|| not_configured("networklists"))
    }

    pub fn property(&self) -> ProviderResult<&dyn PropertyApi> {
        self.property.as_deref().ok_or_else(|| not_configured("property"))
    }

    /// Issue one upstream call, honouring cancellation
    pub async fn call<T, F>(&self, object_type: &str, operation: &str, call: F) -> ProviderResult<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        upstream(&self.cancel, object_type, operation, call).await
    }
}

fn not_configured(family: &str) -> ProviderError {
    ProviderError::configuration(family, "API client is not configured")
}
