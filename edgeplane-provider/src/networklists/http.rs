//! `NetworkListsApi` over the REST client

use async_trait::async_trait;

use super::api::*;
use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone)]
pub struct HttpNetworkLists {
    client: RestClient,
}

impl HttpNetworkLists {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn activation(&self, req: &ActivationRequest) -> Result<ActivationsResponse, ClientError> {
        let path = format!(
            "/network-list/v2/network-lists/{}/environments/{}/{}",
            req.network_list_id,
            req.network,
            req.action.to_lowercase()
        );
        self.client.post(&path, &[], req).await
    }
}

#[async_trait]
impl NetworkListsApi for HttpNetworkLists {
    async fn get_activations(&self, req: GetActivationsRequest) -> Result<ActivationsResponse, ClientError> {
        let path = format!("/network-list/v2/network-lists/activations/{}", req.activation_id);
        self.client.get(&path, &[]).await
    }

    async fn create_activations(&self, req: CreateActivationsRequest) -> Result<ActivationsResponse, ClientError> {
        self.activation(&req).await
    }

    async fn remove_activations(&self, req: RemoveActivationsRequest) -> Result<ActivationsResponse, ClientError> {
        self.activation(&req).await
    }
}
