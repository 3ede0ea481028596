//! Scripted `NetworkListsApi` double

use async_trait::async_trait;

use super::api::*;
use crate::client::ClientError;
use crate::fake::Script;

#[derive(Default)]
pub struct FakeNetworkLists {
    pub script: Script,
}

#[async_trait]
impl NetworkListsApi for FakeNetworkLists {
    async fn get_activations(&self, req: GetActivationsRequest) -> Result<ActivationsResponse, ClientError> {
        self.script.call("GetActivations", &req)
    }

    async fn create_activations(&self, req: CreateActivationsRequest) -> Result<ActivationsResponse, ClientError> {
        self.script.call("CreateActivations", &req)
    }

    async fn remove_activations(&self, req: RemoveActivationsRequest) -> Result<ActivationsResponse, ClientError> {
        self.script.call("RemoveActivations", &req)
    }
}
