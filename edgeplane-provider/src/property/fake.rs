//! Scripted `PropertyApi` double

use async_trait::async_trait;

use super::api::*;
use crate::client::ClientError;
use crate::fake::Script;

#[derive(Default)]
pub struct FakeProperty {
    pub script: Script,
}

#[async_trait]
impl PropertyApi for FakeProperty {
    async fn get_latest_version(&self, req: GetLatestVersionRequest) -> Result<GetLatestVersionResponse, ClientError> {
        self.script.call("GetLatestVersion", &req)
    }

    async fn get_property_version_hostnames(
        &self,
        req: GetPropertyVersionHostnamesRequest,
    ) -> Result<GetPropertyVersionHostnamesResponse, ClientError> {
        self.script.call("GetPropertyVersionHostnames", &req)
    }
}
