//! `PropertyApi` over the REST client

use async_trait::async_trait;

use super::api::*;
use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone)]
pub struct HttpProperty {
    client: RestClient,
}

impl HttpProperty {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PropertyApi for HttpProperty {
    async fn get_latest_version(&self, req: GetLatestVersionRequest) -> Result<GetLatestVersionResponse, ClientError> {
        let path = format!("/papi/v1/properties/{}/versions/latest", req.property_id);
        let query = [("contractId", req.contract_id), ("groupId", req.group_id)];
        self.client.get(&path, &query).await
    }

    async fn get_property_version_hostnames(
        &self,
        req: GetPropertyVersionHostnamesRequest,
    ) -> Result<GetPropertyVersionHostnamesResponse, ClientError> {
        let path = format!(
            "/papi/v1/properties/{}/versions/{}/hostnames",
            req.property_id, req.property_version
        );
        let query = [
            ("contractId", req.contract_id),
            ("groupId", req.group_id),
            ("includeCertStatus", req.include_cert_status.to_string()),
        ];
        self.client.get(&path, &query).await
    }
}
