//! `IamApi` over the REST client

use async_trait::async_trait;

use super::api::*;
use crate::client::{ClientError, RestClient};

const USERS_PATH: &str = "/identity-management/v3/user-admin/ui-identities";

#[derive(Debug, Clone)]
pub struct HttpIam {
    client: RestClient,
}

impl HttpIam {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IamApi for HttpIam {
    async fn create_user(&self, req: CreateUserRequest) -> Result<User, ClientError> {
        let query = [("sendEmail", req.send_email.to_string())];
        self.client.post(USERS_PATH, &query, &req).await
    }

    async fn get_user(&self, req: GetUserRequest) -> Result<User, ClientError> {
        let path = format!("{}/{}", USERS_PATH, req.identity_id);
        let query = [("authGrants", req.auth_grants.to_string())];
        self.client.get(&path, &query).await
    }

    async fn update_user_info(&self, req: UpdateUserInfoRequest) -> Result<UserBasicInfo, ClientError> {
        let path = format!("{}/{}/basic-info", USERS_PATH, req.identity_id);
        self.client.put(&path, &req.basic).await
    }

    async fn update_user_auth_grants(
        &self,
        req: UpdateUserAuthGrantsRequest,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let path = format!("{}/{}/auth-grants", USERS_PATH, req.identity_id);
        self.client.put(&path, &req.auth_grants).await
    }

    async fn remove_user(&self, req: RemoveUserRequest) -> Result<(), ClientError> {
        let path = format!("{}/{}", USERS_PATH, req.identity_id);
        self.client.delete(&path).await
    }

    async fn supported_countries(&self, _req: SupportedCountriesRequest) -> Result<Vec<String>, ClientError> {
        self.client
            .get("/identity-management/v3/user-admin/common/countries", &[])
            .await
    }
}
