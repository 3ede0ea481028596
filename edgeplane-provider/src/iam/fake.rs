//! Scripted `IamApi` double

use async_trait::async_trait;

use super::api::*;
use crate::client::ClientError;
use crate::fake::Script;

#[derive(Default)]
pub struct FakeIam {
    pub script: Script,
}

#[async_trait]
impl IamApi for FakeIam {
    async fn create_user(&self, req: CreateUserRequest) -> Result<User, ClientError> {
        self.script.call("CreateUser", &req)
    }

    async fn get_user(&self, req: GetUserRequest) -> Result<User, ClientError> {
        self.script.call("GetUser", &req)
    }

    async fn update_user_info(&self, req: UpdateUserInfoRequest) -> Result<UserBasicInfo, ClientError> {
        self.script.call("UpdateUserInfo", &req)
    }

    async fn update_user_auth_grants(
        &self,
        req: UpdateUserAuthGrantsRequest,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        self.script.call("UpdateUserAuthGrants", &req)
    }

    async fn remove_user(&self, req: RemoveUserRequest) -> Result<(), ClientError> {
        self.script.call("RemoveUser", &req)
    }

    async fn supported_countries(&self, req: SupportedCountriesRequest) -> Result<Vec<String>, ClientError> {
        self.script.call("SupportedCountries", &req)
    }
}
