//! Identity and access management

pub mod api;
mod countries;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;
mod user;

pub use api::IamApi;
pub use countries::CountriesDataSource;
pub use http::HttpIam;
pub use user::UserResource;
