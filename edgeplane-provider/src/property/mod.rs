//! Property hostnames

pub mod api;
#[cfg(test)]
pub(crate) mod fake;
mod hostnames;
pub mod http;

pub use api::PropertyApi;
pub use hostnames::HostnamesDataSource;
pub use http::HttpProperty;
