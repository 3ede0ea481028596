//! Network list activations

mod activations;
pub mod api;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;

pub use activations::ActivationsResource;
pub use api::NetworkListsApi;
pub use http::HttpNetworkLists;
