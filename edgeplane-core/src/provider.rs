//! Provider - Traits abstracting resource operations
//!
//! A resource handler maps one remote object type onto an attribute set.
//! Handlers receive the provider metadata `M` (clients, caches,
//! cancellation) explicitly on every call.

use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;

use crate::context::CancellationToken;
use crate::resource::{ResourceData, Value};
use crate::schema::ResourceSchema;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for Provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Missing or invalid attribute, detected before any network call
    #[error("Invalid configuration for '{field}': {message}")]
    Configuration { field: String, message: String },

    /// Composite identifier does not have the expected shape
    #[error("Invalid identifier '{id}': expected {expected}")]
    Decode { id: String, expected: String },

    /// Failure returned by the upstream API client
    #[error("{object_type}: {operation} failed: {source}")]
    Upstream {
        object_type: String,
        operation: String,
        #[source]
        source: BoxError,
    },

    /// A computed attribute could not be written back into state
    #[error("Failed to set '{field}': {message}")]
    StateSet { field: String, message: String },

    #[error("{operation} cancelled before calling upstream")]
    Cancelled { operation: String },

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    /// Operation not permitted from the object's current lifecycle state
    #[error("Cannot {operation} while object is {status}")]
    InvalidState { operation: String, status: String },
}

impl ProviderError {
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::configuration(field, "required attribute is missing")
    }

    pub fn wrong_type(field: &str, expected: &str, got: &Value) -> Self {
        Self::configuration(
            field,
            format!("expected {}, got {}", expected, got.type_name()),
        )
    }

    pub fn upstream(
        object_type: impl Into<String>,
        operation: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Upstream {
            object_type: object_type.into(),
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// True for errors raised before any network call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Decode { .. } | Self::Cancelled { .. }
        )
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Issue one upstream call
///
/// Checks cancellation before the call is polled, logs the operation and
/// wraps client errors with the object type and operation name.
pub async fn upstream<T, E, F>(
    cancel: &CancellationToken,
    object_type: &str,
    operation: &str,
    call: F,
) -> ProviderResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    if cancel.is_cancelled() {
        log::warn!("{}: '{}' skipped, operation cancelled", object_type, operation);
        return Err(ProviderError::Cancelled {
            operation: operation.to_string(),
        });
    }
    log::debug!("{}: calling '{}'", object_type, operation);
    call.await.map_err(|e| {
        log::error!("{}: '{}' failed: {}", object_type, operation, e);
        ProviderError::upstream(object_type, operation, e)
    })
}

/// Definition of an object type this provider can handle
pub trait ResourceType: Send + Sync {
    /// Resource type name (e.g., "appsec_penalty_box")
    fn name(&self) -> &'static str;

    /// Attribute schema for this resource type
    fn schema(&self) -> ResourceSchema;
}

/// CRUD handler for one managed object type
///
/// `create` and `update` perform the upstream write only; callers refresh
/// computed attributes with `read` afterwards (see [`crate::lifecycle`]).
/// `delete` issues the remove call or the neutral write and leaves clearing
/// the identifier to the caller.
#[async_trait]
pub trait ResourceHandler<M: Sync>: ResourceType {
    /// Write a new object and set its composite identifier
    async fn create(&self, meta: &M, data: &mut ResourceData) -> ProviderResult<()>;

    /// Re-fetch the object by its identifier
    async fn read(&self, meta: &M, data: &mut ResourceData) -> ProviderResult<()>;

    /// Overwrite the object with the complete attribute set
    async fn update(&self, meta: &M, data: &mut ResourceData) -> ProviderResult<()>;

    async fn delete(&self, meta: &M, data: &mut ResourceData) -> ProviderResult<()>;
}

/// Read-only lookup
#[async_trait]
pub trait DataSourceHandler<M: Sync>: ResourceType {
    async fn read(&self, meta: &M, data: &mut ResourceData) -> ProviderResult<()>;
}
