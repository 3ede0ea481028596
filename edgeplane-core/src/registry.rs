//! Lookup of resource and data source handlers by type name

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::provider::{DataSourceHandler, ProviderError, ProviderResult, ResourceHandler};

pub struct Registry<M: Sync> {
    resources: BTreeMap<&'static str, Arc<dyn ResourceHandler<M>>>,
    data_sources: BTreeMap<&'static str, Arc<dyn DataSourceHandler<M>>>,
}

impl<M: Sync> Default for Registry<M> {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        }
    }
}

impl<M: Sync> Registry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource(mut self, handler: impl ResourceHandler<M> + 'static) -> Self {
        self.resources.insert(handler.name(), Arc::new(handler));
        self
    }

    pub fn data_source(mut self, handler: impl DataSourceHandler<M> + 'static) -> Self {
        self.data_sources.insert(handler.name(), Arc::new(handler));
        self
    }

    pub fn get_resource(&self, name: &str) -> ProviderResult<Arc<dyn ResourceHandler<M>>> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResourceType(name.to_string()))
    }

    pub fn get_data_source(&self, name: &str) -> ProviderResult<Arc<dyn DataSourceHandler<M>>> {
        self.data_sources
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResourceType(name.to_string()))
    }

    /// Resource type names, sorted
    pub fn resource_names(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    /// Data source type names, sorted
    pub fn data_source_names(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }
}
