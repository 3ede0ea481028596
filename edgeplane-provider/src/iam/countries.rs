//! Countries accepted in user profiles

use std::collections::BTreeSet;

use async_trait::async_trait;

use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::api::SupportedCountriesRequest;
use crate::meta::ProviderMeta;

const NAME: &str = "iam_countries";

pub struct CountriesDataSource;

impl ResourceType for CountriesDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME).attribute(AttributeSchema::new("countries", AttributeType::Set).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for CountriesDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        let api = meta.iam()?;
        let countries = meta
            .call(NAME, "SupportedCountries", api.supported_countries(SupportedCountriesRequest))
            .await?;
        data.set("countries", countries.into_iter().collect::<BTreeSet<_>>())?;
        data.set_id("countries");
        Ok(())
    }
}
