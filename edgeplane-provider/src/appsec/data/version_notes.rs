//! Notes attached to a configuration version

use async_trait::async_trait;

use edgeplane_core::output::{OUTPUT_TEXT, set_output_text};
use edgeplane_core::payload::to_json_string;
use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::ResourceData;
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::appsec::api::GetVersionNotesRequest;
use crate::appsec::templates::templates;
use crate::meta::ProviderMeta;

const NAME: &str = "appsec_version_notes";

pub struct VersionNotesDataSource;

impl ResourceType for VersionNotesDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("version", types::positive_int()).required())
            .attribute(AttributeSchema::new("json", AttributeType::String).computed())
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed())
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for VersionNotesDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let config_id = data.required_int("config_id")?;
        let version = data.required_int("version")?;
        let api = meta.appsec()?;
        let notes = meta
            .call(
                NAME,
                "GetVersionNotes",
                api.get_version_notes(GetVersionNotesRequest { config_id, version }),
            )
            .await?;

        data.set("json", to_json_string("json", &notes)?)?;
        set_output_text(data, templates(), "versionNotesDS", &notes)?;
        data.set_id(config_id.to_string());
        Ok(())
    }
}
