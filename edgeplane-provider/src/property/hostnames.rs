//! Hostnames of the latest version of a property

use std::collections::HashMap;

use async_trait::async_trait;

use edgeplane_core::provider::{DataSourceHandler, ProviderResult, ResourceType};
use edgeplane_core::resource::{ResourceData, Value};
use edgeplane_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::api::{GetLatestVersionRequest, GetPropertyVersionHostnamesRequest, PropertyHostname};
use crate::meta::ProviderMeta;

const NAME: &str = "property_hostnames";

/// Prepend `prefix` unless the identifier already carries it
fn with_prefix(id: &str, prefix: &str) -> String {
    if id.starts_with(prefix) {
        id.to_string()
    } else {
        format!("{}{}", prefix, id)
    }
}

/// One hostname as a flat string map; certificate status fields are
/// prefixed with `cert_status_`
fn flatten(hostname: PropertyHostname) -> Value {
    let mut fields: HashMap<String, Value> = HashMap::from([
        ("cname_type".to_string(), hostname.cname_type.into()),
        ("edge_hostname_id".to_string(), hostname.edge_hostname_id.into()),
        ("cname_from".to_string(), hostname.cname_from.into()),
        ("cname_to".to_string(), hostname.cname_to.into()),
        ("cert_provisioning_type".to_string(), hostname.cert_provisioning_type.into()),
    ]);
    if let Some(status) = hostname.cert_status {
        fields.insert("cert_status_target".to_string(), status.target.into());
        if let Some(staging) = status.staging_status {
            fields.insert("cert_status_staging".to_string(), staging.into());
        }
        if let Some(production) = status.production_status {
            fields.insert("cert_status_production".to_string(), production.into());
        }
    }
    Value::Map(fields)
}

pub struct HostnamesDataSource;

impl ResourceType for HostnamesDataSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(NAME)
            .attribute(AttributeSchema::new("group_id", types::not_blank()).required())
            .attribute(AttributeSchema::new("contract_id", types::not_blank()).required())
            .attribute(AttributeSchema::new("property_id", types::not_blank()).required())
            .attribute(
                AttributeSchema::new("version", AttributeType::Int)
                    .computed()
                    .with_description("Always the latest version"),
            )
            .attribute(
                AttributeSchema::new(
                    "hostnames",
                    AttributeType::List(Box::new(AttributeType::Map(Box::new(AttributeType::String)))),
                )
                .computed(),
            )
    }
}

#[async_trait]
impl DataSourceHandler<ProviderMeta> for HostnamesDataSource {
    async fn read(&self, meta: &ProviderMeta, data: &mut ResourceData) -> ProviderResult<()> {
        self.schema().check(data)?;
        let group_id = with_prefix(&data.required_string("group_id")?, "grp_");
        let contract_id = with_prefix(&data.required_string("contract_id")?, "ctr_");
        let property_id = with_prefix(&data.required_string("property_id")?, "prp_");
        let api = meta.property()?;

        let latest = meta
            .call(
                NAME,
                "GetLatestVersion",
                api.get_latest_version(GetLatestVersionRequest {
                    property_id: property_id.clone(),
                    contract_id: contract_id.clone(),
                    group_id: group_id.clone(),
                }),
            )
            .await?;
        let version = latest.version.property_version;
        log::debug!("{}: latest version of {} is {}", NAME, property_id, version);

        let listing = meta
            .call(
                NAME,
                "GetPropertyVersionHostnames",
                api.get_property_version_hostnames(GetPropertyVersionHostnamesRequest {
                    property_id: property_id.clone(),
                    property_version: version,
                    contract_id,
                    group_id,
                    include_cert_status: true,
                }),
            )
            .await?;

        data.set("property_id", property_id.as_str())?;
        data.set("version", version)?;
        data.set(
            "hostnames",
            Value::List(listing.hostnames.into_iter().map(flatten).collect()),
        )?;
        data.set_id(format!("{}{}", property_id, version));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::property::api::{CertStatus, GetLatestVersionResponse, GetPropertyVersionHostnamesResponse, PropertyVersion};
    use crate::property::fake::FakeProperty;

    #[test]
    fn prefixes_added_once() {
        assert_eq!(with_prefix("12345", "prp_"), "prp_12345");
        assert_eq!(with_prefix("prp_12345", "prp_"), "prp_12345");
    }

    #[tokio::test]
    async fn lists_hostnames_of_latest_version() {
        let fake = Arc::new(FakeProperty::default());
        fake.script.expect(
            "GetLatestVersion",
            GetLatestVersionRequest {
                property_id: "prp_12345".to_string(),
                contract_id: "ctr_1-AB123".to_string(),
                group_id: "grp_42".to_string(),
            },
            GetLatestVersionResponse {
                property_id: "prp_12345".to_string(),
                version: PropertyVersion {
                    property_version: 3,
                    ..Default::default()
                },
            },
        );
        fake.script.expect(
            "GetPropertyVersionHostnames",
            GetPropertyVersionHostnamesRequest {
                property_id: "prp_12345".to_string(),
                property_version: 3,
                contract_id: "ctr_1-AB123".to_string(),
                group_id: "grp_42".to_string(),
                include_cert_status: true,
            },
            GetPropertyVersionHostnamesResponse {
                property_id: "prp_12345".to_string(),
                property_version: 3,
                hostnames: vec![PropertyHostname {
                    cname_type: "EDGE_HOSTNAME".to_string(),
                    edge_hostname_id: "ehn_1".to_string(),
                    cname_from: "www.example.com".to_string(),
                    cname_to: "www.example.com.edgesuite.net".to_string(),
                    cert_provisioning_type: "DEFAULT".to_string(),
                    cert_status: Some(CertStatus {
                        target: "www.example.com.edgesuite.net".to_string(),
                        staging_status: Some("PENDING".to_string()),
                        production_status: None,
                    }),
                }],
            },
        );
        let meta = ProviderMeta::new().with_property(fake.clone());

        let mut data = ResourceData::new(&HostnamesDataSource.schema())
            .with_attribute("group_id", "42")
            .with_attribute("contract_id", "ctr_1-AB123")
            .with_attribute("property_id", "12345");
        HostnamesDataSource.read(&meta, &mut data).await.unwrap();

        assert_eq!(data.id(), Some("prp_123453"));
        assert_eq!(data.required_int("version").unwrap(), 3);
        let Some(Value::List(hostnames)) = data.get("hostnames") else {
            panic!("hostnames not set");
        };
        let Value::Map(first) = &hostnames[0] else {
            panic!("hostname is not a map");
        };
        assert_eq!(first["cname_from"], Value::from("www.example.com"));
        assert_eq!(first["cert_status_staging"], Value::from("PENDING"));
        assert!(!first.contains_key("cert_status_production"));
        fake.script.assert_done();
    }
}
