//! Configuration version resolution
//!
//! Reads use the latest version. Writes need a version that is not active
//! on either network; when the latest version is active it is cloned once
//! per run and every writer of that configuration shares the clone.

use edgeplane_core::provider::ProviderResult;

use super::api::{CreateConfigurationVersionCloneRequest, GetConfigurationRequest};
use crate::meta::ProviderMeta;

pub async fn latest_version(meta: &ProviderMeta, object_type: &str, config_id: i64) -> ProviderResult<i64> {
    let api = meta.appsec()?;
    let config = meta
        .call(
            object_type,
            "GetConfiguration",
            api.get_configuration(GetConfigurationRequest { config_id }),
        )
        .await?;
    Ok(config.latest_version)
}

pub async fn modifiable_version(meta: &ProviderMeta, object_type: &str, config_id: i64) -> ProviderResult<i64> {
    // Held across the upstream calls so concurrent writers clone only once
    let mut cache = meta.modifiable_versions.lock().await;
    if let Some(version) = cache.get(&config_id) {
        return Ok(*version);
    }

    let api = meta.appsec()?;
    let config = meta
        .call(
            object_type,
            "GetConfiguration",
            api.get_configuration(GetConfigurationRequest { config_id }),
        )
        .await?;

    let version = if config.is_active(config.latest_version) {
        let clone = meta
            .call(
                object_type,
                "CreateConfigurationVersionClone",
                api.create_configuration_version_clone(CreateConfigurationVersionCloneRequest {
                    config_id,
                    create_from_version: config.latest_version,
                    rule_update: false,
                }),
            )
            .await?;
        log::info!(
            "{}: cloned active version {} of config {} as version {}",
            object_type,
            config.latest_version,
            config_id,
            clone.version
        );
        clone.version
    } else {
        config.latest_version
    };

    cache.insert(config_id, version);
    Ok(version)
}

/// Version given by the caller, else the modifiable one
pub async fn write_version(
    meta: &ProviderMeta,
    object_type: &str,
    config_id: i64,
    version: Option<i64>,
) -> ProviderResult<i64> {
    match version {
        Some(version) => Ok(version),
        None => modifiable_version(meta, object_type, config_id).await,
    }
}
