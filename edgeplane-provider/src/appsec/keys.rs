//! Composite identifiers of application security objects

use edgeplane_core::composite_key;
use edgeplane_core::id::{DELIMITER, ensure_part, parse_part};
use edgeplane_core::provider::{ProviderError, ProviderResult};
use edgeplane_core::resource::{ResourceData, Value};

use super::api::PolicyRequest;

composite_key! {
    /// Objects keyed by their configuration alone
    pub struct ConfigKey {
        config_id: i64,
    }
}

composite_key! {
    pub struct VersionKey {
        config_id: i64,
        version: i64,
    }
}

composite_key! {
    /// Per-policy settings of one configuration version
    pub struct PolicyKey {
        config_id: i64,
        version: i64,
        security_policy_id: String,
    }
}

impl PolicyKey {
    pub fn request(&self) -> PolicyRequest {
        PolicyRequest {
            config_id: self.config_id,
            version: self.version,
            policy_id: self.security_policy_id.clone(),
        }
    }
}

composite_key! {
    /// Per-policy settings that always track the latest version
    pub struct ConfigPolicyKey {
        config_id: i64,
        security_policy_id: String,
    }
}

composite_key! {
    pub struct ReputationProfileKey {
        config_id: i64,
        reputation_profile_id: i64,
    }
}

composite_key! {
    pub struct ReputationProfileActionKey {
        config_id: i64,
        version: i64,
        security_policy_id: String,
        reputation_profile_id: i64,
    }
}

composite_key! {
    pub struct MatchTargetKey {
        config_id: i64,
        version: i64,
        match_target_id: i64,
    }
}

composite_key! {
    pub struct RuleKey {
        config_id: i64,
        version: i64,
        security_policy_id: String,
        rule_id: i64,
    }
}

/// `config_id` or `config_id:security_policy_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PragmaKey {
    pub config_id: i64,
    pub security_policy_id: Option<String>,
}

impl PragmaKey {
    const FORMAT: &'static str = "config_id[:security_policy_id]";

    pub fn encode(&self) -> String {
        match &self.security_policy_id {
            Some(policy) => format!("{}{}{}", self.config_id, DELIMITER, policy),
            None => self.config_id.to_string(),
        }
    }

    pub fn decode(id: &str) -> ProviderResult<Self> {
        let parts: Vec<&str> = id.split(DELIMITER).collect();
        match parts.as_slice() {
            [config] => Ok(Self {
                config_id: parse_part(id, config, Self::FORMAT)?,
                security_policy_id: None,
            }),
            [config, policy] => Ok(Self {
                config_id: parse_part(id, config, Self::FORMAT)?,
                security_policy_id: Some(parse_part(id, policy, Self::FORMAT)?),
            }),
            _ => Err(ProviderError::Decode {
                id: id.to_string(),
                expected: Self::FORMAT.to_string(),
            }),
        }
    }

    /// Decode and check that `data` still names the same scope
    pub fn decode_unchanged(data: &ResourceData) -> ProviderResult<Self> {
        let id = data.require_id()?;
        let key = Self::decode(id)?;
        ensure_part(data, "config_id", &Value::Int(key.config_id), id)?;
        let policy = data.optional_string("security_policy_id")?;
        if policy != key.security_policy_id {
            return Err(ProviderError::configuration(
                "security_policy_id",
                format!(
                    "cannot move existing object '{}' to {}; delete and re-create it",
                    id,
                    match &policy {
                        Some(p) => format!("policy '{}'", p),
                        None => "the configuration level".to_string(),
                    }
                ),
            ));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for id in ["43253:7:AAAA_81230:12345", "1:2:p:3"] {
            assert_eq!(ReputationProfileActionKey::decode(id).unwrap().encode(), id);
            assert_eq!(RuleKey::decode(id).unwrap().encode(), id);
        }
        assert_eq!(MatchTargetKey::decode("43253:7:2971336").unwrap().match_target_id, 2971336);
        assert_eq!(ConfigPolicyKey::decode("43253:AAAA_81230").unwrap().encode(), "43253:AAAA_81230");
        assert_eq!(ReputationProfileKey::decode("43253:12345").unwrap().encode(), "43253:12345");
    }

    #[test]
    fn pragma_key_policy_is_optional() {
        let key = PragmaKey::decode("43253").unwrap();
        assert_eq!(key.security_policy_id, None);
        assert_eq!(key.encode(), "43253");

        let key = PragmaKey::decode("43253:AAAA_81230").unwrap();
        assert_eq!(key.security_policy_id.as_deref(), Some("AAAA_81230"));
        assert_eq!(key.encode(), "43253:AAAA_81230");

        assert!(PragmaKey::decode("43253:7:AAAA_81230").is_err());
        assert!(PragmaKey::decode("x").is_err());
    }

    fn data(id: &str) -> ResourceData {
        ResourceData::new(&edgeplane_core::schema::ResourceSchema::new("thing")).with_id(id)
    }

    fn changed_field(result: ProviderResult<impl std::fmt::Debug>) -> String {
        match result {
            Err(ProviderError::Configuration { field, .. }) => field,
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn every_key_shape_refuses_changed_components() {
        let id = "43253:7:AAAA_81230:12345";
        let base = || data(id).with_attribute("security_policy_id", "AAAA_81230");
        assert_eq!(
            changed_field(ReputationProfileActionKey::decode_unchanged(&base().with_attribute("reputation_profile_id", 1_i64))),
            "reputation_profile_id"
        );
        assert_eq!(
            changed_field(RuleKey::decode_unchanged(&base().with_attribute("rule_id", 1_i64))),
            "rule_id"
        );
        assert!(RuleKey::decode_unchanged(&base().with_attribute("rule_id", 12345_i64)).is_ok());

        assert_eq!(
            changed_field(MatchTargetKey::decode_unchanged(&data("43253:7:2971336").with_attribute("match_target_id", 1_i64))),
            "match_target_id"
        );
        assert_eq!(
            changed_field(ReputationProfileKey::decode_unchanged(&data("43253:12345").with_attribute("config_id", 1_i64))),
            "config_id"
        );
        assert_eq!(
            changed_field(ConfigPolicyKey::decode_unchanged(&data("43253:AAAA_81230").with_attribute("security_policy_id", "B"))),
            "security_policy_id"
        );
        assert_eq!(
            changed_field(VersionKey::decode_unchanged(&data("43253:7").with_attribute("version", 6_i64))),
            "version"
        );
        assert_eq!(
            changed_field(ConfigKey::decode_unchanged(&data("43253").with_attribute("config_id", 43254_i64))),
            "config_id"
        );
    }

    #[test]
    fn pragma_key_refuses_scope_change() {
        let config_level = data("43253").with_attribute("config_id", 43253_i64);
        assert!(PragmaKey::decode_unchanged(&config_level).is_ok());
        assert_eq!(
            changed_field(PragmaKey::decode_unchanged(
                &config_level.clone().with_attribute("security_policy_id", "AAAA_81230")
            )),
            "security_policy_id"
        );

        let policy_level = data("43253:AAAA_81230").with_attribute("config_id", 43253_i64);
        assert_eq!(
            changed_field(PragmaKey::decode_unchanged(&policy_level)),
            "security_policy_id"
        );
        assert!(
            PragmaKey::decode_unchanged(&policy_level.with_attribute("security_policy_id", "AAAA_81230")).is_ok()
        );
    }

    #[test]
    fn rule_key_rejects_non_numeric_rule() {
        assert!(matches!(
            RuleKey::decode("43253:7:AAAA_81230:rule"),
            Err(ProviderError::Decode { .. })
        ));
    }
}
