//! Composite identifiers
//!
//! Managed objects are identified by key components joined with
//! [`DELIMITER`] in a fixed order per object type. `composite_key!`
//! generates a typed key struct with `encode` / `decode` for each shape.

use crate::provider::{ProviderError, ProviderResult};
use crate::resource::{ResourceData, Value};

pub const DELIMITER: char = ':';

/// One component of a composite identifier
pub trait KeyPart: Sized {
    fn parse_part(part: &str) -> Option<Self>;
    fn encode_part(&self) -> String;
    /// The attribute value holding this component
    fn to_value(&self) -> Value;
}

impl KeyPart for i64 {
    /// Only the canonical decimal form, so that decode then encode is lossless
    fn parse_part(part: &str) -> Option<Self> {
        let n: i64 = part.parse().ok()?;
        (n.to_string() == part).then_some(n)
    }

    fn encode_part(&self) -> String {
        self.to_string()
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl KeyPart for String {
    fn parse_part(part: &str) -> Option<Self> {
        if part.is_empty() {
            None
        } else {
            Some(part.to_string())
        }
    }

    fn encode_part(&self) -> String {
        self.clone()
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

/// Split `id` into exactly `parts` components
///
/// `format` names the components for the error message, e.g.
/// `"config_id:version:security_policy_id"`.
pub fn split_id<'a>(id: &'a str, parts: usize, format: &str) -> ProviderResult<Vec<&'a str>> {
    let components: Vec<&str> = id.split(DELIMITER).collect();
    if components.len() != parts {
        return Err(ProviderError::Decode {
            id: id.to_string(),
            expected: format.to_string(),
        });
    }
    Ok(components)
}

/// Parse one component, reporting the whole identifier on failure
pub fn parse_part<T: KeyPart>(id: &str, part: &str, format: &str) -> ProviderResult<T> {
    T::parse_part(part).ok_or_else(|| ProviderError::Decode {
        id: id.to_string(),
        expected: format.to_string(),
    })
}

/// Fail when `data` sets a key attribute to something other than `expected`
///
/// The components of an existing object cannot be rewritten in place; an
/// update that changes one would silently write to the old object.
pub fn ensure_part(data: &ResourceData, field: &str, expected: &Value, id: &str) -> ProviderResult<()> {
    match data.get(field) {
        Some(value) if value != expected => Err(ProviderError::configuration(
            field,
            format!(
                "cannot change {} to {} on existing object '{}'; delete and re-create it",
                expected.to_json(),
                value.to_json(),
                id
            ),
        )),
        _ => Ok(()),
    }
}

/// Define a typed composite key
///
/// ```
/// edgeplane_core::composite_key! {
///     /// config_id:version
///     pub struct VersionKey {
///         config_id: i64,
///         version: i64,
///     }
/// }
///
/// let key = VersionKey::decode("43253:7").unwrap();
/// assert_eq!(key.version, 7);
/// assert_eq!(key.encode(), "43253:7");
/// ```
#[macro_export]
macro_rules! composite_key {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident : $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            $(pub $field: $ty),+
        }

        impl $name {
            pub const PARTS: usize = [$(stringify!($field)),+].len();

            /// Component names joined by the delimiter
            pub fn format() -> String {
                let delimiter = $crate::id::DELIMITER.to_string();
                [$(stringify!($field)),+].join(delimiter.as_str())
            }

            pub fn encode(&self) -> String {
                let delimiter = $crate::id::DELIMITER.to_string();
                [$($crate::id::KeyPart::encode_part(&self.$field)),+].join(delimiter.as_str())
            }

            pub fn decode(id: &str) -> $crate::provider::ProviderResult<Self> {
                let format = Self::format();
                let parts = $crate::id::split_id(id, Self::PARTS, &format)?;
                let mut parts = parts.into_iter();
                Ok(Self {
                    $($field: {
                        let part = parts.next().unwrap_or_default();
                        $crate::id::parse_part::<$ty>(id, part, &format)?
                    }),+
                })
            }
        }

        impl $name {
            /// Decode the identifier of an existing object and check that
            /// the attributes in `data` still name the same object
            pub fn decode_unchanged(data: &$crate::resource::ResourceData) -> $crate::provider::ProviderResult<Self> {
                let id = data.require_id()?;
                let key = Self::decode(id)?;
                $(
                    $crate::id::ensure_part(
                        data,
                        stringify!($field),
                        &$crate::id::KeyPart::to_value(&key.$field),
                        id,
                    )?;
                )+
                Ok(key)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.encode())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::provider::ProviderError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::decode(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    composite_key! {
        struct PolicyKey {
            config_id: i64,
            version: i64,
            security_policy_id: String,
        }
    }

    composite_key! {
        struct ConfigKey {
            config_id: i64,
        }
    }

    #[test]
    fn encode_joins_components_in_order() {
        let key = PolicyKey {
            config_id: 43253,
            version: 7,
            security_policy_id: "AAAA_81230".to_string(),
        };
        assert_eq!(key.encode(), "43253:7:AAAA_81230");
        assert_eq!(key.to_string(), "43253:7:AAAA_81230");
    }

    #[test]
    fn decode_round_trips() {
        for id in ["43253:7:AAAA_81230", "1:1:x"] {
            let key = PolicyKey::decode(id).unwrap();
            assert_eq!(key.encode(), id);
            assert_eq!(PolicyKey::decode(&key.encode()).unwrap(), key);
        }
        let key: ConfigKey = "43253".parse().unwrap();
        assert_eq!(key.config_id, 43253);
    }

    #[test]
    fn decode_rejects_wrong_part_count() {
        for id in ["43253:7", "43253:7:AAAA_81230:extra", ""] {
            match PolicyKey::decode(id) {
                Err(ProviderError::Decode { id: got, expected }) => {
                    assert_eq!(got, id);
                    assert_eq!(expected, "config_id:version:security_policy_id");
                }
                other => panic!("Expected decode error for '{}', got {:?}", id, other),
            }
        }
    }

    #[test]
    fn decode_rejects_malformed_components() {
        assert!(matches!(
            PolicyKey::decode("abc:7:AAAA_81230"),
            Err(ProviderError::Decode { .. })
        ));
        assert!(matches!(
            PolicyKey::decode("43253:7:"),
            Err(ProviderError::Decode { .. })
        ));
        assert!(matches!(
            ConfigKey::decode("43253:7"),
            Err(ProviderError::Decode { .. })
        ));
        for id in ["+43253:7:AAAA_81230", "043253:7:AAAA_81230", "43253:07:AAAA_81230", "-0:7:x"] {
            assert!(
                matches!(PolicyKey::decode(id), Err(ProviderError::Decode { .. })),
                "'{}' should not decode",
                id
            );
        }
        assert_eq!(PolicyKey::decode("-5:0:x").unwrap().encode(), "-5:0:x");
    }

    fn data(id: &str) -> ResourceData {
        ResourceData::new(&crate::schema::ResourceSchema::new("thing")).with_id(id)
    }

    #[test]
    fn decode_unchanged_accepts_matching_or_absent_attributes() {
        let key = PolicyKey::decode_unchanged(
            &data("43253:7:AAAA_81230")
                .with_attribute("config_id", 43253_i64)
                .with_attribute("security_policy_id", "AAAA_81230"),
        )
        .unwrap();
        assert_eq!(key.version, 7);
    }

    #[test]
    fn decode_unchanged_rejects_changed_components() {
        let changed = [
            ("config_id", Value::Int(1)),
            ("version", Value::Int(8)),
            ("security_policy_id", Value::String("BBBB_1".to_string())),
        ];
        for (field, value) in changed {
            let data = data("43253:7:AAAA_81230").with_attribute(field, value);
            match PolicyKey::decode_unchanged(&data) {
                Err(ProviderError::Configuration { field: got, message }) => {
                    assert_eq!(got, field);
                    assert!(message.contains("43253:7:AAAA_81230"), "{}", message);
                }
                other => panic!("Expected configuration error for {}, got {:?}", field, other),
            }
        }

        let data = data("43253").with_attribute("config_id", "43253");
        assert!(matches!(
            ConfigKey::decode_unchanged(&data),
            Err(ProviderError::Configuration { .. })
        ));
    }

    #[test]
    fn split_id_checks_count() {
        assert_eq!(split_id("1:2", 2, "a:b").unwrap(), vec!["1", "2"]);
        assert!(split_id("1:2", 3, "a:b:c").is_err());
    }
}
