//! Schema - Define attribute schemas for resources and data sources
//!
//! Each resource type declares its attributes as required, optional or
//! computed. Computed attributes are server-assigned and never sent upstream.

use std::collections::HashMap;
use std::fmt;

use crate::provider::{ProviderError, ProviderResult};
use crate::resource::{ResourceData, Value};

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Raw JSON document carried as a string
    Json,
    /// Unordered set of strings
    Set,
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Json, Value::String(s)) => serde_json::from_str::<serde_json::Value>(s)
                .map(|_| ())
                .map_err(|e| TypeError::ValidationFailed {
                    message: format!("Invalid JSON document: {}", e),
                }),

            (AttributeType::Set, v) if v.as_string_set().is_some() => Ok(()),

            (AttributeType::Custom { validate, base, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name().to_string(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Json => "Json".to_string(),
            AttributeType::Set => "Set<String>".to_string(),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Attribute '{name}' is computed and cannot be set")]
    ComputedAttribute { name: String },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

impl TypeError {
    /// Name of the offending attribute, when known
    pub fn attribute(&self) -> Option<&str> {
        match self {
            TypeError::MissingRequired { name }
            | TypeError::ComputedAttribute { name }
            | TypeError::AttributeError { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// How an attribute is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Server-assigned, read-only to the caller
    Computed,
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub presence: Presence,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            presence: Presence::Optional,
            default: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn computed(mut self) -> Self {
        self.presence = Presence::Computed;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_computed(&self) -> bool {
        self.presence == Presence::Computed
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Attributes the caller may set, sorted by name
    pub fn writable(&self) -> Vec<&AttributeSchema> {
        let mut attrs: Vec<_> = self
            .attributes
            .values()
            .filter(|a| !a.is_computed())
            .collect();
        attrs.sort_by(|a, b| a.name.cmp(&b.name));
        attrs
    }

    /// Fill in declared defaults for attributes the caller left out
    pub fn apply_defaults(&self, attributes: &mut HashMap<String, Value>) {
        for (name, schema) in &self.attributes {
            if let Some(default) = &schema.default
                && !attributes.contains_key(name)
            {
                attributes.insert(name.clone(), default.clone());
            }
        }
    }

    /// Validate caller-supplied attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        let mut names: Vec<_> = self.attributes.keys().collect();
        names.sort();
        for name in names {
            let schema = &self.attributes[name];
            if schema.is_required() && !attributes.contains_key(name) && schema.default.is_none()
            {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in attributes {
            let Some(schema) = self.attributes.get(name) else {
                // Unknown attributes are ignored
                continue;
            };
            if schema.is_computed() {
                errors.push(TypeError::ComputedAttribute { name: name.clone() });
            } else if let Err(e) = schema.attr_type.validate(value) {
                errors.push(TypeError::AttributeError {
                    name: name.clone(),
                    inner: Box::new(e),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate the caller-writable attributes of `data`
    ///
    /// Computed attributes carried over from an earlier read are skipped.
    /// The first error becomes a configuration error naming the attribute.
    pub fn check(&self, data: &ResourceData) -> ProviderResult<()> {
        let writable: HashMap<String, Value> = data
            .attributes()
            .iter()
            .filter(|(name, _)| self.attributes.get(*name).is_none_or(|a| !a.is_computed()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        match self.validate(&writable) {
            Ok(()) => Ok(()),
            Err(errors) => match errors.into_iter().next() {
                Some(first) => Err(ProviderError::configuration(
                    first.attribute().unwrap_or(&self.resource_type).to_string(),
                    first.to_string(),
                )),
                None => Ok(()),
            },
        }
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;
    use crate::id::DELIMITER;

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| {
                if let Value::Int(n) = value {
                    if *n > 0 {
                        Ok(())
                    } else {
                        Err("Value must be positive".to_string())
                    }
                } else {
                    Err("Expected integer".to_string())
                }
            },
        }
    }

    /// String usable as one component of a composite identifier
    pub fn key_component() -> AttributeType {
        AttributeType::Custom {
            name: "KeyComponent".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) if s.is_empty() => Err("Value must not be empty".to_string()),
                Value::String(s) if s.contains(DELIMITER) => {
                    Err(format!("Value must not contain '{}'", DELIMITER))
                }
                Value::String(_) => Ok(()),
                _ => Err("Expected string".to_string()),
            },
        }
    }

    /// Non-blank string
    pub fn not_blank() -> AttributeType {
        AttributeType::Custom {
            name: "NotBlank".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| match value {
                Value::String(s) if s.trim().is_empty() => {
                    Err("Value must not be blank".to_string())
                }
                _ => Ok(()),
            },
        }
    }

    pub fn string_enum(variants: &[&str]) -> AttributeType {
        AttributeType::Enum(variants.iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn validate_enum_type() {
        let t = types::string_enum(&["deny", "alert", "none"]);
        assert!(t.validate(&Value::String("deny".to_string())).is_ok());
        assert!(t.validate(&Value::String("block".to_string())).is_err());
    }

    #[test]
    fn validate_json_type() {
        let t = AttributeType::Json;
        assert!(t.validate(&Value::String(r#"{"name": "x"}"#.to_string())).is_ok());
        assert!(t.validate(&Value::String("{name".to_string())).is_err());
        assert!(t.validate(&Value::Int(1)).is_err());
    }

    #[test]
    fn validate_set_type_accepts_string_lists() {
        let t = AttributeType::Set;
        assert!(t.validate(&Value::from(vec!["a".to_string()])).is_ok());
        assert!(t.validate(&Value::List(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn validate_key_component() {
        let t = types::key_component();
        assert!(t.validate(&Value::String("AAAA_81230".to_string())).is_ok());
        assert!(t.validate(&Value::String("AAAA:81230".to_string())).is_err());
        assert!(t.validate(&Value::String(String::new())).is_err());
        assert!(t.validate(&Value::Int(1)).is_err());
    }

    #[test]
    fn validate_positive_int() {
        let t = types::positive_int();
        assert!(t.validate(&Value::Int(1)).is_ok());
        assert!(t.validate(&Value::Int(0)).is_err());
        assert!(t.validate(&Value::Int(-1)).is_err());
    }

    #[test]
    fn validate_resource_schema() {
        let schema = ResourceSchema::new("appsec_penalty_box")
            .attribute(AttributeSchema::new("config_id", types::positive_int()).required())
            .attribute(AttributeSchema::new("penalty_box_action", types::string_enum(&["deny", "alert", "none"])))
            .attribute(AttributeSchema::new("output_text", AttributeType::String).computed());

        let mut attrs = HashMap::new();
        attrs.insert("config_id".to_string(), Value::Int(43253));
        attrs.insert("penalty_box_action".to_string(), Value::String("deny".to_string()));
        assert!(schema.validate(&attrs).is_ok());

        attrs.insert("output_text".to_string(), Value::String("x".to_string()));
        let errors = schema.validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].attribute(), Some("output_text"));
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("appsec_selected_hostnames")
            .attribute(AttributeSchema::new("config_id", AttributeType::Int).required());

        let errors = schema.validate(&HashMap::new()).unwrap_err();
        assert!(matches!(&errors[0], TypeError::MissingRequired { name } if name == "config_id"));
    }

    #[test]
    fn writable_excludes_computed_attributes() {
        let schema = ResourceSchema::new("appsec_rate_protection")
            .attribute(AttributeSchema::new("enabled", AttributeType::Bool).required())
            .attribute(AttributeSchema::new("config_id", AttributeType::Int).required())
            .attribute(AttributeSchema::new("output_text", AttributeType::String).computed());

        let names: Vec<_> = schema.writable().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["config_id", "enabled"]);
    }

    #[test]
    fn apply_defaults_keeps_given_values() {
        let schema = ResourceSchema::new("networklist_activations").attribute(
            AttributeSchema::new("network", AttributeType::String)
                .with_default(Value::String("STAGING".to_string())),
        );
        let mut attrs = HashMap::new();
        schema.apply_defaults(&mut attrs);
        assert_eq!(attrs["network"], Value::String("STAGING".to_string()));

        attrs.insert("network".to_string(), Value::String("PRODUCTION".to_string()));
        schema.apply_defaults(&mut attrs);
        assert_eq!(attrs["network"], Value::String("PRODUCTION".to_string()));
    }

    #[test]
    fn check_skips_computed_and_names_the_field() {
        let schema = ResourceSchema::new("appsec_rate_protection")
            .attribute(AttributeSchema::new("config_id", AttributeType::Int).required())
            .attribute(AttributeSchema::new("enabled", AttributeType::Bool).required())
            .attribute(AttributeSchema::new("output_text", AttributeType::String).computed());

        let data = ResourceData::new(&schema)
            .with_attribute("config_id", 43253_i64)
            .with_attribute("enabled", true)
            .with_attribute("output_text", "table");
        assert!(schema.check(&data).is_ok());

        let data = ResourceData::new(&schema).with_attribute("enabled", true);
        match schema.check(&data) {
            Err(ProviderError::Configuration { field, .. }) => assert_eq!(field, "config_id"),
            other => panic!("unexpected: {:?}", other),
        }

        let data = ResourceData::new(&schema)
            .with_attribute("config_id", 43253_i64)
            .with_attribute("enabled", "yes");
        match schema.check(&data) {
            Err(ProviderError::Configuration { field, .. }) => assert_eq!(field, "enabled"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
