//! Resource - Attribute values and the per-object attribute bag
//!
//! `ResourceData` is the generic attribute map exchanged with the host
//! runtime. Handlers translate it to and from typed structs through the
//! `required_*` / `optional_*` getters and `set`.

use std::collections::{BTreeSet, HashMap};

use crate::provider::{ProviderError, ProviderResult};
use crate::schema::{AttributeType, ResourceSchema};

/// Attribute value of a managed object
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    /// Unordered collection of strings (hostnames, e-mail addresses)
    Set(BTreeSet<String>),
    Map(HashMap<String, Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strings of a list or set, `None` if any element is not a string
    pub fn as_string_set(&self) -> Option<BTreeSet<String>> {
        match self {
            Value::Set(items) => Some(items.clone()),
            Value::List(items) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// Convert from JSON; arrays become lists, objects become maps
    ///
    /// `null` at the top level or as an object member means "not set" and
    /// yields `None` / an absent key. Fractional numbers and `null` list
    /// items have no attribute representation and are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Option<Value>, String> {
        match json {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Bool(b) => Ok(Some(Value::Bool(*b))),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(|n| Some(Value::Int(n)))
                .ok_or_else(|| format!("{} is not an integer", n)),
            serde_json::Value::String(s) => Ok(Some(Value::String(s.clone()))),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    Value::from_json(item)?.ok_or_else(|| format!("list item {} is null", i))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|items| Some(Value::List(items))),
            serde_json::Value::Object(map) => {
                let mut values = HashMap::new();
                for (k, v) in map {
                    if let Some(v) = Value::from_json(v).map_err(|e| format!("{}: {}", k, e))? {
                        values.insert(k.clone(), v);
                    }
                }
                Ok(Some(Value::Map(values)))
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => items.iter().map(Value::to_json).collect(),
            Value::Set(items) => items.iter().cloned().map(serde_json::Value::String).collect(),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(items: BTreeSet<String>) -> Self {
        Value::Set(items)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::String).collect())
    }
}

/// Attribute bag of one managed object or data source
#[derive(Debug, Clone)]
pub struct ResourceData {
    pub resource_type: String,
    id: Option<String>,
    attributes: HashMap<String, Value>,
    types: HashMap<String, AttributeType>,
}

/// Declared types come from the schema and take no part in equality
impl PartialEq for ResourceData {
    fn eq(&self, other: &Self) -> bool {
        self.resource_type == other.resource_type
            && self.id == other.id
            && self.attributes == other.attributes
    }
}

impl ResourceData {
    pub fn new(schema: &ResourceSchema) -> Self {
        Self {
            resource_type: schema.resource_type.clone(),
            id: None,
            attributes: HashMap::new(),
            types: schema
                .attributes
                .iter()
                .map(|(name, attr)| (name.clone(), attr.attr_type.clone()))
                .collect(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: HashMap<String, Value>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Identifier of an object that must already exist
    pub fn require_id(&self) -> ProviderResult<&str> {
        self.id.as_deref().ok_or_else(|| ProviderError::Decode {
            id: String::new(),
            expected: "a non-empty identifier".to_string(),
        })
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Write an attribute back into state
    ///
    /// Fails with a state-set error when the attribute is not declared by
    /// the schema or the value does not fit its declared type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> ProviderResult<()> {
        let value = value.into();
        let Some(attr_type) = self.types.get(name) else {
            return Err(ProviderError::StateSet {
                field: name.to_string(),
                message: format!("attribute is not declared by '{}'", self.resource_type),
            });
        };
        attr_type
            .validate(&value)
            .map_err(|e| ProviderError::StateSet {
                field: name.to_string(),
                message: e.to_string(),
            })?;
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Set the attribute only when a value is present
    pub fn set_optional<V: Into<Value>>(&mut self, name: &str, value: Option<V>) -> ProviderResult<()> {
        match value {
            Some(v) => self.set(name, v),
            None => {
                self.attributes.remove(name);
                Ok(())
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    pub fn required_string(&self, name: &str) -> ProviderResult<String> {
        self.optional_string(name)?
            .ok_or_else(|| ProviderError::missing(name))
    }

    pub fn optional_string(&self, name: &str) -> ProviderResult<Option<String>> {
        match self.attributes.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ProviderError::wrong_type(name, "String", other)),
        }
    }

    pub fn required_int(&self, name: &str) -> ProviderResult<i64> {
        self.optional_int(name)?
            .ok_or_else(|| ProviderError::missing(name))
    }

    pub fn optional_int(&self, name: &str) -> ProviderResult<Option<i64>> {
        match self.attributes.get(name) {
            None => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(ProviderError::wrong_type(name, "Int", other)),
        }
    }

    pub fn required_bool(&self, name: &str) -> ProviderResult<bool> {
        self.optional_bool(name)?
            .ok_or_else(|| ProviderError::missing(name))
    }

    pub fn optional_bool(&self, name: &str) -> ProviderResult<Option<bool>> {
        match self.attributes.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(ProviderError::wrong_type(name, "Bool", other)),
        }
    }

    pub fn required_set(&self, name: &str) -> ProviderResult<BTreeSet<String>> {
        self.optional_set(name)?
            .ok_or_else(|| ProviderError::missing(name))
    }

    pub fn optional_set(&self, name: &str) -> ProviderResult<Option<BTreeSet<String>>> {
        match self.attributes.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_string_set()
                .map(Some)
                .ok_or_else(|| ProviderError::wrong_type(name, "Set<String>", value)),
        }
    }

    /// List of strings, preserving order
    pub fn optional_string_list(&self, name: &str) -> ProviderResult<Option<Vec<String>>> {
        match self.attributes.get(name) {
            None => Ok(None),
            Some(Value::List(items)) => items
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ProviderError::wrong_type(name, "List<String>", v))
                })
                .collect::<ProviderResult<Vec<_>>>()
                .map(Some),
            Some(Value::Set(items)) => Ok(Some(items.iter().cloned().collect())),
            Some(other) => Err(ProviderError::wrong_type(name, "List<String>", other)),
        }
    }

    /// Raw JSON payload attribute, checked for being well-formed
    pub fn required_json(&self, name: &str) -> ProviderResult<serde_json::Value> {
        let raw = self.required_string(name)?;
        crate::payload::parse_json(name, &raw)
    }

    /// Attributes serialized as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut attributes: serde_json::Map<String, serde_json::Value> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        if let Some(id) = &self.id {
            attributes.insert("id".to_string(), serde_json::Value::String(id.clone()));
        }
        serde_json::Value::Object(attributes)
    }
}
