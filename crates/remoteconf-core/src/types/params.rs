//! RC parameter and result values
//!
//! Inputs and outputs of every RC call are `Params`: a string-keyed map whose
//! values are a small tagged variant. Handlers pattern-match on `Value`
//! rather than coercing at runtime, and each getter reports a shape mismatch
//! as an explicit error.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::error_kind::ErrorKind;

/// A single RC value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    List(Vec<Value>),
    Params(Params),
}

/// Shape of a `Value`, used by schema checks and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    String,
    Bool,
    List,
    Params,
}

impl ValueShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueShape::String => "string",
            ValueShape::Bool => "bool",
            ValueShape::List => "list",
            ValueShape::Params => "object",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn shape(&self) -> ValueShape {
        match self {
            Value::String(_) => ValueShape::String,
            Value::Bool(_) => ValueShape::Bool,
            Value::List(_) => ValueShape::List,
            Value::Params(_) => ValueShape::Params,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_params(&self) -> Option<&Params> {
        match self {
            Value::Params(p) => Some(p),
            _ => None,
        }
    }

    /// Render a scalar as the string stored in a config section.
    ///
    /// Lists and nested maps have no flat representation and return `None`.
    pub fn to_config_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::List(_) | Value::Params(_) => None,
        }
    }

    /// Convert into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Params(p) => p.to_json(),
        }
    }

    /// Convert from a JSON value. Numbers become strings; `null` is rejected.
    pub fn from_json(key: &str, json: serde_json::Value) -> ParamsResult<Self> {
        Ok(match json {
            serde_json::Value::Null => return Err(ParamsError::Null(key.to_string())),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::String(n.to_string()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| Value::from_json(key, item))
                    .collect::<ParamsResult<Vec<_>>>()?,
            ),
            serde_json::Value::Object(map) => Value::Params(Params::from_json_map(map)?),
        })
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Params> for Value {
    fn from(p: Params) -> Self {
        Value::Params(p)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Errors raised while reading typed values out of `Params`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Didn't find key {0:?} in input")]
    Missing(String),

    #[error("Expecting {expected} value for key {key:?} (was {found})")]
    WrongShape {
        key: String,
        expected: ValueShape,
        found: ValueShape,
    },

    #[error("Null value for key {0:?} is not supported")]
    Null(String),

    #[error("Expecting object at top level")]
    NotAnObject,

    #[error("Failed to decode key {key:?}: {message}")]
    Decode { key: String, message: String },
}

impl ParamsError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

pub type ParamsResult<T> = Result<T, ParamsError>;

/// String-keyed RC value map
///
/// Keys iterate and serialize in sorted order, whatever order they were
/// inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    fn require(&self, key: &str) -> ParamsResult<&Value> {
        self.0.get(key).ok_or_else(|| ParamsError::Missing(key.to_string()))
    }

    fn wrong_shape(key: &str, expected: ValueShape, found: &Value) -> ParamsError {
        ParamsError::WrongShape {
            key: key.to_string(),
            expected,
            found: found.shape(),
        }
    }

    /// Get a required string value
    pub fn get_string(&self, key: &str) -> ParamsResult<&str> {
        match self.require(key)? {
            Value::String(s) => Ok(s),
            other => Err(Self::wrong_shape(key, ValueShape::String, other)),
        }
    }

    /// Get a required boolean. The strings "true" and "false" are accepted too.
    pub fn get_bool(&self, key: &str) -> ParamsResult<bool> {
        match self.require(key)? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s == "true" => Ok(true),
            Value::String(s) if s == "false" => Ok(false),
            other => Err(Self::wrong_shape(key, ValueShape::Bool, other)),
        }
    }

    /// Get a required nested map
    pub fn get_params(&self, key: &str) -> ParamsResult<&Params> {
        match self.require(key)? {
            Value::Params(p) => Ok(p),
            other => Err(Self::wrong_shape(key, ValueShape::Params, other)),
        }
    }

    /// Get an optional nested map; absent is `Ok(None)`, wrong shape is an error
    pub fn get_params_opt(&self, key: &str) -> ParamsResult<Option<&Params>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Params(p)) => Ok(Some(p)),
            Some(other) => Err(Self::wrong_shape(key, ValueShape::Params, other)),
        }
    }

    /// Get a required list
    pub fn get_list(&self, key: &str) -> ParamsResult<&[Value]> {
        match self.require(key)? {
            Value::List(items) => Ok(items),
            other => Err(Self::wrong_shape(key, ValueShape::List, other)),
        }
    }

    /// Decode the value under `key` into any deserializable type
    ///
    /// ```
    /// use remoteconf_core::types::Params;
    ///
    /// let out = Params::new().with("remotes", vec!["a", "b"]);
    /// let remotes: Vec<String> = out.get_struct("remotes").unwrap();
    /// assert_eq!(remotes, vec!["a", "b"]);
    /// ```
    pub fn get_struct<T: DeserializeOwned>(&self, key: &str) -> ParamsResult<T> {
        let value = self.require(key)?;
        serde_json::from_value(value.to_json()).map_err(|e| ParamsError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Encode any serializable value as a `Value`, the inverse of [`Params::get_struct`]
    pub fn encode<T: Serialize>(key: &str, value: &T) -> ParamsResult<Value> {
        let json = serde_json::to_value(value).map_err(|e| ParamsError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Value::from_json(key, json)
    }

    /// Convert into a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Build from a JSON value, which must be an object
    pub fn from_json(json: serde_json::Value) -> ParamsResult<Self> {
        match json {
            serde_json::Value::Object(map) => Self::from_json_map(map),
            _ => Err(ParamsError::NotAnObject),
        }
    }

    fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> ParamsResult<Self> {
        let mut params = Params::new();
        for (key, value) in map {
            let value = Value::from_json(&key, value)?;
            params.0.insert(key, value);
        }
        Ok(params)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build `Params` from `key => value` pairs
///
/// ```
/// use remoteconf_core::params;
///
/// let p = params! { "name" => "drive", "parameters" => params! { "user" => "me" } };
/// assert_eq!(p.get_string("name").unwrap(), "drive");
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::types::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut p = $crate::types::Params::new();
        $( p.insert($key, $value); )+
        p
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_typed_getters() {
        let p = Params::new()
            .with("name", "remote")
            .with("flag", true)
            .with("nested", Params::new().with("k", "v"));

        assert_eq!(p.get_string("name").unwrap(), "remote");
        assert!(p.get_bool("flag").unwrap());
        assert_eq!(p.get_params("nested").unwrap().get_string("k").unwrap(), "v");
        assert_eq!(p.get_params_opt("absent").unwrap(), None);
    }

    #[test]
    fn test_missing_and_wrong_shape() {
        let p = Params::new().with("parameters", "not a map");

        assert_eq!(p.get_string("name"), Err(ParamsError::Missing("name".to_string())));
        assert!(matches!(
            p.get_params("parameters"),
            Err(ParamsError::WrongShape { expected: ValueShape::Params, found: ValueShape::String, .. })
        ));
        assert!(matches!(p.get_params_opt("parameters"), Err(ParamsError::WrongShape { .. })));
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({
            "name": "remote",
            "parameters": { "port": 22, "anon": false },
            "tags": ["a", "b"],
        });

        let p = Params::from_json(json).unwrap();
        let parameters = p.get_params("parameters").unwrap();
        assert_eq!(parameters.get_string("port").unwrap(), "22");
        assert_eq!(parameters.get("anon"), Some(&Value::Bool(false)));
        assert_eq!(p.get_list("tags").unwrap().len(), 2);

        assert_eq!(p.to_json()["parameters"]["port"], "22");
    }

    #[test]
    fn test_json_rejects_null_and_non_object() {
        assert_eq!(
            Params::from_json(serde_json::json!({ "name": null })),
            Err(ParamsError::Null("name".to_string()))
        );
        assert_eq!(Params::from_json(serde_json::json!([1, 2])), Err(ParamsError::NotAnObject));
    }

    #[test]
    fn test_get_struct() {
        #[derive(Deserialize)]
        struct Entry {
            name: String,
            secret: bool,
        }

        let p = params! {
            "entries" => vec![
                Value::Params(params! { "name" => "pass", "secret" => true }),
            ],
        };

        let entries: Vec<Entry> = p.get_struct("entries").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "pass");
        assert!(entries[0].secret);

        assert!(matches!(
            p.get_struct::<Vec<u32>>("entries"),
            Err(ParamsError::Decode { .. })
        ));
    }

    #[test]
    fn test_config_string_coercion() {
        assert_eq!(Value::from("x").to_config_string(), Some("x".to_string()));
        assert_eq!(Value::from(true).to_config_string(), Some("true".to_string()));
        assert_eq!(Value::from(vec!["a"]).to_config_string(), None);
        assert_eq!(Value::from(Params::new()).to_config_string(), None);
    }
}
