use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::ContextError;

/// Named values available to markers.
///
/// Plain markers read scalars straight out of the map; dotted markers treat
/// the root entry as an object and read its attributes. The resolver only
/// ever borrows a `Context`, so one snapshot can be shared across a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Stores any serializable value; structs become objects whose fields are
    /// readable through `${key.field}`.
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, ContextError> {
        let v = serde_json::to_value(value)?;
        Ok(self.insert(key, v))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a context from a JSON object document.
    pub fn from_json_str(json: &str) -> Result<Self, ContextError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ContextError::NotAnObject(kind_name(&other))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

pub(crate) fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
