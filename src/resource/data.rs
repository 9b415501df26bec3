//! Resource data: an ordered mapping with a front matter defaults fallback.
//!
//! A lookup resolves, in order:
//! 1. the stored value (a stored `null` counts as stored)
//! 2. the site's [`DefaultsResolver`] for `(relative path, collection, key)`
//! 3. nothing

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{DataMap, ResourceError, Result};
use crate::site::DefaultsResolver;

/// Where a lookup miss is sent.
#[derive(Clone)]
pub struct DataFallback {
    resolver: Rc<dyn DefaultsResolver>,
    path: PathBuf,
    collection: String,
}

impl DataFallback {
    pub fn new(resolver: Rc<dyn DefaultsResolver>, path: PathBuf, collection: String) -> Self {
        Self {
            resolver,
            path,
            collection,
        }
    }

    fn resolve(&self, key: &str) -> Option<Value> {
        self.resolver.resolve(&self.path, &self.collection, key)
    }
}

/// Resource data mapping.
#[derive(Clone, Default)]
pub struct ResourceData {
    map: DataMap,
    fallback: Option<DataFallback>,
}

impl ResourceData {
    /// Empty data without a fallback.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(map: DataMap, fallback: Option<DataFallback>) -> Self {
        Self { map, fallback }
    }

    /// Convert an arbitrary value into a data map, rejecting non-mappings.
    ///
    /// Fails before anything is mutated, so callers can keep their old data.
    pub fn map_from_value(value: Value) -> Result<DataMap> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(ResourceError::TypeMismatch {
                found: value_kind(&other),
            }),
        }
    }

    /// Look up `key`, consulting front matter defaults on a miss.
    pub fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        if let Some(value) = self.map.get(key) {
            return Some(Cow::Borrowed(value));
        }
        self.fallback
            .as_ref()
            .and_then(|fallback| fallback.resolve(key))
            .map(Cow::Owned)
    }

    /// Dotted lookup: `config.output` reads `output` inside `config`.
    pub fn get_path(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.get(first)?.into_owned();
        for segment in segments {
            current = match current {
                Value::Object(mut map) => map.remove(segment)?,
                Value::Array(mut items) => {
                    let index: usize = segment.parse().ok()?;
                    if index >= items.len() {
                        return None;
                    }
                    items.swap_remove(index)
                }
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|value| value.as_str().map(str::to_string))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| value.as_bool())
    }

    /// A value counts as set unless it is missing, `null`, `false` or `""`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| is_truthy(&value))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.map.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key)
    }

    /// Mutable access to a stored value only (defaults are not materialized).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    /// Stored values only.
    pub fn as_map(&self) -> &DataMap {
        &self.map
    }

    pub fn as_map_mut(&mut self) -> &mut DataMap {
        &mut self.map
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

impl fmt::Debug for ResourceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceData")
            .field("map", &self.map)
            .field("fallback", &self.fallback.as_ref().map(|fb| &fb.collection))
            .finish()
    }
}

impl Serialize for ResourceData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.map.serialize(serializer)
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
