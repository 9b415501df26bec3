//! Taxonomy types and per-resource term associations.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use super::ResourceData;
use crate::config::TaxonomyConfig;

/// A registered classification axis (e.g. `tag` read from `tags`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyType {
    pub label: String,
    pub key: String,
    pub title: String,
}

impl TaxonomyType {
    pub fn from_config(label: &str, config: &TaxonomyConfig) -> Self {
        Self {
            label: label.to_string(),
            key: config.key.clone(),
            title: config.title.clone().unwrap_or_else(|| label.to_string()),
        }
    }
}

/// One term of one resource.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyTerm {
    pub label: String,
    #[serde(skip)]
    pub taxonomy: Rc<TaxonomyType>,
    /// Id of the owning resource.
    pub resource: String,
}

/// Terms of one taxonomy, in source order.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyEntry {
    #[serde(rename = "type")]
    pub taxonomy: Rc<TaxonomyType>,
    pub terms: Vec<TaxonomyTerm>,
}

impl TaxonomyEntry {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|term| term.label.as_str())
    }
}

/// Taxonomy label → entry.
pub type Taxonomies = BTreeMap<String, TaxonomyEntry>;

/// An entry with no terms for every registered taxonomy type.
pub(crate) fn empty_taxonomies(types: &[Rc<TaxonomyType>]) -> Taxonomies {
    types
        .iter()
        .map(|taxonomy| {
            (
                taxonomy.label.clone(),
                TaxonomyEntry {
                    taxonomy: Rc::clone(taxonomy),
                    terms: Vec::new(),
                },
            )
        })
        .collect()
}

/// Append one term per entry of `data[type.key]` to every taxonomy.
///
/// Terms are never de-duplicated here.
pub(crate) fn import_terms(taxonomies: &mut Taxonomies, data: &ResourceData, resource_id: &str) {
    for entry in taxonomies.values_mut() {
        let Some(value) = data.get(&entry.taxonomy.key) else {
            continue;
        };
        for label in term_labels(&value) {
            entry.terms.push(TaxonomyTerm {
                label,
                taxonomy: Rc::clone(&entry.taxonomy),
                resource: resource_id.to_string(),
            });
        }
    }
}

/// Coerce a data value into a sequence of term labels.
fn term_labels(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(scalar_label).collect(),
        other => scalar_label(other).into_iter().collect(),
    }
}

pub(crate) fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
