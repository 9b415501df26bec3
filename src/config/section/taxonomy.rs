//! `[taxonomies.<label>]` configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A taxonomy axis: which data key holds its terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Front matter key read during import (e.g. `tags`).
    pub key: String,
    /// Display title, defaults to the label.
    #[serde(default)]
    pub title: Option<String>,
}

impl TaxonomyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
        }
    }
}

/// `category` and `tag` always exist unless overridden.
pub fn builtin_taxonomies() -> BTreeMap<String, TaxonomyConfig> {
    BTreeMap::from([
        ("category".to_string(), TaxonomyConfig::new("categories")),
        ("tag".to_string(), TaxonomyConfig::new("tags")),
    ])
}
