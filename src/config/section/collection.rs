//! `[collections.<label>]` configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Collection policy: where resources live and how they are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Directory under the source dir. Defaults to `_<label>`, or the source
    /// root for `pages`.
    pub directory: Option<String>,
    /// Resources of this collection get a destination and are written.
    /// Defaults to `true` unless the collection is data-only.
    pub output: Option<bool>,
    /// Data-only collection: no normalization, taxonomies or transform.
    pub data: bool,
    /// Permalink template, overrides the site permalink style.
    pub permalink: Option<String>,
    pub sort_direction: SortDirection,
    pub relations: RelationsConfig,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            directory: None,
            output: None,
            data: false,
            permalink: None,
            sort_direction: SortDirection::Ascending,
            relations: RelationsConfig::default(),
        }
    }
}

impl CollectionConfig {
    /// Whether resources of this collection are written.
    pub fn writes(&self) -> bool {
        self.output.unwrap_or(!self.data)
    }

    /// Resolved directory for a collection label.
    pub fn directory_for(&self, label: &str) -> String {
        match &self.directory {
            Some(dir) => dir.trim_matches('/').to_string(),
            None if label == "pages" => String::new(),
            None => format!("_{label}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Relation schema between collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationsConfig {
    /// Labels of collections a resource points at through a singular key.
    pub belongs_to: Vec<String>,
    /// Labels of collections a resource points at through a plural key.
    pub has_many: Vec<String>,
}

impl RelationsConfig {
    pub fn is_empty(&self) -> bool {
        self.belongs_to.is_empty() && self.has_many.is_empty()
    }
}

/// `pages`, `posts` and `data` always exist unless overridden.
pub fn builtin_collections() -> BTreeMap<String, CollectionConfig> {
    BTreeMap::from([
        (
            "pages".to_string(),
            CollectionConfig {
                permalink: Some("/:path/".into()),
                ..CollectionConfig::default()
            },
        ),
        ("posts".to_string(), CollectionConfig::default()),
        (
            "data".to_string(),
            CollectionConfig {
                data: true,
                ..CollectionConfig::default()
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_builtins_present() {
        let config = test_parse_config("");
        assert!(config.collections["pages"].writes());
        assert!(config.collections["data"].data);
        assert!(!config.collections["data"].writes());
        assert_eq!(config.collections["posts"].directory_for("posts"), "_posts");
        assert_eq!(config.collections["pages"].directory_for("pages"), "");
    }

    #[test]
    fn test_custom_collection() {
        let config = test_parse_config(
            r#"
[collections.docs]
directory = "guides/"
permalink = "/docs/:path/"
sort_direction = "descending"

[collections.docs.relations]
belongs_to = ["authors"]
"#,
        );
        let docs = &config.collections["docs"];
        assert_eq!(docs.directory_for("docs"), "guides");
        assert_eq!(docs.permalink.as_deref(), Some("/docs/:path/"));
        assert_eq!(docs.sort_direction, SortDirection::Descending);
        assert_eq!(docs.relations.belongs_to, vec!["authors"]);
        assert!(config.collections.contains_key("pages"));
    }

    #[test]
    fn test_data_collection_not_written_by_default() {
        let config = test_parse_config("[collections.authors]
data = true");
        assert!(!config.collections["authors"].writes());
    }
}
