//! Site configuration management for `tola.toml`.
//!
//! # Sections
//!
//! | Section                  | Purpose                                     |
//! |--------------------------|---------------------------------------------|
//! | `[site]`                 | Site url, base path, permalink style        |
//! | `[build]`                | Source/output/layout paths, publish policy  |
//! | `[build.slug]`           | Slug generation for permalinks              |
//! | `[collections.<label>]`  | Collection directories and write policy     |
//! | `[taxonomies.<label>]`   | Taxonomy data keys                          |
//! | `[[defaults]]`           | Scoped front matter defaults                |

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{
    BuildSectionConfig, CollectionConfig, DefaultsEntry, DefaultsScope, PermalinkStyle,
    RelationsConfig, SiteSectionConfig, SlugCase, SlugConfig, SlugMode, SlugSeparator,
    SortDirection, TaxonomyConfig,
};
pub use util::{extract_url_path, find_config_file};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::log;

/// Root configuration structure representing tola.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Collections keyed by label. Built-ins are merged in after parsing.
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,

    /// Taxonomies keyed by label. Built-ins are merged in after parsing.
    #[serde(default)]
    pub taxonomies: BTreeMap<String, TaxonomyConfig>,

    #[serde(default)]
    pub defaults: Vec<DefaultsEntry>,
}

impl SiteConfig {
    /// Load, finalize and validate configuration from a file path.
    ///
    /// Unknown fields are reported but do not abort loading.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {} ignored: {}", path.display(), ignored.join(", "));
        }

        config.config_path = path.to_path_buf();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.finalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string rooted at `root`.
    pub fn from_str_in(content: &str, root: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.finalize(root);
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Merge built-in collections/taxonomies and derive the base path.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();

        for (label, collection) in section::builtin_collections() {
            self.collections.entry(label).or_insert(collection);
        }
        for (label, taxonomy) in section::builtin_taxonomies() {
            self.taxonomies.entry(label).or_insert(taxonomy);
        }

        if self.site.base_path.is_empty()
            && let Some(path) = extract_url_path(&self.site.url)
        {
            self.site.base_path = path;
        }
        self.site.url = self.site.url.trim_end_matches('/').to_string();
        let trimmed = self.site.base_path.trim_matches('/');
        self.site.base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
    }

    /// Reject configurations the resource pipeline cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys = FxHashSet::default();
        for (label, taxonomy) in &self.taxonomies {
            if taxonomy.key.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "taxonomies.{label}.key must not be empty"
                )));
            }
            if !keys.insert(taxonomy.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "taxonomies.{label}.key `{}` is used by another taxonomy",
                    taxonomy.key
                )));
            }
        }

        for (label, collection) in &self.collections {
            if collection.data && collection.output == Some(true) {
                return Err(ConfigError::Validation(format!(
                    "collections.{label} is data-only and cannot set `output = true`"
                )));
            }
        }

        Ok(())
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute content source directory.
    pub fn source_dir(&self) -> PathBuf {
        self.root_join(&self.build.source)
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root_join(&self.build.output)
    }

    /// Absolute layouts directory.
    pub fn layouts_dir(&self) -> PathBuf {
        self.source_dir().join(&self.build.layouts)
    }
}

/// Parse a config snippet for tests, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\n{extra}");
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.finalize(Path::new("/site"));
    parsed
}
