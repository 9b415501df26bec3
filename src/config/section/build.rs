//! `[build]` configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::SlugConfig;

/// Source/output locations and publishing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory (relative to project root).
    pub source: PathBuf,
    /// Output directory (relative to project root).
    pub output: PathBuf,
    /// Layout directory (relative to `source`).
    pub layouts: PathBuf,
    /// Publish resources dated after the build time.
    pub future: bool,
    /// Publish resources with `published: false`.
    pub unpublished: bool,
    /// Expand `${...}` references in front matter values.
    pub inline_expressions: bool,
    /// Slug generation for permalink placeholders.
    pub slug: SlugConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            source: "src".into(),
            output: "output".into(),
            layouts: "_layouts".into(),
            future: false,
            unpublished: false,
            inline_expressions: true,
            slug: SlugConfig::default(),
        }
    }
}
