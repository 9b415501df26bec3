//! `[site]` configuration.

use serde::{Deserialize, Serialize};

/// Site identity and URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, available to inline expressions as `site.title`.
    pub title: String,
    /// Site URL used for absolute URLs (e.g. "https://example.com/blog").
    pub url: String,
    /// Path prefix for relative URLs. Derived from `url` when left empty.
    pub base_path: String,
    /// Default permalink style: `pretty`, `simple`, or a template.
    pub permalink: PermalinkStyle,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            base_path: String::new(),
            permalink: PermalinkStyle::Pretty,
        }
    }
}

/// Site-wide permalink style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermalinkStyle {
    /// `/:collection/:path/`, posts as `/:categories/:year/:month/:day/:slug/`
    Pretty,
    /// `/:collection/:path.*`, posts as `/:categories/:year/:month/:day/:slug.*`
    Simple,
    /// Explicit template applied to every collection without its own permalink.
    Template(String),
}

impl PermalinkStyle {
    /// Template for a collection that does not declare its own permalink.
    pub fn template_for(&self, label: &str) -> String {
        let dated = label == "posts";
        match self {
            Self::Pretty if dated => "/:categories/:year/:month/:day/:slug/".into(),
            Self::Pretty => "/:collection/:path/".into(),
            Self::Simple if dated => "/:categories/:year/:month/:day/:slug.*".into(),
            Self::Simple => "/:collection/:path.*".into(),
            Self::Template(template) => template.clone(),
        }
    }
}

impl From<String> for PermalinkStyle {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pretty" => Self::Pretty,
            "simple" => Self::Simple,
            _ => Self::Template(s),
        }
    }
}

impl From<PermalinkStyle> for String {
    fn from(style: PermalinkStyle) -> Self {
        match style {
            PermalinkStyle::Pretty => "pretty".into(),
            PermalinkStyle::Simple => "simple".into(),
            PermalinkStyle::Template(template) => template,
        }
    }
}
