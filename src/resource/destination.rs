//! Output location and URLs of a written resource.

use std::fs;
use std::path::PathBuf;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::{PermalinkProcessor, Resource, ResourceError, Result};
use crate::debug;

/// Characters escaped in URL path segments.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Strip `index.html`/`index.htm`, then a bare `.html`/`.htm` extension.
///
/// ```text
/// /foo/index.html → /foo/
/// /foo/bar.html   → /foo/bar
/// /foo/           → /foo/
/// ```
pub fn format_url(url: &str) -> String {
    let url = url
        .strip_suffix("index.html")
        .or_else(|| url.strip_suffix("index.htm"))
        .unwrap_or(url);
    let url = url
        .strip_suffix(".html")
        .or_else(|| url.strip_suffix(".htm"))
        .unwrap_or(url);
    url.to_string()
}

/// Computed once at read time from the resource's permalink.
///
/// `url` is kept decoded; encoding happens when URLs are handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    url: String,
    base_path: String,
    site_url: String,
    output_dir: PathBuf,
    output_ext: String,
}

impl Destination {
    pub fn new(resource: &Resource) -> Self {
        let site = resource.site();
        let config = site.config();
        let output_ext = resource.transformer().output_ext();
        let url = PermalinkProcessor::new(resource, &output_ext).render();

        Self {
            url,
            base_path: config.site.base_path.clone(),
            site_url: config.site.url.clone(),
            output_dir: config.output_dir(),
            output_ext,
        }
    }

    /// Permalink-resolved path, decoded and without the base path.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn output_ext(&self) -> &str {
        &self.output_ext
    }

    /// Site-relative URL including the base path.
    pub fn relative_url(&self) -> String {
        let encoded = utf8_percent_encode(&self.url, PATH_SEGMENT).to_string();
        format_url(&format!("{}{}", self.base_path, encoded))
    }

    /// Fully qualified URL. Falls back to the relative URL without a site url.
    pub fn absolute_url(&self) -> String {
        let relative = self.relative_url();
        match url::Url::parse(&self.site_url) {
            Ok(parsed) if parsed.origin().is_tuple() => {
                format!("{}{}", parsed.origin().ascii_serialization(), relative)
            }
            _ => relative,
        }
    }

    /// File the output is written to.
    ///
    /// Directory URLs get `index<ext>`, extensionless URLs get `<ext>`.
    pub fn output_path(&self) -> PathBuf {
        let mut path = self.output_dir.join(self.url.trim_start_matches('/'));
        if self.url.ends_with('/') {
            path.push(format!("index{}", self.output_ext));
        } else if path.extension().is_none() && !self.output_ext.is_empty() {
            path.set_extension(self.output_ext.trim_start_matches('.'));
        }
        path
    }

    /// Persist `output`, creating parent directories.
    pub fn write(&self, output: &str) -> Result<PathBuf> {
        let path = self.output_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| ResourceError::Io(parent.to_path_buf(), err))?;
        }
        fs::write(&path, output).map_err(|err| ResourceError::Io(path.clone(), err))?;
        debug!("write"; "{}", path.display());
        Ok(path)
    }
}
