//! Content transformation: converters, then layouts.
//!
//! ```text
//! content ──▶ converter₁ ──▶ … ──▶ converterₙ ──▶ layout ──▶ parent layout … ──▶ output
//! ```
//!
//! Converters are selected once per resource by source extension; see
//! [`Transformer`]. Front matter `${path}` expansion lives here too since it
//! shares the value lookup with layouts.

mod converter;
mod inline;
mod layout;

pub use converter::{Converter, IdentityConverter, MarkdownConverter};
pub use layout::place_in_layouts;

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::debug;
use crate::resource::{DataMap, Resource, ResourceData, Result};
use crate::site::Site;

/// The converters that apply to one source extension.
pub struct Transformer {
    ext: String,
    converters: Vec<Rc<dyn Converter>>,
}

impl Transformer {
    /// Select the site's converters matching `ext`, keeping site order.
    pub fn new(site: &Site, ext: &str) -> Self {
        let converters = site
            .converters()
            .iter()
            .filter(|converter| converter.matches(ext))
            .cloned()
            .collect();
        Self {
            ext: ext.to_string(),
            converters,
        }
    }

    pub fn converters(&self) -> &[Rc<dyn Converter>] {
        &self.converters
    }

    /// Extension after every selected converter has run.
    pub fn output_ext(&self) -> String {
        self.converters
            .iter()
            .fold(self.ext.clone(), |ext, converter| converter.output_ext(&ext))
    }

    /// Convert the resource's content and place it in its layouts.
    pub fn process(&self, resource: &Resource) -> Result<String> {
        let mut output = resource.content().unwrap_or_default().to_string();
        for converter in &self.converters {
            debug!("convert"; "{} with {}", resource.relative_path().display(), converter.name());
            output = converter.convert(&output, resource)?;
        }
        Ok(place_in_layouts(output, resource))
    }

    /// Expand `${path}` references in front matter values.
    pub fn expand_inline(data: &mut ResourceData, site: &Site) {
        inline::expand(data, site);
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.converters.iter().map(|c| c.name()).collect();
        f.debug_struct("Transformer")
            .field("ext", &self.ext)
            .field("converters", &names)
            .finish()
    }
}

/// `site.title`, `site.url` and `site.base_path`.
fn site_value(site: &Site, key: &str) -> Option<String> {
    let config = &site.config().site;
    match key {
        "site.title" => Some(config.title.clone()),
        "site.url" => Some(config.url.clone()),
        "site.base_path" => Some(config.base_path.clone()),
        _ => None,
    }
}

/// Dotted lookup inside a plain map.
fn lookup_map(map: &DataMap, path: &str) -> Option<Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}

/// Strings verbatim, null as empty, everything else as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
