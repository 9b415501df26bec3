//! `${path}` expressions in front matter values.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::{render_value, site_value};
use crate::resource::ResourceData;
use crate::site::Site;

static EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{[ \t]*([A-Za-z0-9_.]+)[ \t]*\}").expect("inline expression pattern is valid")
});

/// Expand every `${path}` in the string values of `data`, nested ones
/// included.
///
/// References resolve against the data as it was before expansion, so
/// expansion order between keys does not matter. Unknown paths become empty.
pub fn expand(data: &mut ResourceData, site: &Site) {
    let mut map = data.as_map().clone();
    let mut changed = false;
    {
        let lookup = |path: &str| -> String {
            site_value(site, path)
                .or_else(|| data.get_path(path).map(|value| render_value(&value)))
                .unwrap_or_default()
        };
        for value in map.values_mut() {
            changed |= expand_value(value, &lookup);
        }
    }
    if changed {
        *data.as_map_mut() = map;
    }
}

fn expand_value(value: &mut Value, lookup: &dyn Fn(&str) -> String) -> bool {
    match value {
        Value::String(s) if s.contains("${") => {
            let expanded = EXPRESSION_RE.replace_all(s, |caps: &Captures<'_>| lookup(&caps[1]));
            if expanded == s.as_str() {
                return false;
            }
            *s = expanded.into_owned();
            true
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |changed, item| expand_value(item, lookup) | changed),
        Value::Object(map) => map
            .values_mut()
            .fold(false, |changed, item| expand_value(item, lookup) | changed),
        _ => false,
    }
}
