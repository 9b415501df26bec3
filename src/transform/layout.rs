//! Wrapping converted output in the resource's layout chain.
//!
//! Layouts are plain text with `{{ name }}` placeholders:
//!
//! - `{{ content }}`: the output rendered so far
//! - `{{ page.<path> }}` or a bare `{{ <path> }}`: resource data
//! - `{{ page.url }}`: the resource's relative URL
//! - `{{ layout.<path> }}`: the current layout's front matter
//! - `{{ site.title }}`, `{{ site.url }}`, `{{ site.base_path }}`
//!
//! Unknown references render empty.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use serde_json::Value;

use super::{lookup_map, render_value, site_value};
use crate::resource::Resource;
use crate::site::Layout;
use crate::{debug, warn_once};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[ \t]*([A-Za-z0-9_.]+)[ \t]*\}\}").expect("layout placeholder pattern is valid")
});

/// Place `output` into the resource's layout, then each parent in turn.
///
/// A layout seen twice ends the chain; a missing parent warns once and ends it.
pub fn place_in_layouts(output: String, resource: &Resource) -> String {
    let Some(first) = resource.layout() else {
        return output;
    };

    let layouts = resource.site().layouts();
    let mut seen = FxHashSet::default();
    let mut current = Some(Rc::clone(first));
    let mut output = output;

    while let Some(layout) = current {
        if !seen.insert(layout.name.clone()) {
            warn_once!(format!("layout-cycle:{}", layout.name); "layout";
                "`{}` includes itself, stopping", layout.name);
            break;
        }
        debug!("layout"; "{} in {}", resource.relative_path().display(), layout.name);
        output = render_layout(&layout, &output, resource);

        current = layout.parent().and_then(|parent| {
            let found = layouts.get(parent).cloned();
            if found.is_none() {
                warn_once!(format!("layout:{parent}"); "layout";
                    "`{}` requested by layout `{}` does not exist", parent, layout.name);
            }
            found
        });
    }
    output
}

fn render_layout(layout: &Layout, content: &str, resource: &Resource) -> String {
    PLACEHOLDER_RE
        .replace_all(&layout.content, |caps: &Captures<'_>| {
            resolve(&caps[1], layout, content, resource)
        })
        .into_owned()
}

fn resolve<'a>(key: &str, layout: &Layout, content: &'a str, resource: &Resource) -> Cow<'a, str> {
    if key == "content" {
        return Cow::Borrowed(content);
    }
    if key == "page.url" {
        return Cow::Owned(resource.relative_url().unwrap_or_default());
    }
    if let Some(rest) = key.strip_prefix("layout.") {
        return Cow::Owned(lookup_map(&layout.data, rest).map(render).unwrap_or_default());
    }
    if let Some(value) = site_value(resource.site(), key) {
        return Cow::Owned(value);
    }
    let path = key.strip_prefix("page.").unwrap_or(key);
    Cow::Owned(resource.data().get_path(path).map(render).unwrap_or_default())
}

fn render(value: Value) -> String {
    render_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::resource::{DataMap, MemoryOrigin, Model, ResourceData};
    use crate::site::test_support::TEST_TIME;
    use crate::site::{LayoutRegistry, Site};
    use serde_json::json;

    fn layout(name: &str, parent: Option<&str>, content: &str) -> Layout {
        let mut data = DataMap::new();
        if let Some(parent) = parent {
            data.insert("layout".into(), parent.into());
        }
        data.insert("kind".into(), name.into());
        Layout::new(name, data, content)
    }

    fn site_with(layouts: Vec<Layout>) -> Rc<Site> {
        let mut registry = LayoutRegistry::new();
        for layout in layouts {
            registry.insert(layout);
        }
        Site::builder(test_parse_config("url = \"https://example.com\""))
            .layouts(registry)
            .time(TEST_TIME)
            .build()
            .unwrap()
    }

    fn page(site: &Rc<Site>, data: serde_json::Value) -> Resource {
        let origin = MemoryOrigin::new("about.md", "pages")
            .with_data(ResourceData::map_from_value(data).unwrap());
        let mut resource = Resource::new(Model::new(origin, site, "pages").unwrap());
        resource.read().unwrap();
        resource
    }

    #[test]
    fn test_nested_layouts() {
        let site = site_with(vec![
            layout("default", None, "<html><title>{{ site.title }}</title>{{content}}</html>"),
            layout("page", Some("default"), "<main data-kind=\"{{ layout.kind }}\">{{ content }}</main>"),
        ]);
        let resource = page(&site, json!({"layout": "page"}));

        let output = place_in_layouts("<p>x</p>".into(), &resource);
        assert_eq!(
            output,
            "<html><title>Test</title><main data-kind=\"page\"><p>x</p></main></html>"
        );
    }

    #[test]
    fn test_page_references() {
        let site = site_with(vec![layout(
            "default",
            None,
            "{{ page.title }}|{{ title }}|{{ page.url }}|{{ meta.author }}|{{ nope }}",
        )]);
        let resource = page(&site, json!({"layout": "default", "meta": {"author": "Ann"}}));

        let output = place_in_layouts(String::new(), &resource);
        assert_eq!(output, "About|About|/about/|Ann|");
    }

    #[test]
    fn test_cycle_stops() {
        let site = site_with(vec![
            layout("a", Some("b"), "a[{{ content }}]"),
            layout("b", Some("a"), "b[{{ content }}]"),
        ]);
        let resource = page(&site, json!({"layout": "a"}));
        assert_eq!(place_in_layouts("x".into(), &resource), "b[a[x]]");
    }

    #[test]
    fn test_missing_parent_ends_chain() {
        let site = site_with(vec![layout("a", Some("ghost"), "a[{{ content }}]")]);
        let resource = page(&site, json!({"layout": "a"}));
        assert_eq!(place_in_layouts("x".into(), &resource), "a[x]");
    }

    #[test]
    fn test_no_layout_passes_through() {
        let site = site_with(vec![]);
        let resource = page(&site, json!({}));
        assert_eq!(place_in_layouts("x".into(), &resource), "x");
    }
}
