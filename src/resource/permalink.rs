//! Permalink templates: `/:categories/:year/:month/:day/:slug/` and friends.
//!
//! | Placeholder   | Value                                          |
//! |---------------|------------------------------------------------|
//! | `:collection` | collection label, empty for `pages`            |
//! | `:path`       | relative path without `_` dirs, date, extension |
//! | `:name`       | file name without extension                    |
//! | `:slug`       | `data.slug`                                    |
//! | `:title`      | `data.title`                                   |
//! | `:categories` | `data.categories` joined with `/`              |
//! | `:year` ...   | date parts (`:short_year`, `:i_month`, ...)    |
//! | `.*`          | output extension                               |

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::Resource;
use super::taxonomy::scalar_label;
use crate::config::PermalinkStyle;
use crate::utils::slug::{slugify, slugify_path};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z_]+)").expect("placeholder pattern is valid"));

static SLASHES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/{2,}").expect("slash pattern is valid"));

/// Renders a resource's permalink template into a URL path.
pub struct PermalinkProcessor<'a> {
    resource: &'a Resource,
    output_ext: &'a str,
}

impl<'a> PermalinkProcessor<'a> {
    pub fn new(resource: &'a Resource, output_ext: &'a str) -> Self {
        Self {
            resource,
            output_ext,
        }
    }

    /// `data.permalink` > collection permalink > site permalink style.
    pub fn template(&self) -> String {
        let collection = self.resource.collection();
        let style = self
            .resource
            .permalink()
            .or_else(|| collection.permalink().map(str::to_string))
            .map(PermalinkStyle::from)
            .unwrap_or_else(|| self.resource.site().config().site.permalink.clone());
        style.template_for(collection.label())
    }

    /// Render the template into a decoded URL path starting with `/`.
    pub fn render(&self) -> String {
        let template = self.template();
        let rendered = PLACEHOLDER_RE.replace_all(&template, |caps: &Captures| {
            self.placeholder(&caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        });
        let rendered = rendered.replace(".*", self.output_ext);
        normalize(&rendered)
    }

    /// Value of one placeholder, `None` when unknown.
    pub fn placeholder(&self, name: &str) -> Option<String> {
        let resource = self.resource;
        let slug_config = &resource.site().config().build.slug;
        let date = resource.date();

        let value = match name {
            "collection" => match resource.collection().label() {
                "pages" => String::new(),
                label => label.to_string(),
            },
            "path" => slugify_path(&resource.relative_path_basename_without_prefix(), slug_config),
            "name" => slugify(&resource.basename_without_ext(), slug_config),
            "slug" => slugify(&self.data_string("slug"), slug_config),
            "title" => slugify(&self.data_string("title"), slug_config),
            "categories" => self
                .categories()
                .iter()
                .map(|category| slugify(category, slug_config))
                .filter(|category| !category.is_empty())
                .collect::<Vec<_>>()
                .join("/"),
            "year" => format!("{:04}", date.year),
            "short_year" => format!("{:02}", date.year % 100),
            "month" => format!("{:02}", date.month),
            "i_month" => date.month.to_string(),
            "day" => format!("{:02}", date.day),
            "i_day" => date.day.to_string(),
            "hour" => format!("{:02}", date.hour),
            "minute" => format!("{:02}", date.minute),
            "second" => format!("{:02}", date.second),
            _ => return None,
        };
        Some(value)
    }

    /// String data value, falling back to the file name.
    fn data_string(&self, key: &str) -> String {
        self.resource
            .data()
            .get_str(key)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.resource.basename_without_ext())
    }

    fn categories(&self) -> Vec<String> {
        match self.resource.data().get("categories").as_deref() {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_label).collect(),
            Some(other) => scalar_label(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

/// Collapse duplicate slashes, force a leading `/`, drop a trailing `index`.
fn normalize(url: &str) -> String {
    let mut url = SLASHES_RE.replace_all(&format!("/{url}"), "/").into_owned();
    for suffix in ["/index/", "/index"] {
        if let Some(stripped) = url.strip_suffix(suffix) {
            url = format!("{stripped}/");
            break;
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::test_support::{read_memory, test_site};
    use serde_json::json;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/a//b/"), "/a/b/");
        assert_eq!(normalize("a/b"), "/a/b");
        assert_eq!(normalize("/docs/index/"), "/docs/");
        assert_eq!(normalize("/index"), "/");
        assert_eq!(normalize("/index.html"), "/index.html");
    }

    #[test]
    fn test_template_precedence() {
        let (_dir, site) = test_site("[collections.docs]\npermalink = \"/d/:name/\"");

        let doc = read_memory(&site, "_docs/a.md", "docs", json!({}), "");
        assert_eq!(PermalinkProcessor::new(&doc, ".html").template(), "/d/:name/");

        let doc = read_memory(&site, "_docs/b.md", "docs", json!({"permalink": "/x/:slug/"}), "");
        assert_eq!(PermalinkProcessor::new(&doc, ".html").template(), "/x/:slug/");

        let post = read_memory(&site, "_posts/c.md", "posts", json!({}), "");
        assert_eq!(
            PermalinkProcessor::new(&post, ".html").template(),
            "/:categories/:year/:month/:day/:slug/"
        );
    }

    #[test]
    fn test_date_placeholders() {
        let (_dir, site) = test_site("");
        let post = read_memory(
            &site,
            "_posts/2024-3-7-x.md",
            "posts",
            json!({"permalink": "/:short_year/:i_month/:i_day/:month/:day/"}),
            "",
        );
        assert_eq!(post.destination().unwrap().url(), "/24/3/7/03/07/");
    }

    #[test]
    fn test_slugified_values_and_unknown_placeholder() {
        let (_dir, site) = test_site("");
        let post = read_memory(
            &site,
            "_posts/2024-01-01-x.md",
            "posts",
            json!({"title": "Hello, World!", "permalink": "/:title/:unknown/"}),
            "",
        );
        assert_eq!(post.destination().unwrap().url(), "/hello-world/:unknown/");
    }

    #[test]
    fn test_pages_collection_placeholder_is_empty() {
        let (_dir, site) = test_site("permalink = \"/:collection/:path/\"");
        let page = read_memory(&site, "index.md", "pages", json!({"permalink": "pretty"}), "");
        assert_eq!(page.destination().unwrap().url(), "/");
    }
}
