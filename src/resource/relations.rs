//! Cross-collection relations declared in `[collections.<label>.relations]`.

use serde_json::Value;

use super::taxonomy::scalar_label;
use super::{Resource, ResourceData};
use crate::config::RelationsConfig;
use crate::utils::plural::singularize;

/// Slugs a resource references, grouped by target collection.
///
/// `belongs_to = ["authors"]` reads `data.author`,
/// `has_many = ["comments"]` reads `data.comments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations {
    belongs_to: Vec<(String, Option<String>)>,
    has_many: Vec<(String, Vec<String>)>,
}

impl Relations {
    pub fn from_data(schema: &RelationsConfig, data: &ResourceData) -> Self {
        let belongs_to = schema
            .belongs_to
            .iter()
            .map(|label| {
                let slug = data
                    .get(&singularize(label))
                    .and_then(|value| scalar_label(&value));
                (label.clone(), slug)
            })
            .collect();

        let has_many = schema
            .has_many
            .iter()
            .map(|label| {
                let slugs = match data.get(label).as_deref() {
                    Some(Value::Array(items)) => items.iter().filter_map(scalar_label).collect(),
                    Some(other) => scalar_label(other).into_iter().collect(),
                    None => Vec::new(),
                };
                (label.clone(), slugs)
            })
            .collect();

        Self {
            belongs_to,
            has_many,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.belongs_to.is_empty() && self.has_many.is_empty()
    }

    /// Slug referenced for a `belongs_to` collection.
    pub fn belongs_to_slug(&self, label: &str) -> Option<&str> {
        self.belongs_to
            .iter()
            .find(|(target, _)| target == label)
            .and_then(|(_, slug)| slug.as_deref())
    }

    /// Slugs referenced for a `has_many` collection.
    pub fn has_many_slugs(&self, label: &str) -> &[String] {
        self.has_many
            .iter()
            .find(|(target, _)| target == label)
            .map(|(_, slugs)| slugs.as_slice())
            .unwrap_or_default()
    }

    /// The resource of collection `label` this one belongs to.
    pub fn belongs_to<'a>(&self, label: &str, candidates: &'a [Resource]) -> Option<&'a Resource> {
        let slug = self.belongs_to_slug(label)?;
        candidates
            .iter()
            .find(|candidate| is_match(candidate, label, slug))
    }

    /// Resources of collection `label` this one has, in reference order.
    pub fn has_many<'a>(&self, label: &str, candidates: &'a [Resource]) -> Vec<&'a Resource> {
        self.has_many_slugs(label)
            .iter()
            .filter_map(|slug| {
                candidates
                    .iter()
                    .find(|candidate| is_match(candidate, label, slug))
            })
            .collect()
    }
}

fn is_match(candidate: &Resource, label: &str, slug: &str) -> bool {
    candidate.collection().label() == label && candidate.slug().as_deref() == Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::test_support::{read_memory, test_site};
    use serde_json::json;

    const CONFIG: &str = r#"
[collections.authors]
[collections.articles.relations]
belongs_to = ["authors"]
has_many = ["tags_pages"]
[collections.tags_pages]
"#;

    #[test]
    fn test_from_data() {
        let schema = RelationsConfig {
            belongs_to: vec!["authors".into()],
            has_many: vec!["comments".into()],
        };
        let data = ResourceData::with_fallback(
            ResourceData::map_from_value(json!({"author": "ada", "comments": ["c1", "c2"]}))
                .unwrap(),
            None,
        );
        let relations = Relations::from_data(&schema, &data);
        assert_eq!(relations.belongs_to_slug("authors"), Some("ada"));
        assert_eq!(relations.has_many_slugs("comments"), ["c1", "c2"]);
        assert!(relations.has_many_slugs("missing").is_empty());
    }

    #[test]
    fn test_resolve_against_resources() {
        let (_dir, site) = test_site(CONFIG);
        let authors = vec![
            read_memory(&site, "_authors/ada.md", "authors", json!({}), ""),
            read_memory(&site, "_authors/alan.md", "authors", json!({}), ""),
        ];
        let tags = vec![
            read_memory(&site, "_tags_pages/rust.md", "tags_pages", json!({}), ""),
            read_memory(&site, "_tags_pages/web.md", "tags_pages", json!({}), ""),
        ];
        let article = read_memory(
            &site,
            "_articles/intro.md",
            "articles",
            json!({"author": "alan", "tags_pages": ["web", "nope", "rust"]}),
            "",
        );

        let relations = article.relations();
        let author = relations.belongs_to("authors", &authors).unwrap();
        assert!(std::ptr::eq(author, &authors[1]));

        let slugs: Vec<_> = relations
            .has_many("tags_pages", &tags)
            .into_iter()
            .map(|r| r.slug().unwrap_or_default())
            .collect();
        assert_eq!(slugs, vec!["web", "rust"]);
    }

    #[test]
    fn test_no_schema_is_empty() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "about.md", "pages", json!({"author": "x"}), "");
        assert!(page.relations().is_empty());
    }
}
