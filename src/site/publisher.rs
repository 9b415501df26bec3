//! Publishing policy: which resources with a destination get written.

use crate::resource::Resource;
use crate::utils::date::DateTimeUtc;

/// Decides whether a resource is published.
pub trait Publish {
    fn publish(&self, resource: &Resource) -> bool;
}

/// `published: false` and future-dated resources are held back unless the
/// `[build]` flags allow them.
#[derive(Debug, Clone, Copy)]
pub struct Publisher {
    pub future: bool,
    pub unpublished: bool,
    pub time: DateTimeUtc,
}

impl Publish for Publisher {
    fn publish(&self, resource: &Resource) -> bool {
        let published = self.unpublished || resource.data().get_bool("published") != Some(false);
        let current = self.future || resource.date() <= self.time;
        published && current
    }
}

#[cfg(test)]
mod tests {
    use crate::resource::Publishable;
    use crate::site::test_support::{read_memory, test_site};
    use serde_json::json;

    #[test]
    fn test_unpublished_held_back() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "a.md", "pages", json!({"published": false}), "");
        assert!(!page.should_write());

        let (_dir, site) = test_site("[build]\nunpublished = true");
        let page = read_memory(&site, "a.md", "pages", json!({"published": false}), "");
        assert!(page.should_write());
    }

    #[test]
    fn test_future_held_back() {
        // test sites are built at 2025-01-01
        let (_dir, site) = test_site("");
        let post = read_memory(&site, "_posts/2030-01-01-later.md", "posts", json!({}), "");
        assert!(!post.should_write());
        let post = read_memory(&site, "_posts/2020-01-01-earlier.md", "posts", json!({}), "");
        assert!(post.should_write());

        let (_dir, site) = test_site("[build]\nfuture = true");
        let post = read_memory(&site, "_posts/2030-01-01-later.md", "posts", json!({}), "");
        assert!(post.should_write());
    }

    #[test]
    fn test_defaults_can_unpublish() {
        let (_dir, site) = test_site(
            "[[defaults]]\nscope = { path = \"drafts\" }\nvalues = { published = false }",
        );
        let page = read_memory(&site, "drafts/a.md", "pages", json!({}), "");
        assert!(!page.should_write());
    }
}
