//! The resource entity and its read → transform → write lifecycle.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use serde_json::Value;

use super::taxonomy::{empty_taxonomies, import_terms, scalar_label};
use super::{
    DataFallback, DataMap, Destination, Model, Relations, ResourceData, ResourceDrop,
    ResourceError, ResourceSnapshot, Result, Taxonomies,
};
use crate::hooks::HookEvent;
use crate::site::{Collection, Layout, Site};
use crate::transform::Transformer;
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::titleize_slug;
use crate::warn_once;

/// `[dirs/]YYYY-M-D-rest.ext`, year of 2 to 4 digits.
static DATE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:.*/)?([0-9]{2,4}-[0-9]{1,2}-[0-9]{1,2})-([^/]*)(\.[^./]+)$")
        .expect("date filename pattern is valid")
});

/// Write eligibility.
pub trait Publishable {
    /// The collection is written and `data.config.output` is not `false`.
    fn requires_destination(&self) -> bool;

    /// Has a destination and the site publisher approves it.
    fn should_write(&self) -> bool;
}

/// Views for the rendering layer.
pub trait Renderable {
    /// Serializable hash form.
    fn to_h(&self) -> ResourceSnapshot<'_>;

    /// Template drop: the hash form plus derived fields.
    fn to_liquid(&self) -> ResourceDrop<'_>;
}

/// One content unit.
///
/// Memoized fields (`layout`, `transformer`, `relations`, `taxonomies`) use
/// `OnceCell` and are not thread-safe; a resource stays on one thread.
pub struct Resource {
    model: Model,
    data: ResourceData,
    content: Option<String>,
    untransformed_content: Option<String>,
    output: Option<String>,
    date: Option<DateTimeUtc>,
    destination: Option<Destination>,
    layout: OnceCell<Option<Rc<Layout>>>,
    transformer: OnceCell<Transformer>,
    relations: OnceCell<Relations>,
    taxonomies: OnceCell<Taxonomies>,
}

impl Resource {
    /// Wrap `model` and fire `post_init`.
    pub fn new(model: Model) -> Self {
        let data = ResourceData::with_fallback(DataMap::new(), Some(fallback_for(&model)));
        let mut resource = Self {
            model,
            data,
            content: None,
            untransformed_content: None,
            output: None,
            date: None,
            destination: None,
            layout: OnceCell::new(),
            transformer: OnceCell::new(),
            relations: OnceCell::new(),
            taxonomies: OnceCell::new(),
        };
        resource.trigger(HookEvent::PostInit);
        resource
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Populate data and content from the origin and derive metadata.
    pub fn read(&mut self) -> Result<&mut Self> {
        self.trigger(HookEvent::PreRead);
        self.reset_derived();

        let (data, content) = self.model.read()?;
        self.data = ResourceData::with_fallback(data, Some(fallback_for(&self.model)));
        self.content = Some(content);

        if !self.collection().data() {
            self.untransformed_content = self.content.clone();
            self.normalize_categories_and_tags();
            self.import_taxonomies_from_data();
            self.ensure_default_data();
            self.execute_inline_expressions();
            self.parse_date()?;
        }

        if self.requires_destination() {
            let destination = Destination::new(self);
            self.destination = Some(destination);
        }

        self.trigger(HookEvent::PostRead);
        Ok(self)
    }

    /// Run converters and layouts over `content` into `output`.
    ///
    /// No-op for data-only resources. Must run after [`Resource::read`].
    pub fn transform(&mut self) -> Result<&mut Self> {
        if self.collection().data() {
            return Ok(self);
        }

        self.trigger(HookEvent::PreTransform);
        let this = &*self;
        let output = this.transformer().process(this)?;
        self.output = Some(output);
        self.trigger(HookEvent::PostTransform);
        Ok(self)
    }

    /// Persist `output` through the destination. Returns the written path.
    ///
    /// Callers gate on [`Publishable::should_write`]; a resource without a
    /// destination fails with [`ResourceError::MissingDestination`].
    pub fn write(&mut self) -> Result<PathBuf> {
        if self.destination.is_none() {
            return Err(self.missing_destination());
        }

        self.trigger(HookEvent::PreWrite);
        let output = self.output.as_deref().unwrap_or_default();
        let path = match &self.destination {
            Some(destination) => destination.write(output)?,
            None => return Err(self.missing_destination()),
        };
        self.trigger(HookEvent::PostWrite);
        Ok(path)
    }

    fn trigger(&mut self, event: HookEvent) {
        let site = Rc::clone(self.model.site());
        site.hooks().trigger(event, self);
    }

    fn missing_destination(&self) -> ResourceError {
        ResourceError::MissingDestination {
            path: self.relative_path().to_path_buf(),
        }
    }

    /// Drop everything a previous read derived.
    fn reset_derived(&mut self) {
        self.untransformed_content = None;
        self.output = None;
        self.date = None;
        self.destination = None;
        self.layout = OnceCell::new();
        self.transformer = OnceCell::new();
        self.relations = OnceCell::new();
        self.taxonomies = OnceCell::new();
    }

    // ------------------------------------------------------------------------
    // Read steps
    // ------------------------------------------------------------------------

    /// Merge `category`/`categories` and `tag`/`tags` into de-duplicated lists.
    fn normalize_categories_and_tags(&mut self) {
        for (singular, plural) in [("category", "categories"), ("tag", "tags")] {
            let values = pluralized_array(&self.data, singular, plural);
            self.data.insert(
                plural,
                Value::Array(values.into_iter().map(Value::String).collect()),
            );
        }
    }

    /// Append one term per entry under each registered taxonomy's key.
    pub fn import_taxonomies_from_data(&mut self) {
        let mut taxonomies = self
            .taxonomies
            .take()
            .unwrap_or_else(|| empty_taxonomies(self.site().taxonomy_types()));
        import_terms(&mut taxonomies, &self.data, &self.id());
        self.taxonomies = OnceCell::from(taxonomies);
    }

    /// Fill in `slug`, `title` and a filename date when missing.
    fn ensure_default_data(&mut self) {
        let relative = slash_path(self.relative_path());
        let slug = match DATE_FILENAME_RE.captures(&relative) {
            Some(caps) => {
                if !self.data.is_set("date") {
                    self.data.insert("date", caps[1].to_string());
                }
                caps[2].to_string()
            }
            None => self.basename_without_ext(),
        };
        let slug = if slug.is_empty() {
            "untitled".to_string()
        } else {
            slug
        };

        if !self.data.is_set("slug") {
            self.data.insert("slug", slug.clone());
        }
        if !self.data.is_set("title") {
            let title = titleize_slug(&slug);
            let title = if title.is_empty() {
                "Untitled".to_string()
            } else {
                title
            };
            self.data.insert("title", title);
        }
    }

    fn execute_inline_expressions(&mut self) {
        let site = Rc::clone(self.site());
        if site.config().build.inline_expressions {
            Transformer::expand_inline(&mut self.data, &site);
        }
    }

    /// Parse `data.date` into a typed date, rejecting unparsable values.
    fn parse_date(&mut self) -> Result<()> {
        let raw = match self.data.get("date").map(Cow::into_owned) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::String(raw)) => raw,
            Some(other) => other.to_string(),
        };
        let date = DateTimeUtc::parse(&raw).ok_or_else(|| ResourceError::InvalidDate {
            path: self.relative_path().to_path_buf(),
            collection: self.collection().label().to_string(),
            value: raw.clone(),
        })?;
        self.date = Some(date);
        self.data.insert("date", date.to_rfc3339());
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn site(&self) -> &Rc<Site> {
        self.model.site()
    }

    pub fn collection(&self) -> &Rc<Collection> {
        self.model.collection()
    }

    pub fn id(&self) -> String {
        self.model.id()
    }

    pub fn relative_path(&self) -> &Path {
        self.model.relative_path()
    }

    /// Original path when the origin has one, else the relative path.
    pub fn path(&self) -> &Path {
        self.model
            .original_path()
            .unwrap_or_else(|| self.model.relative_path())
    }

    pub fn data(&self) -> &ResourceData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ResourceData {
        &mut self.data
    }

    /// Replace `data` wholesale, reinstalling the defaults fallback.
    ///
    /// Non-mappings fail with [`ResourceError::TypeMismatch`] and leave the
    /// current data untouched.
    pub fn set_data(&mut self, value: impl Into<Value>) -> Result<()> {
        let map = ResourceData::map_from_value(value.into())?;
        self.data = ResourceData::with_fallback(map, Some(fallback_for(&self.model)));
        Ok(())
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    pub fn untransformed_content(&self) -> Option<&str> {
        self.untransformed_content.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn set_output(&mut self, output: impl Into<String>) {
        self.output = Some(output.into());
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn relative_url(&self) -> Option<String> {
        self.destination.as_ref().map(Destination::relative_url)
    }

    pub fn absolute_url(&self) -> Option<String> {
        self.destination.as_ref().map(Destination::absolute_url)
    }

    /// Date parsed during read, if any.
    pub fn typed_date(&self) -> Option<DateTimeUtc> {
        self.date
    }

    /// Parsed date, falling back to the site build time.
    pub fn date(&self) -> DateTimeUtc {
        self.date.unwrap_or_else(|| self.site().time())
    }

    pub fn slug(&self) -> Option<String> {
        self.data.get_str("slug")
    }

    pub fn title(&self) -> Option<String> {
        self.data.get_str("title")
    }

    /// `data.permalink` verbatim.
    pub fn permalink(&self) -> Option<String> {
        self.data.get_str("permalink")
    }

    /// `data.summary`, else the first non-empty paragraph of the content.
    pub fn summary(&self) -> String {
        if let Some(summary) = self.data.get_str("summary").filter(|s| !s.is_empty()) {
            return summary;
        }
        let content = self.content.as_deref().unwrap_or_default();
        let mut paragraph = Vec::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() {
                if !paragraph.is_empty() {
                    break;
                }
                continue;
            }
            paragraph.push(line);
        }
        paragraph.join(" ")
    }

    /// File name without its last extension.
    pub fn basename_without_ext(&self) -> String {
        self.relative_path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Last extension with its dot (`.md`), or empty.
    pub fn extname(&self) -> String {
        self.relative_path()
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Relative path without `_`-prefixed segments, date prefixes or the
    /// final extension: `_posts/2023-5-1-hello.md` → `hello`.
    pub fn relative_path_basename_without_prefix(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        for component in self.relative_path().components() {
            let Component::Normal(name) = component else {
                continue;
            };
            let name = name.to_string_lossy();
            let name = match DATE_FILENAME_RE.captures(&name) {
                Some(caps) => format!("{}{}", &caps[2], &caps[3]),
                None => name.into_owned(),
            };
            if !name.starts_with('_') {
                segments.push(name);
            }
        }

        if let Some(last) = segments.last_mut()
            && let Some(stem) = last
                .rsplit_once('.')
                .map(|(stem, _)| stem.to_string())
                .filter(|stem| !stem.is_empty())
        {
            *last = stem;
        }
        segments.join("/")
    }

    /// Layout named by `data.layout`, resolved once.
    ///
    /// A missing layout warns once per name and resolves to `None`.
    pub fn layout(&self) -> Option<&Rc<Layout>> {
        self.layout.get_or_init(|| self.resolve_layout()).as_ref()
    }

    fn resolve_layout(&self) -> Option<Rc<Layout>> {
        let name = self
            .data
            .get_str("layout")
            .filter(|name| !name.is_empty() && name != "none")?;
        let layout = self.site().layouts().get(&name).cloned();
        if layout.is_none() {
            warn_once!(format!("layout:{name}"); "layout";
                "`{}` requested by {} does not exist", name, self.relative_path().display());
        }
        layout
    }

    pub fn transformer(&self) -> &Transformer {
        self.transformer
            .get_or_init(|| Transformer::new(self.site(), &self.extname()))
    }

    pub fn relations(&self) -> &Relations {
        self.relations
            .get_or_init(|| Relations::from_data(self.collection().relations(), &self.data))
    }

    pub fn taxonomies(&self) -> &Taxonomies {
        self.taxonomies
            .get_or_init(|| empty_taxonomies(self.site().taxonomy_types()))
    }
}

impl Publishable for Resource {
    fn requires_destination(&self) -> bool {
        self.collection().write()
            && self.data.get_path("config.output") != Some(Value::Bool(false))
    }

    fn should_write(&self) -> bool {
        self.destination.is_some() && self.site().publisher().publish(self)
    }
}

impl Renderable for Resource {
    fn to_h(&self) -> ResourceSnapshot<'_> {
        ResourceSnapshot::new(self)
    }

    fn to_liquid(&self) -> ResourceDrop<'_> {
        ResourceDrop::new(self)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("id", &self.id())
            .field("relative_path", &self.relative_path())
            .field("collection", &self.collection().label())
            .finish()
    }
}

fn fallback_for(model: &Model) -> DataFallback {
    DataFallback::new(
        Rc::clone(model.site().defaults()),
        model.relative_path().to_path_buf(),
        model.collection().label().to_string(),
    )
}

/// Singular values first, then plural ones; plural strings split on
/// whitespace and commas.
fn pluralized_array(data: &ResourceData, singular: &str, plural: &str) -> Vec<String> {
    let mut values = Vec::new();
    if let Some(value) = data.get(singular) {
        match value.as_ref() {
            Value::Array(items) => values.extend(items.iter().filter_map(scalar_label)),
            other => values.extend(scalar_label(other)),
        }
    }
    if let Some(value) = data.get(plural) {
        match value.as_ref() {
            Value::Array(items) => values.extend(items.iter().filter_map(scalar_label)),
            Value::String(s) => values.extend(
                s.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|item| !item.is_empty())
                    .map(str::to_string),
            ),
            other => values.extend(scalar_label(other)),
        }
    }

    let mut seen = FxHashSet::default();
    values.retain(|value| seen.insert(value.clone()));
    values
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookRegistry;
    use crate::resource::{MemoryOrigin, Orderable};
    use crate::site::test_support::{memory_resource, read_memory, test_site, test_site_with};
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_slug_and_title_from_filename() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "about-us.md", "pages", json!({}), "");
        assert_eq!(page.slug().as_deref(), Some("about-us"));
        assert_eq!(page.title().as_deref(), Some("About Us"));
    }

    #[test]
    fn test_date_prefixed_filename() {
        let (_dir, site) = test_site("");
        let post = read_memory(&site, "_posts/2023-5-1-my-post.md", "posts", json!({}), "");

        assert_eq!(post.slug().as_deref(), Some("my-post"));
        assert_eq!(post.title().as_deref(), Some("My Post"));
        assert_eq!(post.typed_date(), Some(DateTimeUtc::from_ymd(2023, 5, 1)));
        assert_eq!(post.data().get_str("date").as_deref(), Some("2023-05-01T00:00:00Z"));
    }

    #[test]
    fn test_frontmatter_date_wins_over_filename() {
        let (_dir, site) = test_site("");
        let post = read_memory(
            &site,
            "_posts/2023-5-1-my-post.md",
            "posts",
            json!({"date": "2024-02-03 10:00", "title": "Kept", "slug": "custom"}),
            "",
        );
        assert_eq!(post.typed_date(), Some(DateTimeUtc::new(2024, 2, 3, 10, 0, 0)));
        assert_eq!(post.title().as_deref(), Some("Kept"));
        assert_eq!(post.slug().as_deref(), Some("custom"));
    }

    #[test]
    fn test_empty_title_is_defaulted() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "contact.md", "pages", json!({"title": ""}), "");
        assert_eq!(page.title().as_deref(), Some("Contact"));
    }

    #[test]
    fn test_invalid_date_fails_read() {
        let (_dir, site) = test_site("");
        let mut post = memory_resource(&site, "_posts/x.md", "posts", json!({"date": "someday"}), "");
        let err = post.read().unwrap_err();
        match err {
            ResourceError::InvalidDate {
                path,
                collection,
                value,
            } => {
                assert_eq!(path, Path::new("_posts/x.md"));
                assert_eq!(collection, "posts");
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_categories_and_tags_normalized() {
        let (_dir, site) = test_site("");
        let post = read_memory(
            &site,
            "_posts/a.md",
            "posts",
            json!({"category": "news", "categories": "rust, news web", "tag": ["x"], "tags": ["y", "x"]}),
            "",
        );
        assert_eq!(post.data().get("categories").as_deref(), Some(&json!(["news", "rust", "web"])));
        assert_eq!(post.data().get("tags").as_deref(), Some(&json!(["x", "y"])));
    }

    #[test]
    fn test_taxonomies_imported_in_order() {
        let (_dir, site) = test_site("");
        let post = read_memory(&site, "_posts/a.md", "posts", json!({"tags": ["a", "b"]}), "");

        let tags = &post.taxonomies()["tag"];
        assert_eq!(tags.labels().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tags.terms[0].resource, post.id());
        assert!(post.taxonomies()["category"].terms.is_empty());
    }

    #[test]
    fn test_repeated_import_appends() {
        let (_dir, site) = test_site("");
        let mut post = read_memory(&site, "_posts/a.md", "posts", json!({"tags": ["a"]}), "");
        post.import_taxonomies_from_data();
        assert_eq!(post.taxonomies()["tag"].labels().collect::<Vec<_>>(), vec!["a", "a"]);
    }

    #[test]
    fn test_data_only_resource() {
        let (_dir, site) = test_site("");
        let mut item = read_memory(&site, "_data/authors.md", "data", json!({"tags": ["a"]}), "raw");

        assert_eq!(item.content(), Some("raw"));
        assert!(item.untransformed_content().is_none());
        assert!(item.slug().is_none());
        assert!(item.destination().is_none());
        assert!(item.taxonomies()["tag"].terms.is_empty());

        item.transform().unwrap();
        assert!(item.output().is_none());
    }

    #[test]
    fn test_config_output_false_has_no_destination() {
        let (_dir, site) = test_site("");
        let mut page = read_memory(
            &site,
            "secret.md",
            "pages",
            json!({"config": {"output": false}}),
            "",
        );
        assert!(page.collection().write());
        assert!(!page.requires_destination());
        assert!(page.destination().is_none());
        assert!(!page.should_write());
        assert!(matches!(
            page.write(),
            Err(ResourceError::MissingDestination { .. })
        ));
    }

    #[test]
    fn test_set_data_type_mismatch_keeps_data() {
        let (_dir, site) = test_site("");
        let mut page = read_memory(&site, "a.md", "pages", json!({"title": "A"}), "");

        let err = page.set_data(json!(["not", "a", "map"])).unwrap_err();
        assert!(matches!(err, ResourceError::TypeMismatch { found: "list" }));
        assert_eq!(page.title().as_deref(), Some("A"));

        page.set_data(json!({"title": "B"})).unwrap();
        assert_eq!(page.title().as_deref(), Some("B"));
        assert!(page.data().has_fallback());
    }

    #[test]
    fn test_defaults_fallback_after_reassignment() {
        let (_dir, site) = test_site(
            "[[defaults]]\nscope = { collection = \"posts\" }\nvalues = { layout = \"post\" }",
        );
        let mut post = read_memory(&site, "_posts/a.md", "posts", json!({}), "");
        assert_eq!(post.data().get_str("layout").as_deref(), Some("post"));

        post.set_data(json!({})).unwrap();
        assert_eq!(post.data().get_str("layout").as_deref(), Some("post"));
    }

    #[test]
    fn test_path_prefers_original_path() {
        let (_dir, site) = test_site("");
        let origin = MemoryOrigin::new("_posts/page/2.md", "posts").with_original_path("_posts/index.md");
        let resource = Resource::new(Model::new(origin, &site, "posts").unwrap());
        assert_eq!(resource.path(), Path::new("_posts/index.md"));
        assert_eq!(resource.relative_path(), Path::new("_posts/page/2.md"));

        let plain = memory_resource(&site, "b.md", "pages", json!({}), "");
        assert_eq!(plain.path(), Path::new("b.md"));
    }

    #[test]
    fn test_unknown_collection() {
        let (_dir, site) = test_site("");
        let err = Model::new(MemoryOrigin::new("a.md", "nope"), &site, "nope").unwrap_err();
        assert!(matches!(err, ResourceError::UnknownCollection(label) if label == "nope"));
    }

    #[test]
    fn test_relative_path_basename_without_prefix() {
        let (_dir, site) = test_site("");
        let cases = [
            ("_posts/2023-5-1-hello.md", "posts", "hello"),
            ("_posts/rust/2023-05-01-deep.md", "posts", "rust/deep"),
            ("guides/_drafts/intro.md", "pages", "guides/intro"),
            ("archive.tar.gz", "pages", "archive.tar"),
        ];
        for (path, label, expected) in cases {
            let resource = memory_resource(&site, path, label, json!({}), "");
            assert_eq!(resource.relative_path_basename_without_prefix(), expected, "{path}");
        }
    }

    #[test]
    fn test_hooks_fire_in_lifecycle_order() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        for event in HookEvent::ALL {
            let fired = Rc::clone(&fired);
            hooks.register(event, move |_resource: &mut Resource| {
                fired.borrow_mut().push(event.name());
            });
        }
        let (_dir, site) = test_site_with("", hooks);

        let mut page = memory_resource(&site, "a.md", "pages", json!({}), "text");
        page.read().unwrap().transform().unwrap();
        page.write().unwrap();

        assert_eq!(
            *fired.borrow(),
            vec![
                "post_init",
                "pre_read",
                "post_read",
                "pre_transform",
                "post_transform",
                "pre_write",
                "post_write",
            ]
        );
    }

    #[test]
    fn test_hook_can_mutate_resource() {
        let mut hooks = HookRegistry::new();
        hooks.register(HookEvent::PostRead, |resource: &mut Resource| {
            resource.data_mut().insert("hooked", true);
        });
        let (_dir, site) = test_site_with("", hooks);
        let page = read_memory(&site, "a.md", "pages", json!({}), "");
        assert_eq!(page.data().get_bool("hooked"), Some(true));
    }

    #[test]
    fn test_transform_markdown_and_write() {
        let (dir, site) = test_site("");
        let mut page = read_memory(&site, "hello.md", "pages", json!({}), "# Hello\n\nWorld");
        page.transform().unwrap();

        let output = page.output().unwrap();
        assert!(output.contains("<h1>Hello</h1>"));
        assert!(output.contains("<p>World</p>"));
        assert_eq!(page.untransformed_content(), Some("# Hello\n\nWorld"));

        assert!(page.should_write());
        let path = page.write().unwrap();
        assert_eq!(path, dir.path().join("output/hello/index.html"));
    }

    #[test]
    fn test_missing_layout_resolves_to_none() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "a.md", "pages", json!({"layout": "ghost"}), "");
        assert!(page.layout().is_none());

        let bare = read_memory(&site, "b.md", "pages", json!({}), "");
        assert!(bare.layout().is_none());
    }

    #[test]
    fn test_summary() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "a.md", "pages", json!({}), "\nFirst line\nstill first\n\nSecond");
        assert_eq!(page.summary(), "First line still first");

        let page = read_memory(&site, "b.md", "pages", json!({"summary": "Given"}), "Body");
        assert_eq!(page.summary(), "Given");
    }

    #[test]
    fn test_extname_and_basename() {
        let (_dir, site) = test_site("");
        let page = memory_resource(&site, "docs/setup.markdown", "pages", json!({}), "");
        assert_eq!(page.extname(), ".markdown");
        assert_eq!(page.basename_without_ext(), "setup");
    }

    #[test]
    fn test_to_h_snapshot() {
        let (_dir, site) = test_site("url = \"https://example.com\"");
        let mut page = read_memory(&site, "a.md", "pages", json!({"tags": ["t"]}), "Body");
        page.transform().unwrap();

        let value = serde_json::to_value(page.to_h()).unwrap();
        assert_eq!(value["id"], "memory://pages.collection/a.md");
        assert_eq!(value["relative_url"], "/a/");
        assert_eq!(value["absolute_url"], "https://example.com/a/");
        assert_eq!(value["relative_path"], "a.md");
        assert_eq!(value["data"]["title"], "A");
        assert_eq!(value["taxonomies"]["tag"]["terms"][0]["label"], "t");
        assert_eq!(value["content"], "Body");
        assert!(value["output"].as_str().unwrap().contains("<p>Body</p>"));
    }

    #[test]
    fn test_to_liquid_drop() {
        let (_dir, site) = test_site("");
        let page = read_memory(&site, "a.md", "pages", json!({"permalink": "/x/"}), "Hi");
        let value = serde_json::to_value(page.to_liquid()).unwrap();
        assert_eq!(value["permalink"], "/x/");
        assert_eq!(value["slug"], "a");
        assert_eq!(value["summary"], "Hi");
        assert_eq!(value["relative_url"], "/x/");
        assert!(value["layout"].is_null());
    }

    #[test]
    fn test_reread_does_not_duplicate_terms() {
        let (_dir, site) = test_site("");
        let mut post = read_memory(&site, "_posts/a.md", "posts", json!({"tags": ["a"]}), "");
        post.read().unwrap();
        assert_eq!(post.taxonomies()["tag"].terms.len(), 1);
        assert!(post.compare(&post).is_eq());
    }
}
