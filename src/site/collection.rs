//! Collections: labeled groups of resources sharing a directory and policy.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use jwalk::WalkDir;

use super::Site;
use crate::config::{CollectionConfig, RelationsConfig, SortDirection};
use crate::resource::{FileOrigin, Model, Resource, Result, sort_resources};
use crate::utils::plural::plural_count;
use crate::{debug, log};

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// A named, ordered grouping of resources.
#[derive(Debug, Clone)]
pub struct Collection {
    label: String,
    directory: String,
    config: CollectionConfig,
}

impl Collection {
    pub fn new(label: impl Into<String>, config: CollectionConfig) -> Self {
        let label = label.into();
        let directory = config.directory_for(&label);
        Self {
            label,
            directory,
            config,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Directory relative to the source dir; empty for the source root.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Resources get a destination and are written.
    pub fn write(&self) -> bool {
        self.config.writes()
    }

    /// Data-only: no normalization, taxonomies or transform.
    pub fn data(&self) -> bool {
        self.config.data
    }

    pub fn permalink(&self) -> Option<&str> {
        self.config.permalink.as_deref()
    }

    pub fn relations(&self) -> &RelationsConfig {
        &self.config.relations
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.config.sort_direction
    }

    /// Read every resource under the collection directory, sorted.
    pub fn read_resources(&self, site: &Rc<Site>) -> Result<Vec<Resource>> {
        let source_dir = site.config().source_dir();
        let files = self.collect_files(&source_dir);

        let mut resources = Vec::with_capacity(files.len());
        for relative in files {
            let origin = FileOrigin::new(&source_dir, relative, &self.label);
            let mut resource = Resource::new(Model::new(origin, site, &self.label)?);
            resource.read()?;
            resources.push(resource);
        }

        sort_resources(&mut resources);
        if self.sort_direction() == SortDirection::Descending {
            resources.reverse();
        }

        log!("read"; "{} in {}", plural_count(resources.len(), "resource"), self.label);
        Ok(resources)
    }

    /// Files of this collection, relative to `source_dir`.
    ///
    /// The root collection skips `_`-prefixed and hidden directories, which
    /// hold other collections, layouts and dotfiles.
    fn collect_files(&self, source_dir: &Path) -> Vec<PathBuf> {
        let dir = source_dir.join(&self.directory);
        if !dir.is_dir() {
            debug!("read"; "{} has no directory at {}", self.label, dir.display());
            return Vec::new();
        }

        let skip_underscored = self.directory.is_empty();
        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .sort(true)
            .into_iter()
            .filter_map(|entry| walk_ok(entry, &self.label))
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                let relative = path.strip_prefix(source_dir).ok()?.to_path_buf();
                let within = relative.strip_prefix(&self.directory).ok()?;
                is_content_path(within, skip_underscored).then_some(relative)
            })
            .collect();
        files.sort();
        files
    }
}

/// Keep a walked entry, logging and skipping walk errors.
fn walk_ok<T, E: std::fmt::Display>(entry: std::result::Result<T, E>, label: &str) -> Option<T> {
    entry
        .map_err(|e| log!("read"; "skipping entry in {}: {}", label, e))
        .ok()
}

/// Hidden entries and ignored files never count; `_` entries only count
/// inside a named collection directory.
fn is_content_path(path: &Path, skip_underscored: bool) -> bool {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    if IGNORED_FILES.contains(&name.as_ref()) {
        return false;
    }
    path.components().all(|component| {
        let part = component.as_os_str().to_string_lossy();
        !part.starts_with('.') && !(skip_underscored && part.starts_with('_'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Orderable;
    use crate::site::test_support::test_site_in;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join("src").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_pages_skip_underscored_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md", "home");
        write(dir.path(), "about/team.md", "team");
        write(dir.path(), "_posts/2024-01-01-a.md", "post");
        write(dir.path(), "_layouts/default.html", "{{ content }}");
        write(dir.path(), ".hidden/x.md", "x");
        write(dir.path(), "_drafts.md", "draft");

        let site = test_site_in(dir.path(), "");
        let pages = site.collection("pages").unwrap().read_resources(&site).unwrap();
        let paths: Vec<_> = pages.iter().map(|p| p.relative_path().to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("about/team.md"), PathBuf::from("index.md")]
        );
    }

    #[test]
    fn test_posts_sorted_by_date_then_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_posts/2024-01-02-b.md", "");
        write(dir.path(), "_posts/2024-01-01-z.md", "");
        write(dir.path(), "_posts/2024-01-01-a.md", "");

        let site = test_site_in(dir.path(), "");
        let posts = site.collection("posts").unwrap().read_resources(&site).unwrap();
        let slugs: Vec<_> = posts.iter().filter_map(Resource::slug).collect();
        assert_eq!(slugs, vec!["a", "z", "b"]);
        assert!(posts[0].compare(&posts[1]).is_lt());
    }

    #[test]
    fn test_descending_collection() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_notes/2024-01-01-old.md", "");
        write(dir.path(), "_notes/2024-02-01-new.md", "");

        let site = test_site_in(dir.path(), "[collections.notes]\nsort_direction = \"descending\"");
        let notes = site.collection("notes").unwrap().read_resources(&site).unwrap();
        let slugs: Vec<_> = notes.iter().filter_map(Resource::slug).collect();
        assert_eq!(slugs, vec!["new", "old"]);
    }

    #[test]
    fn test_named_collection_keeps_underscored_children() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_docs/_partials/x.md", "");
        write(dir.path(), "_docs/y.md", "");

        let site = test_site_in(dir.path(), "[collections.docs]");
        let docs = site.collection("docs").unwrap().read_resources(&site).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_walk_errors_are_skipped() {
        let entries: Vec<std::result::Result<u8, String>> =
            vec![Ok(1), Err("permission denied".into()), Ok(2)];
        let kept: Vec<u8> = entries.into_iter().filter_map(|e| walk_ok(e, "posts")).collect();
        assert_eq!(kept, vec![1, 2]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let site = test_site_in(dir.path(), "");
        let data = site.collection("data").unwrap().read_resources(&site).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_data_collection_resources_are_data_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_data/team.md", "---\nlead: ada\n---\n");

        let site = test_site_in(dir.path(), "");
        let data = site.collection("data").unwrap().read_resources(&site).unwrap();
        assert_eq!(data[0].data().get_str("lead").as_deref(), Some("ada"));
        assert!(data[0].destination().is_none());
        assert!(data[0].slug().is_none());
    }
}
