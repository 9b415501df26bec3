//! Layout registry loaded from the layouts directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use jwalk::WalkDir;
use rustc_hash::FxHashMap;

use crate::debug;
use crate::resource::{DataMap, ResourceError, Result, frontmatter};

/// A template wrapping resource output; may name a parent `layout`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: String,
    pub path: PathBuf,
    pub data: DataMap,
    pub content: String,
}

impl Layout {
    pub fn new(name: impl Into<String>, data: DataMap, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            data,
            content: content.into(),
        }
    }

    /// Name of the layout this one is placed in.
    pub fn parent(&self) -> Option<&str> {
        self.data
            .get("layout")
            .and_then(|value| value.as_str())
            .filter(|name| !name.is_empty() && *name != "none")
    }
}

/// Layouts keyed by path relative to the layouts dir, without extension.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    layouts: FxHashMap<String, Rc<Layout>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file under `dir`. A missing directory yields no layouts.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut registry = Self::new();
        if !dir.is_dir() {
            return Ok(registry);
        }

        let files = WalkDir::new(dir)
            .sort(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path());

        for path in files {
            let Some(name) = layout_name(dir, &path) else {
                continue;
            };
            let raw = fs::read_to_string(&path).map_err(|err| ResourceError::Io(path.clone(), err))?;
            let (data, body) =
                frontmatter::extract(&raw).map_err(|message| ResourceError::Frontmatter {
                    path: path.clone(),
                    message,
                })?;
            registry.insert(Layout {
                name,
                path: path.clone(),
                data,
                content: body.to_string(),
            });
        }

        debug!("layout"; "loaded {} layouts from {}", registry.len(), dir.display());
        Ok(registry)
    }

    pub fn insert(&mut self, layout: Layout) {
        self.layouts.insert(layout.name.clone(), Rc::new(layout));
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Layout>> {
        self.layouts.get(name)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

/// `post.html` → `post`, `blog/entry.html` → `blog/entry`. Hidden files skip.
fn layout_name(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?;
    let mut parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.iter().any(|part| part.starts_with('.')) {
        return None;
    }
    let file = parts.pop()?;
    let stem = Path::new(&file).file_stem()?.to_string_lossy().into_owned();
    parts.push(stem);
    Some(parts.join("/"))
}
