//! Origins: where a resource's raw data and body come from.

use std::fs;
use std::path::{Path, PathBuf};

use super::{DataMap, ResourceError, Result, frontmatter};

/// Raw backing source of one resource.
pub trait Origin {
    /// Stable identifier, unique within a build.
    fn id(&self) -> String;

    /// Path relative to the site source directory.
    fn relative_path(&self) -> &Path;

    /// Path of the content this origin was generated from, if any.
    fn original_path(&self) -> Option<&Path> {
        None
    }

    /// Extract `(front matter data, body)`.
    fn read(&self) -> Result<(DataMap, String)>;
}

/// File under the source directory with optional front matter.
#[derive(Debug, Clone)]
pub struct FileOrigin {
    source_dir: PathBuf,
    relative_path: PathBuf,
    label: String,
}

impl FileOrigin {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            relative_path: relative_path.into(),
            label: label.into(),
        }
    }

    pub fn absolute_path(&self) -> PathBuf {
        self.source_dir.join(&self.relative_path)
    }
}

impl Origin for FileOrigin {
    fn id(&self) -> String {
        format!(
            "file://{}.collection/{}",
            self.label,
            to_url_path(&self.relative_path)
        )
    }

    fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    fn read(&self) -> Result<(DataMap, String)> {
        let path = self.absolute_path();
        let raw = fs::read_to_string(&path).map_err(|err| ResourceError::Io(path, err))?;
        let (data, body) =
            frontmatter::extract(&raw).map_err(|message| ResourceError::Frontmatter {
                path: self.relative_path.clone(),
                message,
            })?;
        Ok((data, body.to_string()))
    }
}

/// Model-backed origin holding data and content in memory.
///
/// Used for generated resources (pagination pages, API-imported content).
#[derive(Debug, Clone, Default)]
pub struct MemoryOrigin {
    relative_path: PathBuf,
    original_path: Option<PathBuf>,
    label: String,
    data: DataMap,
    content: String,
}

impl MemoryOrigin {
    pub fn new(relative_path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: DataMap) -> Self {
        self.data = data;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_original_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.original_path = Some(path.into());
        self
    }
}

impl Origin for MemoryOrigin {
    fn id(&self) -> String {
        format!(
            "memory://{}.collection/{}",
            self.label,
            to_url_path(&self.relative_path)
        )
    }

    fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    fn original_path(&self) -> Option<&Path> {
        self.original_path.as_deref()
    }

    fn read(&self) -> Result<(DataMap, String)> {
        Ok((self.data.clone(), self.content.clone()))
    }
}

/// `/`-separated form of a relative path, independent of the platform.
fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
