//! `[[defaults]]` configuration: front matter values applied by scope.

use serde::{Deserialize, Serialize};

use crate::resource::DataMap;

/// One scoped block of default front matter values.
///
/// ```toml
/// [[defaults]]
/// scope = { path = "_posts/drafts", collection = "posts" }
/// values = { layout = "post", published = false }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsEntry {
    pub scope: DefaultsScope,
    pub values: DataMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsScope {
    /// Relative path prefix. Empty matches every path.
    pub path: String,
    /// Collection label. `None` matches every collection.
    pub collection: Option<String>,
}
