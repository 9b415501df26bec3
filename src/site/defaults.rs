//! Front matter defaults from `[[defaults]]` scopes.

use std::path::Path;

use serde_json::Value;

use crate::config::DefaultsEntry;

/// Supplies a value for a key a resource's data does not store.
pub trait DefaultsResolver {
    fn resolve(&self, path: &Path, collection: &str, key: &str) -> Option<Value>;
}

/// Resolver over the configured `[[defaults]]` entries.
///
/// The most specific matching scope wins (path and collection, then path,
/// then collection, then global); ties go to the later entry.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterDefaults {
    entries: Vec<DefaultsEntry>,
}

impl FrontmatterDefaults {
    pub fn new(entries: Vec<DefaultsEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Specificity of `entry` for this resource, `None` when out of scope.
    fn specificity(entry: &DefaultsEntry, path: &Path, collection: &str) -> Option<u8> {
        let scope = &entry.scope;
        let scope_path = scope.path.trim_matches('/');
        let path_scoped = !scope_path.is_empty();
        if path_scoped && !path.starts_with(scope_path) {
            return None;
        }
        let collection_scoped = match &scope.collection {
            Some(label) if label == collection => true,
            Some(_) => return None,
            None => false,
        };
        Some(u8::from(path_scoped) * 2 + u8::from(collection_scoped))
    }
}

impl DefaultsResolver for FrontmatterDefaults {
    fn resolve(&self, path: &Path, collection: &str, key: &str) -> Option<Value> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let value = entry.values.get(key)?;
                let rank = Self::specificity(entry, path, collection)?;
                Some(((rank, index), value))
            })
            .max_by_key(|(rank, _)| *rank)
            .map(|(_, value)| value.clone())
    }
}
