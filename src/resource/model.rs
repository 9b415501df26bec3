//! The model a resource wraps: an origin bound to its site and collection.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use super::{DataMap, Origin, ResourceError, Result};
use crate::site::{Collection, Site};

/// An origin bound to a site and one of its collections.
pub struct Model {
    origin: Box<dyn Origin>,
    site: Rc<Site>,
    collection: Rc<Collection>,
}

impl Model {
    /// Bind `origin` to the collection labeled `label`.
    pub fn new(origin: impl Origin + 'static, site: &Rc<Site>, label: &str) -> Result<Self> {
        let collection = site
            .collection(label)
            .cloned()
            .ok_or_else(|| ResourceError::UnknownCollection(label.to_string()))?;
        Ok(Self {
            origin: Box::new(origin),
            site: Rc::clone(site),
            collection,
        })
    }

    pub fn origin(&self) -> &dyn Origin {
        self.origin.as_ref()
    }

    pub fn site(&self) -> &Rc<Site> {
        &self.site
    }

    pub fn collection(&self) -> &Rc<Collection> {
        &self.collection
    }

    pub fn id(&self) -> String {
        self.origin.id()
    }

    pub fn relative_path(&self) -> &Path {
        self.origin.relative_path()
    }

    pub fn original_path(&self) -> Option<&Path> {
        self.origin.original_path()
    }

    pub fn read(&self) -> Result<(DataMap, String)> {
        self.origin.read()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.origin.id())
            .field("collection", &self.collection.label())
            .finish()
    }
}
