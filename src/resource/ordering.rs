//! Total order over resources (date, then path) and sibling navigation.

use std::any::Any;
use std::cmp::Ordering;
use std::path::Path;
use std::ptr;

use serde_json::Value;

use super::Resource;
use crate::utils::date::DateTimeUtc;

/// Date component of the sort key.
///
/// A missing date is keyed as the site build time, matching
/// [`Resource::date`]. Only an unparsable raw value on a resource that has not
/// been read stays `Raw`, ordered before every typed date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DateKey {
    Raw(String),
    Typed(DateTimeUtc),
}

/// Sortable by date, then path.
pub trait Orderable {
    /// Compare with another resource; always a total order.
    fn compare(&self, other: &Self) -> Ordering;

    /// Compare with an arbitrary value. `None` for non-resources.
    fn compare_any(&self, other: &dyn Any) -> Option<Ordering>;

    /// Resource after this one in `resources`, located by identity.
    fn next_resource<'a>(&self, resources: &'a [Resource]) -> Option<&'a Resource>;

    /// Resource before this one in `resources`, located by identity.
    fn previous_resource<'a>(&self, resources: &'a [Resource]) -> Option<&'a Resource>;
}

impl Resource {
    fn date_key(&self) -> DateKey {
        if let Some(date) = self.typed_date() {
            return DateKey::Typed(date);
        }
        match self.data().get("date").as_deref() {
            Some(Value::String(raw)) => match DateTimeUtc::parse(raw) {
                Some(date) => DateKey::Typed(date),
                None => DateKey::Raw(raw.clone()),
            },
            Some(Value::Null) | None => DateKey::Typed(self.date()),
            Some(other) => DateKey::Raw(other.to_string()),
        }
    }

    fn position_in(&self, resources: &[Resource]) -> Option<usize> {
        resources.iter().position(|candidate| ptr::eq(candidate, self))
    }
}

impl Orderable for Resource {
    fn compare(&self, other: &Self) -> Ordering {
        self.date_key()
            .cmp(&other.date_key())
            .then_with(|| compare_paths(self.path(), other.path()))
    }

    fn compare_any(&self, other: &dyn Any) -> Option<Ordering> {
        other
            .downcast_ref::<Resource>()
            .map(|other| self.compare(other))
    }

    fn next_resource<'a>(&self, resources: &'a [Resource]) -> Option<&'a Resource> {
        let index = self.position_in(resources)?;
        resources.get(index + 1)
    }

    fn previous_resource<'a>(&self, resources: &'a [Resource]) -> Option<&'a Resource> {
        let index = self.position_in(resources)?;
        index.checked_sub(1).and_then(|prev| resources.get(prev))
    }
}

fn compare_paths(a: &Path, b: &Path) -> Ordering {
    a.as_os_str().cmp(b.as_os_str())
}

/// Sort in place by [`Orderable::compare`].
pub fn sort_resources(resources: &mut [Resource]) {
    resources.sort_by(|a, b| a.compare(b));
}
