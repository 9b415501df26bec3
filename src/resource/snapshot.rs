//! Serializable views of a resource for JSON output and templates.

use std::path::Path;

use serde::Serialize;

use super::{Resource, ResourceData, Taxonomies};
use crate::utils::date::DateTimeUtc;

/// Hash form of a resource: everything a debug dump or template needs.
#[derive(Debug, Serialize)]
pub struct ResourceSnapshot<'a> {
    pub id: String,
    pub absolute_url: Option<String>,
    pub relative_url: Option<String>,
    pub relative_path: &'a Path,
    pub date: DateTimeUtc,
    pub data: &'a ResourceData,
    pub taxonomies: &'a Taxonomies,
    pub untransformed_content: Option<&'a str>,
    pub content: Option<&'a str>,
    pub output: Option<&'a str>,
}

impl<'a> ResourceSnapshot<'a> {
    pub fn new(resource: &'a Resource) -> Self {
        let destination = resource.destination();
        Self {
            id: resource.id(),
            absolute_url: destination.map(|dest| dest.absolute_url()),
            relative_url: destination.map(|dest| dest.relative_url()),
            relative_path: resource.relative_path(),
            date: resource.date(),
            data: resource.data(),
            taxonomies: resource.taxonomies(),
            untransformed_content: resource.untransformed_content(),
            content: resource.content(),
            output: resource.output(),
        }
    }
}

/// Template-facing drop: the snapshot plus derived convenience fields.
#[derive(Debug, Serialize)]
pub struct ResourceDrop<'a> {
    #[serde(flatten)]
    pub snapshot: ResourceSnapshot<'a>,
    pub layout: Option<&'a str>,
    pub permalink: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub summary: String,
}

impl<'a> ResourceDrop<'a> {
    pub fn new(resource: &'a Resource) -> Self {
        Self {
            snapshot: ResourceSnapshot::new(resource),
            layout: resource.layout().map(|layout| layout.name.as_str()),
            permalink: resource.permalink(),
            slug: resource.slug(),
            title: resource.title(),
            summary: resource.summary(),
        }
    }
}
