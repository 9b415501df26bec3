//! Resource model: one content unit from origin to written output.
//!
//! # Lifecycle
//!
//! ```text
//! Model (origin + site + collection)
//!   → Resource::new        post_init
//!   → read()               pre_read → data/content, taxonomies, defaults,
//!                          inline expressions, date, destination → post_read
//!   → transform()          pre_transform → converters + layouts → post_transform
//!   → write()              pre_write → destination.write → post_write
//! ```
//!
//! Data-only resources stop after populating `data` and `content`.

mod base;
mod data;
mod destination;
mod error;
pub mod frontmatter;
mod model;
mod ordering;
mod origin;
mod permalink;
mod relations;
mod snapshot;
mod taxonomy;

pub use base::{Publishable, Renderable, Resource};
pub use data::{DataFallback, ResourceData};
pub use destination::{Destination, format_url};
pub use error::{ResourceError, Result};
pub use model::Model;
pub use ordering::{Orderable, sort_resources};
pub use origin::{FileOrigin, MemoryOrigin, Origin};
pub use permalink::PermalinkProcessor;
pub use relations::Relations;
pub use snapshot::{ResourceDrop, ResourceSnapshot};
pub use taxonomy::{Taxonomies, TaxonomyEntry, TaxonomyTerm, TaxonomyType};

/// Ordered string-keyed mapping backing resource data.
pub type DataMap = serde_json::Map<String, serde_json::Value>;
