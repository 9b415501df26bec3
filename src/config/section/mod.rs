//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tola.toml`:
//!
//! | Module       | TOML Section            | Purpose                              |
//! |--------------|-------------------------|--------------------------------------|
//! | `build`      | `[build]`               | Source/output paths, publishing      |
//! | `collection` | `[collections.<label>]` | Collection directories and policies  |
//! | `defaults`   | `[[defaults]]`          | Scoped front matter defaults         |
//! | `site`       | `[site]`                | Site url, base path, permalink style |
//! | `slug`       | `[build.slug]`          | Slug generation                      |
//! | `taxonomy`   | `[taxonomies.<label>]`  | Taxonomy data keys                   |

mod build;
mod collection;
mod defaults;
mod site;
mod slug;
mod taxonomy;

pub use build::BuildSectionConfig;
pub use collection::{CollectionConfig, RelationsConfig, SortDirection, builtin_collections};
pub use defaults::{DefaultsEntry, DefaultsScope};
pub use site::{PermalinkStyle, SiteSectionConfig};
pub use slug::{SlugCase, SlugConfig, SlugMode, SlugSeparator};
pub use taxonomy::{TaxonomyConfig, builtin_taxonomies};
