//! Resource model and transformation pipeline for static content builds.
//!
//! A [`site::Site`] holds configuration and collaborators. Collections read
//! [`resource::Resource`]s from their origin; each resource is then read,
//! transformed and written:
//!
//! ```text
//! tola.toml ─▶ SiteConfig ─▶ Site ─▶ Collection::read_resources
//!                                        │
//!                                        ▼
//!                 Resource::read ─▶ Resource::transform ─▶ Resource::write
//! ```

pub mod config;
pub mod hooks;
pub mod logger;
pub mod resource;
pub mod site;
pub mod transform;
pub mod utils;
