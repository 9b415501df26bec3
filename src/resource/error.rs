//! Resource lifecycle errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, transforming or writing a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// `data` was assigned something other than a key-value mapping.
    #[error("resource data must be a key-value mapping, got {found}")]
    TypeMismatch { found: &'static str },

    /// `write` was called on a resource without a destination.
    #[error("`{path}` has no destination, gate writes on `should_write()`")]
    MissingDestination { path: PathBuf },

    #[error("invalid date `{value}` in `{path}` (collection `{collection}`)")]
    InvalidDate {
        path: PathBuf,
        collection: String,
        value: String,
    },

    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    #[error("invalid front matter in `{path}`: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("{converter} failed on `{path}`: {message}")]
    Convert {
        converter: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

pub type Result<T, E = ResourceError> = std::result::Result<T, E>;
