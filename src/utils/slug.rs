//! Slug generation for permalink segments and default titles.

use crate::config::{SlugCase, SlugConfig, SlugMode};

/// Characters that are never allowed in a URL path segment.
const UNSAFE_CHARS: &[char] = &[
    '/', '\\', '?', '%', '*', ':', '|', '"', '<', '>', '#', '&', '\'', '=', '+', '[', ']', '{',
    '}', '!', '@', '$', ';', ',', '^', '`', '~', '(', ')',
];

/// Slugify a single text fragment according to `config`.
///
/// ```ignore
/// slugify("Hello, World!", &SlugConfig::default()) // "hello-world"
/// ```
pub fn slugify(text: &str, config: &SlugConfig) -> String {
    let sep = config.separator.as_char();
    let slug = match config.path {
        SlugMode::No => return text.to_string(),
        SlugMode::Full => {
            return collapse(&deunicode::deunicode(text), sep, |c| c.is_ascii_alphanumeric())
                .to_ascii_lowercase();
        }
        SlugMode::Ascii => collapse(&deunicode::deunicode(text), sep, |c| c.is_ascii_alphanumeric()),
        SlugMode::Safe => collapse(text, sep, |c| {
            !c.is_whitespace() && !c.is_control() && !UNSAFE_CHARS.contains(&c) && c != sep
        }),
    };
    apply_case(&slug, &config.case, sep)
}

/// Slugify every `/`-separated segment of a path, dropping empty segments.
pub fn slugify_path(path: &str, config: &SlugConfig) -> String {
    path.split('/')
        .map(|segment| slugify(segment, config))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Human-readable title from a slug: `my-first-post` -> `My First Post`.
pub fn titleize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace every run of characters rejected by `keep` with a single `sep`.
fn collapse(text: &str, sep: char, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.chars() {
        if keep(c) {
            if pending_sep && !out.is_empty() {
                out.push(sep);
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

fn apply_case(slug: &str, case: &SlugCase, sep: char) -> String {
    match case {
        SlugCase::Lower => slug.to_lowercase(),
        SlugCase::Upper => slug.to_uppercase(),
        SlugCase::Preserve => slug.to_string(),
        SlugCase::Capitalize => slug
            .split(sep)
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(&sep.to_string()),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
