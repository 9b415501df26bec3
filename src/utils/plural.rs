//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 resources)
/// - `plural_s(1)` -> `""` (1 resource)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "resource")` -> `"0 resources"`
/// - `plural_count(1, "resource")` -> `"1 resource"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

/// Singular form of a collection label, used as a relation key.
///
/// - `authors` -> `author`
/// - `categories` -> `category`
/// - `boxes` -> `box`
/// - `news` -> `news`
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with(['s', 'u']) && !word.ends_with("ews") => {
            stem.to_string()
        }
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "resource"), "0 resources");
        assert_eq!(plural_count(1, "resource"), "1 resource");
        assert_eq!(plural_count(3, "layout"), "3 layouts");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("authors"), "author");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("author"), "author");
    }
}
