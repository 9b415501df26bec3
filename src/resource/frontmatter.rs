//! Front matter extraction from YAML-like (`---`) or TOML (`+++`) blocks.

use serde_json::{Number, Value};

use super::DataMap;

/// Split `content` into `(data, body)`.
///
/// Content without a front matter block yields empty data and the full body.
pub fn extract(content: &str) -> Result<(DataMap, &str), String> {
    match detect_frontmatter(content) {
        Some((fm, body, true)) => Ok((parse_toml(fm)?, body)),
        Some((fm, body, false)) => Ok((parse_yaml_like(fm), body)),
        None => Ok((DataMap::new(), content)),
    }
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if !trimmed.starts_with(fence) {
            continue;
        }
        let closing = format!("\n{fence}");
        if let Some(end) = trimmed[3..].find(&closing) {
            let fm = trimmed[3..3 + end].trim();
            let rest = &trimmed[3 + end + closing.len()..];
            // Drop the remainder of the closing fence line.
            let body = rest.split_once('\n').map_or("", |(_, body)| body);
            return Some((fm, body.trim_start_matches(['\r', '\n']), is_toml));
        }
    }

    None
}

fn parse_toml(content: &str) -> Result<DataMap, String> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| format!("invalid TOML front matter: {e}"))?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// TOML datetimes become strings so that date parsing sees them like YAML dates.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Parse YAML-like front matter.
///
/// Supports `key: value` scalars, inline `[a, b]` lists, `- item` lists and
/// one level of nested `key:` mappings.
fn parse_yaml_like(content: &str) -> DataMap {
    let mut data = DataMap::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || line.starts_with([' ', '\t']) {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        if !value.is_empty() {
            data.insert(key, parse_yaml_value(value));
            continue;
        }

        // Block value: collect the indented lines that follow.
        let mut items = Vec::new();
        let mut nested = DataMap::new();
        while let Some(next) = lines.peek() {
            if !next.starts_with([' ', '\t', '-']) || next.trim().is_empty() {
                break;
            }
            let next = next.trim();
            if let Some(item) = next.strip_prefix('-') {
                items.push(parse_yaml_value(item.trim()));
            } else if let Some((k, v)) = next.split_once(':') {
                nested.insert(k.trim().to_string(), parse_yaml_value(v.trim()));
            }
            lines.next();
        }

        let value = if !items.is_empty() {
            Value::Array(items)
        } else if !nested.is_empty() {
            Value::Object(nested)
        } else {
            Value::Null
        };
        data.insert(key, value);
    }

    data
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Null: `null`, `~`
/// - Numbers: `123`, `3.14`
/// - Inline lists: `[a, b, c]` -> `["a", "b", "c"]`
/// - Quoted strings: `"a, b"` -> `"a, b"`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> Value {
    let s = s.trim();

    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.is_empty() || s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    if let Some(unquoted) = strip_quotes(s) {
        return Value::String(unquoted.to_string());
    }

    if let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return Value::Array(
            inner
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(parse_yaml_value)
                .collect(),
        );
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = Number::from_f64(n)
    {
        return Value::Number(num);
    }

    Value::String(s.to_string())
}

fn strip_quotes(s: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        s.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: [a, b]\n---\n\n# Body";
        let (data, body) = extract(content).unwrap();

        assert_eq!(data["title"], "Hello");
        assert_eq!(data["date"], "2024-01-01");
        assert_eq!(data["tags"], json!(["a", "b"]));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (data, body) = extract(content).unwrap();

        assert_eq!(data["title"], "Hello");
        assert_eq!(data["date"], "2024-01-01");
        assert_eq!(data["tags"], json!(["a", "b"]));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let (data, body) = extract("# Just content").unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "# Just content");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(extract("+++\ntitle = \n+++\nbody").is_err());
    }

    #[test]
    fn test_yaml_scalars() {
        let content = "---\ncount: 42\nratio: 0.5\nflag: true\nnothing: ~\nquoted: \"a, b\"\n---\n";
        let (data, _) = extract(content).unwrap();
        assert_eq!(data["count"], json!(42));
        assert_eq!(data["ratio"], json!(0.5));
        assert_eq!(data["flag"], json!(true));
        assert_eq!(data["nothing"], Value::Null);
        assert_eq!(data["quoted"], "a, b");
    }

    #[test]
    fn test_yaml_block_list_and_nested_map() {
        let content = "---\ncategories:\n  - news\n  - rust\nconfig:\n  output: false\ntitle: After\n---\nbody";
        let (data, body) = extract(content).unwrap();
        assert_eq!(data["categories"], json!(["news", "rust"]));
        assert_eq!(data["config"], json!({"output": false}));
        assert_eq!(data["title"], "After");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_yaml_preserves_key_order() {
        let (data, _) = extract("---\nzeta: 1\nalpha: 2\n---\n").unwrap();
        let keys: Vec<_> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
