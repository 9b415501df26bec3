//! Content converters.

use pulldown_cmark::{Options, Parser, html};

use crate::resource::{Resource, Result};

/// Turns content of one format into another.
///
/// Converters are tried by descending [`Converter::priority`]; every
/// converter whose [`Converter::matches`] accepts the source extension runs.
pub trait Converter {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    /// `ext` includes the leading dot (`.md`), or is empty.
    fn matches(&self, ext: &str) -> bool;

    /// Extension of the converted output.
    fn output_ext(&self, ext: &str) -> String;

    fn convert(&self, input: &str, resource: &Resource) -> Result<String>;
}

/// CommonMark with tables, footnotes, strikethrough and task lists.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConverter {
    options: Options,
}

impl MarkdownConverter {
    pub const EXTENSIONS: [&'static str; 3] = [".md", ".markdown", ".mkd"];

    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for MarkdownConverter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn matches(&self, ext: &str) -> bool {
        Self::EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }

    fn output_ext(&self, _ext: &str) -> String {
        ".html".to_string()
    }

    fn convert(&self, input: &str, _resource: &Resource) -> Result<String> {
        let parser = Parser::new_ext(input, self.options);
        let mut out = String::with_capacity(input.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

/// Passes content through unchanged. Matches everything, runs last.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl Converter for IdentityConverter {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn priority(&self) -> i32 {
        i32::MIN
    }

    fn matches(&self, _ext: &str) -> bool {
        true
    }

    fn output_ext(&self, ext: &str) -> String {
        ext.to_string()
    }

    fn convert(&self, input: &str, _resource: &Resource) -> Result<String> {
        Ok(input.to_string())
    }
}
