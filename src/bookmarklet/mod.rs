//! Bookmarklet generation
//!
//! The script template carries a `var PATTERNS = {...};` literal. Generation
//! minifies the template and swaps that literal for one built from the three
//! user-edited pattern files, so users tune extraction without touching JS.

mod minify;

pub use minify::minify;

use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};

use crate::config::AppPaths;
use crate::config::io::read_entries;

/// Template compiled into the binary
pub const BUILTIN_TEMPLATE: &str = include_str!("../../assets/bookmarklet_gpt_extract.js");

/// Line opening the prompt in a chat reply
pub const START_MARKER: &str = "---SOP---";

/// Line closing the prompt in a chat reply
pub const END_MARKER: &str = "---EOP---";

/// Error type for bookmarklet generation
#[derive(Debug, thiserror::Error)]
pub enum BookmarkletError {
    #[error("Bookmarklet template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Template has no `var PATTERNS = {{...}};` literal")]
    PlaceholderMissing,

    #[error("Invalid pattern expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("Failed to encode patterns: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The three pattern files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Lines that start a prompt, e.g. "目的："
    Keywords,
    /// Lead-in phrases; the prompt follows on the next line
    Phrases,
    /// Separator lines; the prompt follows the last one
    Delimiters,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::Keywords,
        PatternKind::Phrases,
        PatternKind::Delimiters,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            PatternKind::Keywords => "keywords.txt",
            PatternKind::Phrases => "phrases.txt",
            PatternKind::Delimiters => "delimiters.txt",
        }
    }

    /// Contents written when no shipped copy exists
    pub fn default_contents(&self) -> &'static str {
        match self {
            PatternKind::Keywords => include_str!("../../assets/config/keywords.txt"),
            PatternKind::Phrases => include_str!("../../assets/config/phrases.txt"),
            PatternKind::Delimiters => include_str!("../../assets/config/delimiters.txt"),
        }
    }
}

/// Fallback extraction patterns, one list per pattern file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternConfig {
    pub phrases: Vec<String>,
    pub delimiters: Vec<String>,
    pub keywords: Vec<String>,
}

impl PatternConfig {
    /// Read the pattern files from the settings directory; missing files
    /// give empty lists
    pub fn load(paths: &AppPaths) -> Self {
        Self {
            phrases: read_entries(&paths.pattern_file(PatternKind::Phrases)),
            delimiters: read_entries(&paths.pattern_file(PatternKind::Delimiters)),
            keywords: read_entries(&paths.pattern_file(PatternKind::Keywords)),
        }
    }

    /// The built-in pattern lists
    pub fn defaults() -> Self {
        let entries = |kind: PatternKind| {
            kind.default_contents()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect()
        };
        Self {
            phrases: entries(PatternKind::Phrases),
            delimiters: entries(PatternKind::Delimiters),
            keywords: entries(PatternKind::Keywords),
        }
    }

    /// Minified `var PATTERNS={...};` statement; entries are JSON-escaped
    pub fn to_js_statement(&self) -> Result<String, BookmarkletError> {
        Ok(format!(
            "var PATTERNS={{startMarker:{},endMarker:{},phrases:{},delimiters:{},keywords:{}}};",
            serde_json::to_string(START_MARKER)?,
            serde_json::to_string(END_MARKER)?,
            serde_json::to_string(&self.phrases)?,
            serde_json::to_string(&self.delimiters)?,
            serde_json::to_string(&self.keywords)?,
        ))
    }
}

/// Build the `javascript:` URL from `template` and `patterns`.
///
/// The template is minified before substitution, so pattern entries reach the
/// script exactly as written.
pub fn generate(template: &str, patterns: &PatternConfig) -> Result<String, BookmarkletError> {
    let minified = minify(template)?;
    let placeholder = Regex::new(r"var PATTERNS\s*=\s*\{[^;]+\};")?;
    if !placeholder.is_match(&minified) {
        return Err(BookmarkletError::PlaceholderMissing);
    }

    let statement = patterns.to_js_statement()?;
    Ok(placeholder
        .replace(&minified, NoExpand(&statement))
        .into_owned())
}

/// Template text: `explicit` when given (must exist), else the override file
/// in the settings directory, else the built-in template.
pub fn load_template(paths: &AppPaths, explicit: Option<&Path>) -> Result<String, BookmarkletError> {
    if let Some(path) = explicit {
        return std::fs::read_to_string(path)
            .map_err(|_| BookmarkletError::TemplateNotFound(path.to_path_buf()));
    }

    let override_path = paths.template_override();
    match std::fs::read_to_string(&override_path) {
        Ok(text) => {
            tracing::debug!("Using bookmarklet template {}", override_path.display());
            Ok(text)
        }
        Err(_) => Ok(BUILTIN_TEMPLATE.to_string()),
    }
}

/// Generate the bookmarklet from the files in the settings directory
pub fn generate_for(paths: &AppPaths, template: Option<&Path>) -> Result<String, BookmarkletError> {
    let template = load_template(paths, template)?;
    generate(&template, &PatternConfig::load(paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_generates() {
        let code = generate(BUILTIN_TEMPLATE, &PatternConfig::defaults()).expect("generate");

        assert!(code.starts_with("javascript:(function(){"));
        assert!(!code.contains('\n'));
        assert!(!code.contains("//"));
        assert!(code.contains("[BRIDGIRON_GPT2CC]"));
        assert!(code.contains(r#"var PATTERNS={startMarker:"---SOP---",endMarker:"---EOP---","#));
        assert!(code.contains(r#"delimiters:["---"]"#));
    }

    #[test]
    fn test_builtin_template_extraction_rules() {
        // Italics render as *text*
        assert!(BUILTIN_TEMPLATE.contains("return '*' + el.textContent + '*';"));
        // An empty SOP..EOP block still falls back to everything after SOP
        assert!(BUILTIN_TEMPLATE.contains("if (start !== -1 && end > start) {"));
        assert!(BUILTIN_TEMPLATE.contains("text = after(lines, start + 1);"));
    }

    #[test]
    fn test_entries_are_json_escaped() {
        let patterns = PatternConfig {
            phrases: vec![r#"say "go" $1"#.to_string()],
            delimiters: vec![],
            keywords: vec!["a\\b".to_string()],
        };
        let code = generate("var PATTERNS = { phrases: [] };\nrun(PATTERNS);", &patterns)
            .expect("generate");

        assert_eq!(
            code,
            r#"javascript:var PATTERNS={startMarker:"---SOP---",endMarker:"---EOP---",phrases:["say \"go\" $1"],delimiters:[],keywords:["a\\b"]};run(PATTERNS);"#
        );
    }

    #[test]
    fn test_template_without_placeholder() {
        let err = generate("alert(1);", &PatternConfig::defaults()).unwrap_err();
        assert!(matches!(err, BookmarkletError::PlaceholderMissing));
    }

    #[test]
    fn test_defaults_match_seed_files() {
        let defaults = PatternConfig::defaults();
        assert_eq!(defaults.delimiters, vec!["---"]);
        assert_eq!(defaults.phrases.len(), 5);
        assert_eq!(defaults.keywords.first().map(String::as_str), Some("目的："));
    }
}
