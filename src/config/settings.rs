//! User settings stored as `key=value` lines in `settings.txt`

use std::fmt;
use std::path::Path;

use super::ConfigError;
use super::io::{read_text_with_fallback, write_text_with_bom};
use crate::i18n::Language;

/// Prefix prepended to copied reports unless the user changes it
pub const DEFAULT_CC_PREFIX: &str = "Claude Codeの報告は下記。\n";

/// Default bookmarklet title shown in the browser's bookmark bar
pub const DEFAULT_BOOKMARKLET_TITLE: &str = "CopyPrompt GPT2CC";

/// Where the compact window goes while it follows a CLI window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiniWindowPosition {
    /// Just below the tracked CLI window (or the work area corner when maximized)
    #[default]
    CliBottomLeft,
    /// Wherever the compact window was last
    LastPosition,
}

impl MiniWindowPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MiniWindowPosition::CliBottomLeft => "cli_bottom_left",
            MiniWindowPosition::LastPosition => "last_position",
        }
    }

    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "cli_bottom_left" => Some(MiniWindowPosition::CliBottomLeft),
            "last_position" => Some(MiniWindowPosition::LastPosition),
            _ => None,
        }
    }
}

impl fmt::Display for MiniWindowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// UI language
    pub language: Language,
    /// Title to paste when creating the bookmarklet
    pub bookmarklet_title: String,
    /// Project whose Claude Code logs are read
    pub project_path: String,
    /// Text prepended to a copied report, may span several lines
    pub cc_prefix: String,
    /// Compact window placement policy
    pub mini_window_position: MiniWindowPosition,
    /// Set until the user opens the readme once
    pub first_run: bool,
    /// Hidden `F_DebugMode` switch, raises the log level
    pub debug_mode: bool,
    /// `F_DebugMode` was present in the loaded file
    debug_key_present: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    pub fn with_defaults() -> Self {
        let project_path = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();

        Self {
            language: Language::Ja,
            bookmarklet_title: DEFAULT_BOOKMARKLET_TITLE.to_string(),
            project_path,
            cc_prefix: DEFAULT_CC_PREFIX.to_string(),
            mini_window_position: MiniWindowPosition::CliBottomLeft,
            first_run: true,
            debug_mode: false,
            debug_key_present: false,
        }
    }

    /// Load settings from `path`, keeping defaults for anything missing.
    ///
    /// A missing or undecodable file yields the defaults.
    pub fn load(path: &Path) -> Self {
        let mut settings = Self::with_defaults();

        match read_text_with_fallback(path) {
            Some(content) => settings.apply(&content),
            None => tracing::debug!("No readable settings at {}, using defaults", path.display()),
        }

        settings
    }

    /// Overlay `key=value` lines onto the current values.
    pub fn apply(&mut self, content: &str) {
        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            tracing::debug!("settings: {}={}", key, value);

            match key {
                "language" => {
                    self.language = Language::from_code(value).unwrap_or(Language::Ja);
                }
                "bookmarklet_title" => self.bookmarklet_title = value.to_string(),
                "project_path" => {
                    if !value.is_empty() {
                        self.project_path = value.to_string();
                    }
                }
                "cc_prefix" => self.cc_prefix = unescape_newlines(value),
                "mini_window_position" => {
                    self.mini_window_position =
                        MiniWindowPosition::from_config(value).unwrap_or_default();
                }
                "first_run" => self.first_run = value == "1",
                "F_DebugMode" => {
                    self.debug_mode = value == "1";
                    self.debug_key_present = true;
                }
                _ => {}
            }
        }
    }

    /// Serialize to the on-disk `key=value` form.
    ///
    /// `F_DebugMode` is only written back when it came from the file.
    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("language={}\n", self.language.code()));
        out.push_str(&format!("bookmarklet_title={}\n", self.bookmarklet_title));
        out.push_str(&format!("project_path={}\n", self.project_path));
        out.push_str(&format!("cc_prefix={}\n", escape_newlines(&self.cc_prefix)));
        out.push_str(&format!("mini_window_position={}\n", self.mini_window_position));
        out.push_str(&format!("first_run={}\n", if self.first_run { "1" } else { "0" }));
        if self.debug_key_present {
            out.push_str(&format!("F_DebugMode={}\n", if self.debug_mode { "1" } else { "0" }));
        }
        out
    }

    /// Persist to `path` as UTF-8 with BOM.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_text_with_bom(path, &self.to_config_string())
    }
}

/// Turn a literal `\n` sequence into a line break
pub fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Turn a line break into a literal `\n` sequence
pub fn escape_newlines(value: &str) -> String {
    value.replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut settings = Settings::with_defaults();
        let default_path = settings.project_path.clone();
        settings.apply("language=en\nbookmarklet_title=My Mark\n");

        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.bookmarklet_title, "My Mark");
        assert_eq!(settings.project_path, default_path);
        assert_eq!(settings.cc_prefix, DEFAULT_CC_PREFIX);
        assert_eq!(settings.mini_window_position, MiniWindowPosition::CliBottomLeft);
        assert!(settings.first_run);
        assert!(!settings.debug_mode);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut settings = Settings::with_defaults();
        settings.project_path = "C:\\work\\app".to_string();
        settings.apply("language=fr\nmini_window_position=center\nproject_path=\n");

        assert_eq!(settings.language, Language::Ja);
        assert_eq!(settings.mini_window_position, MiniWindowPosition::CliBottomLeft);
        assert_eq!(settings.project_path, "C:\\work\\app");
    }

    #[test]
    fn test_prefix_newlines_are_escaped_on_disk() {
        let mut settings = Settings::with_defaults();
        settings.cc_prefix = "Report:\nbelow\n".to_string();

        let serialized = settings.to_config_string();
        assert!(serialized.contains("cc_prefix=Report:\\nbelow\\n\n"));

        let mut reloaded = Settings::with_defaults();
        reloaded.apply(&serialized);
        // Trailing whitespace is trimmed per line, escaped newlines are not whitespace
        assert_eq!(reloaded.cc_prefix, "Report:\nbelow\n");
    }

    #[test]
    fn test_debug_key_only_written_when_loaded() {
        let settings = Settings::with_defaults();
        assert!(!settings.to_config_string().contains("F_DebugMode"));

        let mut debug = Settings::with_defaults();
        debug.apply("F_DebugMode=1");
        assert!(debug.debug_mode);
        assert!(debug.to_config_string().contains("F_DebugMode=1\n"));
    }

    #[test]
    fn test_lines_without_separator_are_ignored() {
        let mut settings = Settings::with_defaults();
        settings.apply("# comment\n\nfirst_run=0\ngarbage line\n");
        assert!(!settings.first_run);
    }
}
