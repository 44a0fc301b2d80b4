//! Application context and configuration files
//!
//! [`AppPaths`] is resolved once at start-up and handed by reference to every
//! component that touches the settings directory.

pub mod io;
mod settings;

pub use settings::{
    DEFAULT_BOOKMARKLET_TITLE, DEFAULT_CC_PREFIX, MiniWindowPosition, Settings, escape_newlines,
    unescape_newlines,
};

use std::path::{Path, PathBuf};

use crate::bookmarklet::PatternKind;

/// Name of the per-user settings directory
const APP_DIR_NAME: &str = "Bridgiron";

/// Directory next to the executable holding shipped config files
const INSTALL_CONFIG_DIR: &str = "_Config";

/// Directory next to the executable holding the readme pages
const DOC_DIR: &str = "_DOC";

/// Error type for configuration file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Resolved locations of every file the application reads or writes
#[derive(Debug, Clone)]
pub struct AppPaths {
    settings_dir: PathBuf,
    install_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the settings directory (`%APPDATA%\Bridgiron` on Windows) and
    /// the install directory (the executable's folder).
    pub fn resolve(settings_override: Option<PathBuf>) -> Self {
        let install_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        let settings_dir = settings_override.unwrap_or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .unwrap_or_else(|| install_dir.join(INSTALL_CONFIG_DIR))
        });

        Self {
            settings_dir,
            install_dir,
        }
    }

    /// Explicit locations, mainly for tests
    pub fn with_dirs(settings_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: settings_dir.into(),
            install_dir: install_dir.into(),
        }
    }

    pub fn settings_dir(&self) -> &Path {
        &self.settings_dir
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// `settings.txt`
    pub fn settings_file(&self) -> PathBuf {
        self.settings_dir.join("settings.txt")
    }

    /// `copy_history.json`
    pub fn history_file(&self) -> PathBuf {
        self.settings_dir.join("copy_history.json")
    }

    /// One of the three bookmarklet pattern files
    pub fn pattern_file(&self, kind: PatternKind) -> PathBuf {
        self.settings_dir.join(kind.file_name())
    }

    /// User-supplied bookmarklet template, used instead of the built-in one when present
    pub fn template_override(&self) -> PathBuf {
        self.settings_dir.join("bookmarklet_template.js")
    }

    /// Readme page for `language_code`, falling back to the Japanese page
    pub fn readme_file(&self, language_code: &str) -> PathBuf {
        let docs = self.install_dir.join(DOC_DIR);
        let localized = match language_code {
            "en" => docs.join("Readme_en.html"),
            _ => docs.join("Readme.html"),
        };
        if localized.exists() {
            localized
        } else {
            docs.join("Readme.html")
        }
    }

    /// Load settings from `settings.txt`
    pub fn load_settings(&self) -> Settings {
        Settings::load(&self.settings_file())
    }

    /// Make sure the settings directory and the pattern files exist.
    ///
    /// Missing pattern files are copied from the install directory when a
    /// shipped copy exists (any legacy encoding), otherwise written from the
    /// built-in defaults. Returns the files that were created.
    pub fn ensure_config_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        std::fs::create_dir_all(&self.settings_dir)
            .map_err(|e| ConfigError::io("create directory", &self.settings_dir, e))?;

        let mut created = Vec::new();
        for kind in PatternKind::ALL {
            let dest = self.pattern_file(kind);
            if dest.exists() {
                continue;
            }

            let shipped = self
                .install_dir
                .join(INSTALL_CONFIG_DIR)
                .join(kind.file_name());
            let content = io::read_text_with_fallback(&shipped)
                .filter(|content| !content.is_empty())
                .unwrap_or_else(|| kind.default_contents().to_string());

            io::write_text_with_bom(&dest, &content)?;
            tracing::debug!("Created {}", dest.display());
            created.push(dest);
        }

        Ok(created)
    }
}
