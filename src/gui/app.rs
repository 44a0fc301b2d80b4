//! Main GUI application state and user actions
//!
//! Rendering lives in `app_full`, `app_compact` and `history_popup`; the
//! per-frame loop is in `app_eframe`.

use super::history_popup::HistoryPopups;
use super::notice::TitleNotice;
use crate::bookmarklet::{self, BookmarkletError, PatternKind};
use crate::clipboard::{self, ClipboardWatcher, SystemClipboard};
use crate::config::{AppPaths, MiniWindowPosition, Settings, escape_newlines, unescape_newlines};
use crate::coordinator::{Coordinator, SelfIdentity, WindowCommand};
use crate::history::{Category, HistoryItem, SharedHistory};
use crate::i18n::{Language, Msg, Translate};
use crate::report::{self, ReportError};
use crate::window::{self, FocusSignal, WindowProbe};
use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;
use tracing::{info, warn};

/// Main application state
pub struct BridgironApp {
    pub(super) paths: AppPaths,
    pub(super) settings: Settings,

    // ═══════════════════════════════════════════════════════════════════════
    // Edit buffers, committed to `settings` when the field loses focus
    // ═══════════════════════════════════════════════════════════════════════
    /// Project path as typed
    pub(super) project_path_input: String,
    /// Prefix with line breaks shown as a literal `\n`
    pub(super) cc_prefix_input: String,
    pub(super) title_input: String,

    // ═══════════════════════════════════════════════════════════════════════
    // History
    // ═══════════════════════════════════════════════════════════════════════
    pub(super) history: SharedHistory,
    /// Lists per category, refreshed when the history generation moves
    history_lists: [Vec<HistoryItem>; 2],
    history_generation: Option<u64>,
    pub(super) history_popups: HistoryPopups,

    // ═══════════════════════════════════════════════════════════════════════
    // Window coordination
    // ═══════════════════════════════════════════════════════════════════════
    pub(super) probe: Box<dyn WindowProbe>,
    pub(super) focus_signal: Box<dyn FocusSignal>,
    pub(super) coordinator: Coordinator,
    pub(super) last_tick: Instant,

    pub(super) notice: TitleNotice,
    /// Keeps the watcher thread alive; stopped on drop
    _watcher: ClipboardWatcher,
    /// Prompts detected by the watcher thread
    pub(super) prompt_rx: Receiver<String>,
}

impl BridgironApp {
    /// Build the app and start the clipboard watcher.
    ///
    /// Runs on the UI thread, which the foreground hook requires.
    pub fn new(
        ctx: &egui::Context,
        paths: AppPaths,
        settings: Settings,
        history: SharedHistory,
    ) -> Self {
        let (prompt_tx, prompt_rx) = mpsc::channel::<String>();

        let mut watcher = ClipboardWatcher::default();
        let watcher_history = history.clone();
        let repaint_ctx = ctx.clone();
        watcher.start(SystemClipboard, move |prompt: String| {
            watcher_history.add(Category::GptToCc, &prompt, "");
            let _ = prompt_tx.send(prompt);
            repaint_ctx.request_repaint();
        });

        let probe = window::system_probe();
        let focus_signal = window::focus_signal(probe.as_ref());
        let coordinator = Coordinator::new(
            settings.mini_window_position,
            settings.first_run,
            SelfIdentity::current_process(),
        );

        Self {
            project_path_input: settings.project_path.clone(),
            cc_prefix_input: escape_newlines(&settings.cc_prefix),
            title_input: settings.bookmarklet_title.clone(),
            paths,
            settings,
            history,
            history_lists: [Vec::new(), Vec::new()],
            history_generation: None,
            history_popups: HistoryPopups::default(),
            probe,
            focus_signal,
            coordinator,
            last_tick: Instant::now(),
            notice: TitleNotice::default(),
            _watcher: watcher,
            prompt_rx,
        }
    }

    pub(super) fn language(&self) -> Language {
        self.settings.language
    }

    pub(super) fn tr(&self, msg: Msg) -> &'static str {
        self.settings.language.tr(msg)
    }

    /// Show `message` in the title bar for a moment
    pub(super) fn notify(&mut self, message: impl Into<String>) {
        self.notice.show(message, Instant::now());
    }

    fn notify_msg(&mut self, msg: Msg) {
        let text = self.tr(msg);
        self.notify(text);
    }

    /// Copy `text` and report the outcome in the title bar
    fn copy_and_notify(&mut self, text: &str, success: Msg) -> bool {
        match clipboard::copy_text(text) {
            Ok(()) => {
                self.notify_msg(success);
                true
            }
            Err(e) => {
                warn!("{}", e);
                self.notify(e.to_string());
                false
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Settings
    // ═══════════════════════════════════════════════════════════════════════

    pub(super) fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.paths.settings_file()) {
            warn!("Failed to save settings: {}", e);
            self.notify_msg(Msg::MsgSaveFailed);
        }
    }

    pub(super) fn commit_project_path(&mut self) {
        let value = self.project_path_input.trim().to_string();
        if value != self.settings.project_path {
            self.settings.project_path = value;
            self.save_settings();
        }
    }

    pub(super) fn commit_cc_prefix(&mut self) {
        let value = unescape_newlines(&self.cc_prefix_input);
        if value != self.settings.cc_prefix {
            self.settings.cc_prefix = value;
            self.save_settings();
        }
    }

    /// An emptied title field keeps the stored title
    pub(super) fn commit_title(&mut self) {
        if self.title_input.trim().is_empty() {
            self.title_input = self.settings.bookmarklet_title.clone();
            return;
        }
        if self.title_input != self.settings.bookmarklet_title {
            self.settings.bookmarklet_title = self.title_input.clone();
            self.save_settings();
        }
    }

    /// Pick the project folder with the native dialog
    pub(super) fn browse_project_path(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title(self.tr(Msg::SelectProjectFolder));
        if let Some(dir) = browse_start_dir(self.project_path_input.trim()) {
            dialog = dialog.set_directory(dir);
        }
        let Some(folder) = dialog.pick_folder() else {
            return;
        };

        let folder = to_backslashes(&folder.to_string_lossy());
        info!("Project folder selected: {}", folder);
        self.project_path_input = folder.clone();
        self.settings.project_path = folder;
        self.save_settings();
    }

    pub(super) fn set_language(&mut self, language: Language) {
        if language == self.settings.language {
            return;
        }
        info!("Language changed to {}", language.code());
        self.settings.language = language;
        self.save_settings();
    }

    pub(super) fn set_mini_window_position(&mut self, policy: MiniWindowPosition) {
        if policy == self.settings.mini_window_position {
            return;
        }
        self.settings.mini_window_position = policy;
        self.coordinator.set_policy(policy);
        self.save_settings();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Claude Code report
    // ═══════════════════════════════════════════════════════════════════════

    /// Copy prefix + latest report, record it and persist the inputs
    pub(super) fn copy_cc_report(&mut self) {
        let project_path = self.project_path_input.trim().to_string();
        if project_path.is_empty() || !Path::new(&project_path).exists() {
            self.notify_msg(Msg::MsgNoProject);
            return;
        }

        let report = match report::get_report(&project_path) {
            Ok(report) => report,
            Err(e) => {
                info!("No report for {}: {}", project_path, e);
                self.notify_msg(match e {
                    ReportError::NoLog => Msg::MsgNoLog,
                    ReportError::NoReport => Msg::MsgNoReport,
                });
                return;
            }
        };

        let prefix = unescape_newlines(&self.cc_prefix_input);
        let text = format!("{}{}", prefix, report);
        if !self.copy_and_notify(&text, Msg::MsgCopied) {
            return;
        }

        self.history.add(Category::CcToGpt, &text, &prefix);

        self.settings.project_path = project_path;
        self.settings.cc_prefix = prefix;
        self.save_settings();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Bookmarklet and chat settings
    // ═══════════════════════════════════════════════════════════════════════

    pub(super) fn copy_title(&mut self) {
        self.commit_title();
        let title = self.settings.bookmarklet_title.clone();
        self.copy_and_notify(&title, Msg::MsgCopied);
    }

    pub(super) fn copy_bookmarklet_code(&mut self) {
        match bookmarklet::generate_for(&self.paths, None) {
            Ok(code) => {
                self.copy_and_notify(&code, Msg::MsgCopied);
            }
            Err(e) => {
                warn!("Failed to generate bookmarklet: {}", e);
                match e {
                    BookmarkletError::TemplateNotFound(_) | BookmarkletError::PlaceholderMissing => {
                        self.notify_msg(Msg::MsgTemplateNotFound)
                    }
                    other => self.notify(other.to_string()),
                }
            }
        }
    }

    pub(super) fn copy_custom_instructions(&mut self) {
        let text = self.tr(Msg::CustomInstructions);
        self.copy_and_notify(text, Msg::MsgCopied);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Config files and readme
    // ═══════════════════════════════════════════════════════════════════════

    pub(super) fn open_pattern_file(&mut self, kind: PatternKind) {
        let path = self.paths.pattern_file(kind);
        self.open_or_notify(&path);
    }

    pub(super) fn open_settings_file(&mut self) {
        self.save_settings();
        let path = self.paths.settings_file();
        self.open_or_notify(&path);
    }

    /// Open the readme; the first successful open ends the first-run state
    pub(super) fn open_readme(&mut self, ctx: &egui::Context) {
        let path = self.paths.readme_file(self.language().code());
        if !self.open_or_notify(&path) || !self.settings.first_run {
            return;
        }

        self.settings.first_run = false;
        self.coordinator.set_first_run(false);
        self.save_settings();

        if !self.coordinator.is_compact() {
            let min = self.coordinator.full_layout().min_size;
            ctx.send_viewport_cmd(egui::ViewportCommand::MinInnerSize(egui::vec2(
                min.width as f32,
                min.height as f32,
            )));
        }
    }

    fn open_or_notify(&mut self, path: &Path) -> bool {
        if path.exists() {
            open_path(path);
            return true;
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let message = format!("{}{}", self.tr(Msg::MsgFileNotFound), name);
        self.notify(message);
        false
    }

    // ═══════════════════════════════════════════════════════════════════════
    // History
    // ═══════════════════════════════════════════════════════════════════════

    /// Rows for `category`, re-read only after the history changed
    pub(super) fn history_items(&mut self, category: Category) -> &[HistoryItem] {
        let generation = self.history.generation();
        if self.history_generation != Some(generation) {
            self.history_lists = Category::ALL.map(|c| self.history.get_list(c));
            self.history_generation = Some(generation);
        }
        &self.history_lists[history_slot(category)]
    }

    /// Copy a history entry and close its popup
    pub(super) fn copy_from_history(&mut self, category: Category, index: usize) {
        let content = self.history.get_content(category, index);
        if content.is_empty() {
            return;
        }
        if self.copy_and_notify(&content, Msg::CopiedFromHistory) {
            self.history_popups.close(category);
        }
    }

    pub(super) fn delete_history(&mut self, category: Category, index: usize) {
        self.history.delete(category, index);
    }

    /// Leave the compact view, e.g. from the expand button
    pub(super) fn exit_compact(&mut self) -> Vec<WindowCommand> {
        self.coordinator.exit_compact()
    }
}

fn history_slot(category: Category) -> usize {
    match category {
        Category::GptToCc => 0,
        Category::CcToGpt => 1,
    }
}

/// Folder the picker opens in: the parent of an existing `current` path,
/// `current` itself when it has no parent, otherwise the drive root
fn browse_start_dir(current: &str) -> Option<PathBuf> {
    let current = Path::new(current);
    if current.as_os_str().is_empty() || !current.exists() {
        return default_browse_dir();
    }
    match current.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && parent.exists() => {
            Some(parent.to_path_buf())
        }
        _ => Some(current.to_path_buf()),
    }
}

#[cfg(windows)]
fn default_browse_dir() -> Option<PathBuf> {
    Some(PathBuf::from("C:\\"))
}

#[cfg(not(windows))]
fn default_browse_dir() -> Option<PathBuf> {
    None
}

fn to_backslashes(path: &str) -> String {
    path.replace('/', "\\")
}

/// Open a file with the system's default handler
pub fn open_path(path: &Path) {
    info!("Opening {}", path.display());

    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(path).spawn();

    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = std::process::Command::new("xdg-open").arg(path).spawn();

    if let Err(e) = result {
        warn!("Failed to open {}: {}", path.display(), e);
    }
}
