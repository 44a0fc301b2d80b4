//! Copy history
//!
//! Two most-recent-first lists of clipboard transfers, GPT→CC (prompts caught
//! by the clipboard watcher) and CC→GPT (reports copied from the logs). The
//! whole structure is rewritten to `copy_history.json` after every change.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::config::io::{UTF8_BOM, write_text_with_bom};

/// Entries kept per category
pub const MAX_ENTRIES: usize = 50;

/// Characters shown in a preview
pub const PREVIEW_LENGTH: usize = 30;

/// Error type for history persistence
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Write(#[from] ConfigError),
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Prompt going from the chat assistant to the coding CLI
    GptToCc,
    /// Report going from the coding CLI back to the chat assistant
    CcToGpt,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::GptToCc, Category::CcToGpt];

    /// Key used in the history file
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GptToCc => "gpt_to_cc",
            Category::CcToGpt => "cc_to_gpt",
        }
    }

    /// Accepts the file key or its dashed CLI form
    pub fn parse(value: &str) -> Option<Self> {
        match value.replace('-', "_").to_lowercase().as_str() {
            "gpt_to_cc" => Some(Category::GptToCc),
            "cc_to_gpt" => Some(Category::CcToGpt),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time of the copy
    pub timestamp: NaiveDateTime,
    /// Single-line, truncated rendering of the content
    pub preview: String,
    /// Full copied text, prefix included
    pub content: String,
}

/// List row handed to the UI; full text stays in the store
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub preview: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryData {
    #[serde(default)]
    gpt_to_cc: Vec<HistoryEntry>,
    #[serde(default)]
    cc_to_gpt: Vec<HistoryEntry>,
}

impl HistoryData {
    fn list(&self, category: Category) -> &Vec<HistoryEntry> {
        match category {
            Category::GptToCc => &self.gpt_to_cc,
            Category::CcToGpt => &self.cc_to_gpt,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<HistoryEntry> {
        match category {
            Category::GptToCc => &mut self.gpt_to_cc,
            Category::CcToGpt => &mut self.cc_to_gpt,
        }
    }
}

/// Build the list preview for `content`.
///
/// `prefix_to_strip` is removed when the content starts with it, along with
/// any line breaks right after it. Line breaks become spaces, carriage
/// returns vanish, and the result is cut to [`PREVIEW_LENGTH`] characters.
pub fn make_preview(content: &str, prefix_to_strip: &str) -> String {
    let body = match content.strip_prefix(prefix_to_strip) {
        Some(rest) if !prefix_to_strip.is_empty() => rest.trim_start_matches(['\r', '\n']),
        _ => content,
    };

    body.chars()
        .filter(|c| *c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(PREVIEW_LENGTH)
        .collect()
}

/// Copy history backed by a JSON file
#[derive(Debug)]
pub struct CopyHistory {
    path: PathBuf,
    data: HistoryData,
}

impl CopyHistory {
    /// Load from `path`; a missing or unreadable file starts empty
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(raw) => {
                let json = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);
                serde_json::from_str(json).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring unreadable history {}: {}", path.display(), e);
                    HistoryData::default()
                })
            }
            Err(_) => HistoryData::default(),
        };

        Self {
            path: path.to_path_buf(),
            data,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a transfer at the head of `category`, evicting the oldest past
    /// [`MAX_ENTRIES`], then persist.
    ///
    /// The entry stays in memory even if writing the file fails.
    pub fn add(
        &mut self,
        category: Category,
        content: &str,
        prefix_to_strip: &str,
    ) -> Result<(), HistoryError> {
        let entry = HistoryEntry {
            timestamp: chrono::Local::now().naive_local(),
            preview: make_preview(content, prefix_to_strip),
            content: content.to_string(),
        };

        let list = self.data.list_mut(category);
        list.insert(0, entry);
        list.truncate(MAX_ENTRIES);

        self.save()
    }

    /// Previews of `category`, most recent first
    pub fn get_list(&self, category: Category) -> Vec<HistoryItem> {
        self.data
            .list(category)
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryItem {
                index,
                timestamp: entry.timestamp,
                preview: entry.preview.clone(),
            })
            .collect()
    }

    /// Full text at `index`, or an empty string when out of range
    pub fn get_content(&self, category: Category, index: usize) -> String {
        self.data
            .list(category)
            .get(index)
            .map(|entry| entry.content.clone())
            .unwrap_or_default()
    }

    /// Remove the entry at `index`; out-of-range indexes are ignored
    pub fn delete(&mut self, category: Category, index: usize) -> Result<(), HistoryError> {
        let list = self.data.list_mut(category);
        if index >= list.len() {
            return Ok(());
        }
        list.remove(index);
        self.save()
    }

    pub fn len(&self, category: Category) -> usize {
        self.data.list(category).len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.data.list(category).is_empty()
    }

    fn save(&self) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(&self.data)?;
        write_text_with_bom(&self.path, &json)?;
        Ok(())
    }
}

/// History shared between the UI thread and the clipboard watcher thread
#[derive(Debug, Clone)]
pub struct SharedHistory {
    inner: Arc<Mutex<CopyHistory>>,
    generation: Arc<AtomicU64>,
}

impl SharedHistory {
    pub fn new(history: CopyHistory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Lock the history, recovering from a poisoned lock
    pub fn lock(&self) -> MutexGuard<'_, CopyHistory> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counter bumped on every mutation, lets views skip unchanged frames
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// [`CopyHistory::add`] under the lock; save failures are logged
    pub fn add(&self, category: Category, content: &str, prefix_to_strip: &str) {
        let result = self.lock().add(category, content, prefix_to_strip);
        self.bump();
        if let Err(e) = result {
            tracing::warn!("Failed to save copy history: {}", e);
        }
    }

    /// [`CopyHistory::delete`] under the lock; save failures are logged
    pub fn delete(&self, category: Category, index: usize) {
        let result = self.lock().delete(category, index);
        self.bump();
        if let Err(e) = result {
            tracing::warn!("Failed to save copy history: {}", e);
        }
    }

    pub fn get_list(&self, category: Category) -> Vec<HistoryItem> {
        self.lock().get_list(category)
    }

    pub fn get_content(&self, category: Category, index: usize) -> String {
        self.lock().get_content(category, index)
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}
