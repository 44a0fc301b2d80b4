//! Text file I/O shared by the settings store, the pattern files and the history
//!
//! Reads try an ordered list of encodings so files written by older installs
//! (Shift-JIS under a Japanese locale) still load. Writes always produce UTF-8
//! with a byte-order mark and go through a lock file plus temp-file rename.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::ConfigError;

/// UTF-8 byte-order mark as written at the start of every file we produce
pub const UTF8_BOM: &str = "\u{feff}";

/// A text encoding attempted while reading a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, BOM stripped when present
    Utf8Bom,
    /// Plain UTF-8, BOM kept as a character
    Utf8,
    /// Legacy Windows Japanese code page (cp932)
    ShiftJis,
}

/// Default attempt order, first success wins
pub const READ_ORDER: [TextEncoding; 3] = [
    TextEncoding::Utf8Bom,
    TextEncoding::Utf8,
    TextEncoding::ShiftJis,
];

impl TextEncoding {
    /// Decode `bytes`, returning `None` if they are not valid in this encoding
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::ShiftJis => encoding_rs::SHIFT_JIS
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }
}

/// Decode with the first encoding in `order` that accepts the bytes.
pub fn decode_with_fallback(bytes: &[u8], order: &[TextEncoding]) -> Option<String> {
    order.iter().find_map(|encoding| encoding.decode(bytes))
}

/// Read a text file trying [`READ_ORDER`].
///
/// Returns `None` when the file is missing, unreadable, or no encoding fits.
pub fn read_text_with_fallback(path: &Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Could not read {}: {}", path.display(), e);
            return None;
        }
    };

    let text = decode_with_fallback(&bytes, &READ_ORDER);
    if text.is_none() {
        tracing::debug!("No encoding matched for {}", path.display());
    }
    text
}

/// Read a one-entry-per-line file, dropping blank lines and surrounding whitespace
pub fn read_entries(path: &Path) -> Vec<String> {
    read_text_with_fallback(path)
        .map(|content| {
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write `content` as UTF-8 with BOM.
///
/// An exclusive lock on `<file>.lock` serialises writers (GUI and CLI may run
/// together) and the data goes to `<file>.tmp` before being renamed into place.
pub fn write_text_with_bom(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io("create directory", parent, e))?;
    }

    let lock_path = sibling_path(path, ".lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .map_err(|e| ConfigError::io("create lock file", &lock_path, e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| ConfigError::io("lock", &lock_path, e))?;

    let temp_path = sibling_path(path, ".tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| ConfigError::io("create temp file", &temp_path, e))?;

    temp_file
        .write_all(UTF8_BOM.as_bytes())
        .and_then(|_| temp_file.write_all(content.as_bytes()))
        .and_then(|_| temp_file.sync_all())
        .map_err(|e| ConfigError::io("write", &temp_path, e))?;
    drop(temp_file);

    std::fs::rename(&temp_path, path).map_err(|e| ConfigError::io("replace", path, e))?;

    // Lock is released when lock_file is dropped
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bom_is_stripped() {
        let bytes = [UTF8_BOM.as_bytes(), "language=en".as_bytes()].concat();
        assert_eq!(
            decode_with_fallback(&bytes, &READ_ORDER).as_deref(),
            Some("language=en")
        );
    }

    #[test]
    fn test_shift_jis_fallback() {
        let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode("目的：");
        assert!(!had_errors);
        assert!(std::str::from_utf8(&encoded).is_err());
        assert_eq!(
            decode_with_fallback(&encoded, &READ_ORDER).as_deref(),
            Some("目的：")
        );
    }

    #[test]
    fn test_exhausted_order_is_none() {
        let invalid_utf8 = [0xffu8, 0xfe, 0xfd];
        assert_eq!(
            decode_with_fallback(&invalid_utf8, &[TextEncoding::Utf8Bom, TextEncoding::Utf8]),
            None
        );
    }

    #[test]
    fn test_write_then_read_keeps_text() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("phrases.txt");

        write_text_with_bom(&path, "以下の指示\n\n  ---  \n").expect("write");

        let raw = std::fs::read(&path).expect("read raw");
        assert!(raw.starts_with(UTF8_BOM.as_bytes()));
        assert_eq!(read_entries(&path), vec!["以下の指示", "---"]);
        assert!(!sibling_path(&path, ".tmp").exists());
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().expect("temp dir");
        assert!(read_text_with_fallback(&dir.path().join("absent.txt")).is_none());
        assert!(read_entries(&dir.path().join("absent.txt")).is_empty());
    }
}
