//! Integration tests for the copy history file

use std::fs;
use tempfile::TempDir;

use bridgiron::history::{Category, CopyHistory, MAX_ENTRIES, SharedHistory};

#[test]
fn test_add_then_get_content_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("copy_history.json");
    let mut history = CopyHistory::load(&path);

    let text = "line one\r\nline two\n";
    history.add(Category::GptToCc, text, "").expect("add");

    assert_eq!(history.get_content(Category::GptToCc, 0), text);
    assert!(history.is_empty(Category::CcToGpt));
}

#[test]
fn test_history_survives_reload() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("copy_history.json");

    let mut history = CopyHistory::load(&path);
    history.add(Category::CcToGpt, "Prefix\nfirst", "Prefix\n").expect("add");
    history.add(Category::CcToGpt, "Prefix\nsecond", "Prefix\n").expect("add");

    let raw = fs::read(&path).expect("Failed to read history file");
    assert!(raw.starts_with(&[0xEF, 0xBB, 0xBF]), "history is written with a BOM");

    let reloaded = CopyHistory::load(&path);
    let list = reloaded.get_list(Category::CcToGpt);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].preview, "second");
    assert_eq!(list[1].preview, "first");
    assert_eq!(reloaded.get_content(Category::CcToGpt, 1), "Prefix\nfirst");
}

#[test]
fn test_oldest_entries_are_evicted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut history = CopyHistory::load(&dir.path().join("copy_history.json"));

    for i in 0..MAX_ENTRIES + 5 {
        history.add(Category::GptToCc, &format!("entry {}", i), "").expect("add");
    }

    let list = history.get_list(Category::GptToCc);
    assert_eq!(list.len(), MAX_ENTRIES);
    assert_eq!(
        history.get_content(Category::GptToCc, 0),
        format!("entry {}", MAX_ENTRIES + 4)
    );
    assert_eq!(history.get_content(Category::GptToCc, MAX_ENTRIES - 1), "entry 5");
}

#[test]
fn test_out_of_range_access_is_harmless() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut history = CopyHistory::load(&dir.path().join("copy_history.json"));
    history.add(Category::GptToCc, "only", "").expect("add");

    assert_eq!(history.get_content(Category::GptToCc, 3), "");
    history.delete(Category::GptToCc, 3).expect("delete");
    assert_eq!(history.len(Category::GptToCc), 1);

    history.delete(Category::GptToCc, 0).expect("delete");
    assert!(history.is_empty(Category::GptToCc));
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("copy_history.json");
    fs::write(&path, "{ this is not json").expect("Failed to write file");

    let history = CopyHistory::load(&path);
    assert!(history.is_empty(Category::GptToCc));
    assert!(history.is_empty(Category::CcToGpt));
}

#[test]
fn test_shared_history_across_threads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("copy_history.json");
    let shared = SharedHistory::new(CopyHistory::load(&path));
    let before = shared.generation();

    let writer = shared.clone();
    std::thread::spawn(move || writer.add(Category::GptToCc, "from watcher", ""))
        .join()
        .expect("writer thread");

    assert!(shared.generation() > before);
    assert_eq!(shared.get_content(Category::GptToCc, 0), "from watcher");
    assert_eq!(
        CopyHistory::load(&path).get_content(Category::GptToCc, 0),
        "from watcher"
    );
}
