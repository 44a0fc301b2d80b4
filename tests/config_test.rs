//! Integration tests for the settings directory

use std::fs;
use tempfile::TempDir;

use bridgiron::bookmarklet::PatternKind;
use bridgiron::config::io::read_entries;
use bridgiron::config::{AppPaths, DEFAULT_CC_PREFIX, MiniWindowPosition, Settings};
use bridgiron::i18n::Language;

fn temp_paths() -> (TempDir, TempDir, AppPaths) {
    let settings_dir = TempDir::new().expect("Failed to create temp dir");
    let install_dir = TempDir::new().expect("Failed to create temp dir");
    let paths = AppPaths::with_dirs(settings_dir.path(), install_dir.path());
    (settings_dir, install_dir, paths)
}

#[test]
fn test_partial_settings_file_keeps_defaults() {
    let (_settings_dir, _install_dir, paths) = temp_paths();
    fs::write(
        paths.settings_file(),
        "language=en\nmini_window_position=last_position\nunknown_key=1\n",
    )
    .expect("Failed to write settings");

    let settings = paths.load_settings();
    assert_eq!(settings.language, Language::En);
    assert_eq!(settings.mini_window_position, MiniWindowPosition::LastPosition);
    assert_eq!(settings.cc_prefix, DEFAULT_CC_PREFIX);
    assert!(settings.first_run);
    assert!(!settings.debug_mode);
}

#[test]
fn test_settings_save_and_reload() {
    let (_settings_dir, _install_dir, paths) = temp_paths();

    let mut settings = Settings::with_defaults();
    settings.language = Language::En;
    settings.project_path = "D:\\work\\app".to_string();
    settings.cc_prefix = "Report:\n\n".to_string();
    settings.first_run = false;
    settings.save(&paths.settings_file()).expect("save");

    let raw = fs::read(paths.settings_file()).expect("Failed to read settings");
    assert!(raw.starts_with(&[0xEF, 0xBB, 0xBF]));
    let text = String::from_utf8_lossy(&raw[3..]).into_owned();
    assert!(text.contains("cc_prefix=Report:\\n\\n\n"));
    assert!(text.contains("first_run=0\n"));
    assert!(!text.contains("F_DebugMode"));

    assert_eq!(paths.load_settings(), settings);
}

#[test]
fn test_debug_mode_is_preserved_but_never_introduced() {
    let (_settings_dir, _install_dir, paths) = temp_paths();
    fs::write(paths.settings_file(), "F_DebugMode=1\n").expect("Failed to write settings");

    let settings = paths.load_settings();
    assert!(settings.debug_mode);
    settings.save(&paths.settings_file()).expect("save");

    let text = fs::read_to_string(paths.settings_file()).expect("Failed to read settings");
    assert!(text.contains("F_DebugMode=1"));
}

#[test]
fn test_invalid_values_fall_back() {
    let (_settings_dir, _install_dir, paths) = temp_paths();
    fs::write(
        paths.settings_file(),
        "language=de\nmini_window_position=center\nproject_path=\n",
    )
    .expect("Failed to write settings");

    let settings = paths.load_settings();
    let defaults = Settings::with_defaults();
    assert_eq!(settings.language, Language::Ja);
    assert_eq!(settings.mini_window_position, MiniWindowPosition::CliBottomLeft);
    assert_eq!(settings.project_path, defaults.project_path);
}

#[test]
fn test_seeding_prefers_shipped_shift_jis_copy() {
    let (_settings_dir, install_dir, paths) = temp_paths();
    let shipped_dir = install_dir.path().join("_Config");
    fs::create_dir_all(&shipped_dir).expect("Failed to create _Config");
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("目的：\n完了条件：\n");
    fs::write(shipped_dir.join("keywords.txt"), &encoded).expect("Failed to write keywords");

    let created = paths.ensure_config_files().expect("ensure_config_files");
    assert_eq!(created.len(), PatternKind::ALL.len());

    assert_eq!(
        read_entries(&paths.pattern_file(PatternKind::Keywords)),
        vec!["目的：".to_string(), "完了条件：".to_string()]
    );
    assert_eq!(
        read_entries(&paths.pattern_file(PatternKind::Delimiters)),
        vec!["---".to_string()]
    );

    // Existing files are left alone
    assert!(paths.ensure_config_files().expect("ensure_config_files").is_empty());
}
