//! Locating Claude Code session logs for a project

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Session log file extension
const LOG_EXTENSION: &str = "jsonl";

/// Directory name Claude Code uses for `project_path`.
///
/// Separators are normalised to `\`, a trailing separator is dropped, then
/// every `:`, `\`, `/` and `_` becomes `-`. The log-writing tool derives its
/// folder names the same way, so this must not change.
pub fn project_dir_name(project_path: &str) -> Option<String> {
    if project_path.is_empty() {
        return None;
    }

    let normalized = project_path.replace('/', "\\");
    let normalized = normalized.trim_end_matches('\\');

    Some(
        normalized
            .chars()
            .map(|c| match c {
                ':' | '\\' | '/' | '_' => '-',
                other => other,
            })
            .collect(),
    )
}

/// Per-user log root, `<USERPROFILE>/.claude/projects`.
///
/// None when `USERPROFILE` is unset or empty.
pub fn log_root() -> Option<PathBuf> {
    root_under(std::env::var_os("USERPROFILE"))
}

fn root_under(profile: Option<OsString>) -> Option<PathBuf> {
    let profile = profile.filter(|value| !value.is_empty())?;
    Some(PathBuf::from(profile).join(".claude").join("projects"))
}

/// Log directory for `project_path` under `root`, if it exists
pub fn log_directory_in(root: &Path, project_path: &str) -> Option<PathBuf> {
    let dir = root.join(project_dir_name(project_path)?);
    if dir.is_dir() {
        Some(dir)
    } else {
        tracing::debug!("No log directory at {}", dir.display());
        None
    }
}

/// Log directory for `project_path` under the per-user log root
pub fn log_directory(project_path: &str) -> Option<PathBuf> {
    log_directory_in(&log_root()?, project_path)
}

/// Session logs in `dir`, newest modification time first.
///
/// A missing or empty directory yields an empty list.
pub fn list_session_logs(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        LOG_EXTENSION
    );

    let entries = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::debug!("Invalid log pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    let mut logs: Vec<(PathBuf, std::time::SystemTime)> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((path, modified))
        })
        .collect();

    logs.sort_by(|a, b| b.1.cmp(&a.1));
    logs.into_iter().map(|(path, _)| path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_root_needs_profile() {
        assert_eq!(root_under(None), None);
        assert_eq!(root_under(Some(OsString::new())), None);
        assert_eq!(
            root_under(Some(OsString::from("profile"))),
            Some(Path::new("profile").join(".claude").join("projects"))
        );
    }

    #[test]
    fn test_windows_path_is_flattened() {
        assert_eq!(
            project_dir_name("C:\\Users\\me\\proj").as_deref(),
            Some("C--Users-me-proj")
        );
    }

    #[test]
    fn test_forward_slashes_and_underscores() {
        assert_eq!(
            project_dir_name("D:/work/my_app/").as_deref(),
            Some("D--work-my-app")
        );
    }

    #[test]
    fn test_empty_path_has_no_directory() {
        assert_eq!(project_dir_name(""), None);
    }
}
