//! Claude Code report extraction
//!
//! Finds the project's session logs and returns the newest assistant reply.

mod log_dir;
mod parser;

pub use log_dir::{list_session_logs, log_directory, log_directory_in, log_root, project_dir_name};
pub use parser::{latest_assistant_message, latest_assistant_text};

use std::path::Path;

/// Why no report could be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// No log directory or no session log files for the project
    #[error("no Claude Code log found")]
    NoLog,
    /// Logs exist but none contains an assistant text reply
    #[error("no report found in the session logs")]
    NoReport,
}

impl ReportError {
    /// Short code used in CLI output
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::NoLog => "no_log",
            ReportError::NoReport => "no_report",
        }
    }
}

/// Latest report for `project_path` using the per-user log root
pub fn get_report(project_path: &str) -> Result<String, ReportError> {
    let dir = log_directory(project_path).ok_or(ReportError::NoLog)?;
    report_from_dir(&dir)
}

/// Latest report for `project_path` under an explicit log root
pub fn get_report_in(root: &Path, project_path: &str) -> Result<String, ReportError> {
    let dir = log_directory_in(root, project_path).ok_or(ReportError::NoLog)?;
    report_from_dir(&dir)
}

/// Newest file first; the first file holding a reply wins, so a freshly
/// started session without assistant turns falls through to the previous one.
fn report_from_dir(dir: &Path) -> Result<String, ReportError> {
    let logs = list_session_logs(dir);
    if logs.is_empty() {
        return Err(ReportError::NoLog);
    }

    logs.iter()
        .find_map(|log| {
            let text = latest_assistant_message(log);
            if text.is_some() {
                tracing::debug!("Report taken from {}", log.display());
            }
            text
        })
        .ok_or(ReportError::NoReport)
}
