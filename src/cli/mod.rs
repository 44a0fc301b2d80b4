//! CLI command implementations

pub mod bookmarklet;
pub mod history;
pub mod report;
