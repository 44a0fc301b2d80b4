//! Bridgiron - clipboard bridge between a chat assistant and a coding CLI
//!
//! Bridgiron moves text in both directions between a browser chat session and
//! a terminal running Claude Code:
//!
//! 1. **Chat → CLI**: a bookmarklet copies the prompt from the chat page with a
//!    marker line. The clipboard watcher strips the marker, re-copies the bare
//!    prompt and records it in the copy history.
//!
//! 2. **CLI → Chat**: the latest assistant report is read from Claude Code's
//!    session logs and copied with a configurable prefix.
//!
//! While a CLI window has focus the GUI shrinks to a compact strip parked at
//! that window's bottom-left corner.

pub mod bookmarklet;
pub mod clipboard;
pub mod config;
pub mod coordinator;
pub mod gui;
pub mod history;
pub mod i18n;
pub mod report;
pub mod window;
