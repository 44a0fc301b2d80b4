//! GUI module for Bridgiron
//!
//! A single eframe window with two layouts: the full settings view and a
//! compact strip that follows the focused CLI window. History popups are
//! separate viewports.

pub mod app;
mod app_compact;
mod app_eframe;
mod app_full;
mod app_window;
pub mod history_popup;
pub mod hotkey;
pub mod notice;
pub mod runner;
pub mod theme;

pub use app::{BridgironApp, open_path};
pub use runner::run_gui;
