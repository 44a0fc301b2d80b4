//! GUI runner - launches the Bridgiron window
//!
//! Starts the clipboard watcher before the event loop so prompts copied by
//! the bookmarklet are picked up even while the window is minimized.

mod fonts;

use anyhow::Result;
use eframe::egui;
use tracing::{info, warn};

use super::app::BridgironApp;
use super::theme::apply_theme;
use crate::config::AppPaths;
use crate::coordinator::FullLayout;
use crate::history::{CopyHistory, SharedHistory};
use crate::i18n::{Msg, Translate};

use fonts::configure_fonts;

/// Run the main GUI application
pub fn run_gui(paths: AppPaths) -> Result<()> {
    match paths.ensure_config_files() {
        Ok(created) => {
            for path in created {
                info!("[bridgiron] Created {}", path.display());
            }
        }
        Err(e) => warn!("[bridgiron] Failed to seed config files: {}", e),
    }

    let settings = paths.load_settings();
    let history = SharedHistory::new(CopyHistory::load(&paths.history_file()));

    info!(
        "[bridgiron] Starting GUI (settings in {})",
        paths.settings_dir().display()
    );

    let layout = FullLayout::for_first_run(settings.first_run);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.language.tr(Msg::WindowTitle))
            .with_inner_size([layout.size.width as f32, layout.size.height as f32])
            .with_min_inner_size([layout.min_size.width as f32, layout.min_size.height as f32])
            .with_decorations(true)
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "Bridgiron",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            apply_theme(&cc.egui_ctx);
            let app = BridgironApp::new(&cc.egui_ctx, paths, settings, history);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
