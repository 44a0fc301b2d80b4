//! eframe::App implementation for BridgironApp
//!
//! Contains the main update loop that runs every frame.

use super::app::BridgironApp;
use super::hotkey::{COPY_REPORT_HOTKEY, check_egui_hotkey};
use crate::coordinator::TICK_INTERVAL;
use crate::i18n::Msg;
use eframe::egui;
use std::time::Instant;
use tracing::debug;

impl eframe::App for BridgironApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Prompts picked up by the clipboard watcher (already in history)
        while let Ok(prompt) = self.prompt_rx.try_recv() {
            debug!("Prompt detected ({} chars)", prompt.chars().count());
            let message = self.tr(Msg::MsgPromptDetected);
            self.notify(message);
        }

        if ctx.input(|i| check_egui_hotkey(i, COPY_REPORT_HOTKEY)) {
            self.copy_cc_report();
        }

        // FULL/COMPACT coordination at a fixed cadence
        if self.last_tick.elapsed() >= TICK_INTERVAL {
            self.last_tick = Instant::now();
            let commands = self.tick_coordinator(ctx);
            self.apply_window_commands(ctx, commands);
        }

        if self.coordinator.is_compact() {
            let commands = self.render_compact(ctx);
            self.apply_window_commands(ctx, commands);
        } else {
            self.render_full(ctx);
        }

        self.render_history_popups(ctx);

        let base_title = self.tr(Msg::WindowTitle);
        if let Some(title) = self.notice.title_change(base_title, Instant::now()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }

        // Keep ticking while idle
        ctx.request_repaint_after(TICK_INTERVAL);
    }
}
