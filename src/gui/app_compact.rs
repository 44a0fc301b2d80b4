//! Compact view shown while a CLI window has focus

use super::app::BridgironApp;
use super::theme::{ACCENT, ACCENT_PINK, ACCENT_PURPLE, BG_EXPAND, BG_PRIMARY, TEXT_BRIGHT};
use crate::coordinator::WindowCommand;
use crate::history::Category;
use crate::i18n::Msg;
use eframe::egui::{self, RichText};

/// Width of the history and expand button column
const SIDE_BUTTON_WIDTH: f32 = 24.0;

impl BridgironApp {
    /// Render the compact view; clicking the background or the arrow returns
    /// to the full layout
    pub(super) fn render_compact(&mut self, ctx: &egui::Context) -> Vec<WindowCommand> {
        let mut expand = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BG_PRIMARY).inner_margin(2.0))
            .show(ctx, |ui| {
                // Registered first so the buttons on top take the clicks
                let background = ui.interact(
                    ui.max_rect(),
                    ui.id().with("compact_background"),
                    egui::Sense::click(),
                );
                if background.clicked() {
                    expand = true;
                }

                let height = ui.available_height();
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
                    let copy_width = (ui.available_width() - 2.0 * SIDE_BUTTON_WIDTH - 4.0).max(40.0);

                    let copy_button = egui::Button::new(
                        RichText::new(self.tr(Msg::BtnCopyCcReport))
                            .color(TEXT_BRIGHT)
                            .strong()
                            .small(),
                    )
                    .fill(ACCENT)
                    .wrap();
                    if ui.add_sized([copy_width, height], copy_button).clicked() {
                        self.copy_cc_report();
                    }

                    ui.vertical(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
                        let half = (height - 2.0) / 2.0;
                        for (category, label, color) in [
                            (Category::GptToCc, "G", ACCENT_PINK),
                            (Category::CcToGpt, "C", ACCENT_PURPLE),
                        ] {
                            let button = egui::Button::new(
                                RichText::new(label).color(TEXT_BRIGHT).strong(),
                            )
                            .fill(color);
                            if ui.add_sized([SIDE_BUTTON_WIDTH, half], button).clicked() {
                                self.history_popups.toggle(category);
                            }
                        }
                    });

                    let expand_button =
                        egui::Button::new(RichText::new("↑").color(TEXT_BRIGHT)).fill(BG_EXPAND);
                    if ui.add_sized([SIDE_BUTTON_WIDTH, height], expand_button).clicked() {
                        expand = true;
                    }
                });
            });

        if expand {
            self.exit_compact()
        } else {
            Vec::new()
        }
    }
}
