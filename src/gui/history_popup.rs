//! History popups, one small window per transfer direction

use super::app::BridgironApp;
use super::hotkey::pressed_digit;
use super::theme::{BG_BUTTON, BG_SECONDARY, DELETE_RED, TEXT_BRIGHT, TEXT_MUTED};
use crate::history::{Category, HistoryItem};
use crate::i18n::{Msg, Translate};
use egui::{Key, RichText};

/// Popup size in logical points
const POPUP_SIZE: [f32; 2] = [400.0, 300.0];

/// Which history popups are open
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPopups {
    gpt_to_cc: bool,
    cc_to_gpt: bool,
}

impl HistoryPopups {
    pub fn is_open(&self, category: Category) -> bool {
        match category {
            Category::GptToCc => self.gpt_to_cc,
            Category::CcToGpt => self.cc_to_gpt,
        }
    }

    /// Open the popup, or close it when already open
    pub fn toggle(&mut self, category: Category) {
        let open = self.slot(category);
        *open = !*open;
    }

    pub fn close(&mut self, category: Category) {
        *self.slot(category) = false;
    }

    pub fn any_open(&self) -> bool {
        self.gpt_to_cc || self.cc_to_gpt
    }

    fn slot(&mut self, category: Category) -> &mut bool {
        match category {
            Category::GptToCc => &mut self.gpt_to_cc,
            Category::CcToGpt => &mut self.cc_to_gpt,
        }
    }
}

/// What the user did in a popup this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopupAction {
    Select(usize),
    Delete(usize),
    Close,
}

fn title_msg(category: Category) -> Msg {
    match category {
        Category::GptToCc => Msg::HistoryTitleGpt,
        Category::CcToGpt => Msg::HistoryTitleCc,
    }
}

impl BridgironApp {
    pub(super) fn render_history_popups(&mut self, ctx: &egui::Context) {
        for category in Category::ALL {
            if !self.history_popups.is_open(category) {
                continue;
            }

            let language = self.language();
            let items = self.history_items(category).to_vec();

            match show_history_popup(ctx, category, &language, &items) {
                Some(PopupAction::Select(index)) => self.copy_from_history(category, index),
                Some(PopupAction::Delete(index)) => self.delete_history(category, index),
                Some(PopupAction::Close) => self.history_popups.close(category),
                None => {}
            }
        }
    }
}

fn show_history_popup(
    ctx: &egui::Context,
    category: Category,
    translator: &dyn Translate,
    items: &[HistoryItem],
) -> Option<PopupAction> {
    let title = translator.tr(title_msg(category));
    let empty_text = translator.tr(Msg::NoHistory);
    let viewport_id = egui::ViewportId::from_hash_of(("history", category.as_str()));
    let builder = egui::ViewportBuilder::default()
        .with_title(title)
        .with_inner_size(POPUP_SIZE)
        .with_resizable(false)
        .with_always_on_top();

    ctx.show_viewport_immediate(viewport_id, builder, |ctx, class| {
        // Backends without multi-viewport support draw into the main window
        if matches!(class, egui::ViewportClass::Embedded) {
            let mut open = true;
            let action = egui::Window::new(title)
                .id(egui::Id::new(("history_window", category.as_str())))
                .open(&mut open)
                .default_size(POPUP_SIZE)
                .collapsible(false)
                .show(ctx, |ui| render_history_list(ui, items, empty_text))
                .and_then(|response| response.inner)
                .flatten();
            if !open {
                return Some(PopupAction::Close);
            }
            return action.or_else(|| keyboard_action(ctx, items));
        }

        let action = egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(8.0))
            .show(ctx, |ui| render_history_list(ui, items, empty_text))
            .inner;

        if ctx.input(|i| i.viewport().close_requested()) {
            return Some(PopupAction::Close);
        }
        action.or_else(|| keyboard_action(ctx, items))
    })
}

/// Esc closes; 1-9 pick the matching row
fn keyboard_action(ctx: &egui::Context, items: &[HistoryItem]) -> Option<PopupAction> {
    ctx.input(|i| {
        if i.key_pressed(Key::Escape) {
            return Some(PopupAction::Close);
        }
        pressed_digit(i)
            .and_then(|position| items.get(position))
            .map(|item| PopupAction::Select(item.index))
    })
}

fn render_history_list(
    ui: &mut egui::Ui,
    items: &[HistoryItem],
    empty_text: &str,
) -> Option<PopupAction> {
    if items.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(empty_text).color(TEXT_MUTED));
        });
        return None;
    }

    let mut action = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (position, item) in items.iter().enumerate() {
                egui::Frame::NONE
                    .fill(BG_BUTTON)
                    .corner_radius(3.0)
                    .inner_margin(egui::Margin::symmetric(6, 4))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            let delete = egui::Button::new(RichText::new("x").color(DELETE_RED))
                                .frame(false);
                            if ui.add(delete).clicked() {
                                action = Some(PopupAction::Delete(item.index));
                            }

                            if position < 9 {
                                ui.label(
                                    RichText::new(format!("{}.", position + 1)).color(TEXT_MUTED),
                                );
                            }
                            ui.label(
                                RichText::new(item.timestamp.format("%m/%d %H:%M").to_string())
                                    .color(TEXT_MUTED),
                            );

                            let preview = egui::Label::new(
                                RichText::new(item.preview.as_str()).color(TEXT_BRIGHT),
                            )
                            .sense(egui::Sense::click())
                            .truncate();
                            if ui.add(preview).clicked() {
                                action = Some(PopupAction::Select(item.index));
                            }
                        });
                    });
                ui.add_space(2.0);
            }
        });
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut popups = HistoryPopups::default();
        assert!(!popups.any_open());

        popups.toggle(Category::GptToCc);
        assert!(popups.is_open(Category::GptToCc));
        assert!(!popups.is_open(Category::CcToGpt));
        assert!(popups.any_open());

        popups.toggle(Category::GptToCc);
        assert!(!popups.any_open());
    }

    #[test]
    fn test_close_leaves_other_popup_open() {
        let mut popups = HistoryPopups::default();
        popups.toggle(Category::GptToCc);
        popups.toggle(Category::CcToGpt);

        popups.close(Category::GptToCc);
        assert!(!popups.is_open(Category::GptToCc));
        assert!(popups.is_open(Category::CcToGpt));
    }
}
