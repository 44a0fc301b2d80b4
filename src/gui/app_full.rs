//! Full window layout: settings sections and actions

use super::app::BridgironApp;
use super::theme::{
    ACCENT, ACCENT_PINK, ACCENT_PURPLE, ACCENT_RED, ACCENT_YELLOW, BG_BUTTON, BG_PRIMARY,
    BG_SECONDARY, TEXT_BRIGHT, TEXT_LABEL, TEXT_MUTED,
};
use crate::bookmarklet::PatternKind;
use crate::config::MiniWindowPosition;
use crate::history::Category;
use crate::i18n::{Language, Msg};
use eframe::egui::{self, Align, Layout, RichText};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Label column width for the text inputs
const LABEL_WIDTH: f32 = 110.0;

const BROWSE_BUTTON_WIDTH: f32 = 28.0;

fn render_section_frame<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::NONE
        .fill(BG_SECONDARY)
        .corner_radius(4.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

fn render_section<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    ui.label(RichText::new(title).color(TEXT_LABEL).strong());
    ui.add_space(4.0);
    let inner = render_section_frame(ui, add_contents);
    ui.add_space(10.0);
    inner
}

fn mini_position_msg(policy: MiniWindowPosition) -> Msg {
    match policy {
        MiniWindowPosition::CliBottomLeft => Msg::MiniPosCli,
        MiniWindowPosition::LastPosition => Msg::MiniPosLast,
    }
}

impl BridgironApp {
    pub(super) fn render_full(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::NONE.fill(BG_PRIMARY).inner_margin(6.0))
            .show(ctx, |ui| {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{}{}", self.tr(Msg::FooterVersion), VERSION))
                            .color(TEXT_MUTED)
                            .small(),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BG_PRIMARY).inner_margin(12.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_language_selector(ui);
                        self.render_claude_code_section(ui);
                        self.render_bookmarklet_section(ui);
                        self.render_chatgpt_section(ui);
                        self.render_config_section(ui);
                        self.render_help_section(ui, ctx);
                    });
            });
    }

    fn render_language_selector(&mut self, ui: &mut egui::Ui) {
        let mut selected = self.language();
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            egui::ComboBox::from_id_salt("language")
                .selected_text(selected.display_name())
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        ui.selectable_value(&mut selected, language, language.display_name());
                    }
                });
        });
        self.set_language(selected);
    }

    fn render_claude_code_section(&mut self, ui: &mut egui::Ui) {
        render_section(ui, self.tr(Msg::SectionClaudeCode), |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(self.tr(Msg::LabelProjectPath)));
                let edit_width = (ui.available_width()
                    - BROWSE_BUTTON_WIDTH
                    - ui.spacing().item_spacing.x)
                    .max(0.0);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.project_path_input)
                        .desired_width(edit_width),
                );
                if response.lost_focus() {
                    self.commit_project_path();
                }

                let browse = ui
                    .add_sized(
                        [BROWSE_BUTTON_WIDTH, 20.0],
                        egui::Button::new(RichText::new("...").color(TEXT_BRIGHT)).fill(BG_BUTTON),
                    )
                    .on_hover_text(self.tr(Msg::SelectProjectFolder));
                if browse.clicked() {
                    self.browse_project_path();
                }
            });

            ui.horizontal(|ui| {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(self.tr(Msg::LabelCcPrefix)));
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.cc_prefix_input)
                        .desired_width(f32::INFINITY),
                );
                if response.lost_focus() {
                    self.commit_cc_prefix();
                }
            });

            ui.horizontal(|ui| {
                ui.add_sized(
                    [LABEL_WIDTH, 20.0],
                    egui::Label::new(self.tr(Msg::LabelMiniPosition)),
                );
                let current = self.settings.mini_window_position;
                let mut selected = current;
                egui::ComboBox::from_id_salt("mini_window_position")
                    .selected_text(self.tr(mini_position_msg(current)))
                    .show_ui(ui, |ui| {
                        for policy in [
                            MiniWindowPosition::CliBottomLeft,
                            MiniWindowPosition::LastPosition,
                        ] {
                            ui.selectable_value(
                                &mut selected,
                                policy,
                                self.tr(mini_position_msg(policy)),
                            );
                        }
                    });
                self.set_mini_window_position(selected);
            });

            ui.add_space(8.0);

            let copy_button = egui::Button::new(
                RichText::new(self.tr(Msg::BtnCopyCcReport))
                    .color(TEXT_BRIGHT)
                    .strong()
                    .size(15.0),
            )
            .fill(ACCENT)
            .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add(copy_button).clicked() {
                self.copy_cc_report();
            }

            ui.add_space(6.0);
            self.render_history_buttons(ui);
        });
    }

    fn render_history_buttons(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (category, msg, color) in [
                (Category::GptToCc, Msg::HistoryGptToCc, ACCENT_PINK),
                (Category::CcToGpt, Msg::HistoryCcToGpt, ACCENT_PURPLE),
            ] {
                let button = egui::Button::new(RichText::new(self.tr(msg)).color(color))
                    .selected(self.history_popups.is_open(category));
                if ui.add(button).clicked() {
                    self.history_popups.toggle(category);
                }
            }
        });
    }

    fn render_bookmarklet_section(&mut self, ui: &mut egui::Ui) {
        render_section(ui, self.tr(Msg::SectionBookmarklet), |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(self.tr(Msg::LabelTitle)));
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.title_input).desired_width(f32::INFINITY),
                );
                if response.lost_focus() {
                    self.commit_title();
                }
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button(self.tr(Msg::BtnCopyTitle)).clicked() {
                    self.copy_title();
                }
                if ui.button(self.tr(Msg::BtnCopyCode)).clicked() {
                    self.copy_bookmarklet_code();
                }
            });
        });
    }

    fn render_chatgpt_section(&mut self, ui: &mut egui::Ui) {
        render_section(ui, self.tr(Msg::SectionChatGpt), |ui| {
            if ui.button(self.tr(Msg::BtnCopyInstructions)).clicked() {
                self.copy_custom_instructions();
            }
        });
    }

    fn render_config_section(&mut self, ui: &mut egui::Ui) {
        render_section(ui, self.tr(Msg::SectionConfig), |ui| {
            ui.horizontal_wrapped(|ui| {
                for kind in PatternKind::ALL {
                    if ui.button(kind.file_name()).clicked() {
                        self.open_pattern_file(kind);
                    }
                }
                ui.label(RichText::new("|").color(TEXT_MUTED));
                if ui.button("settings.txt").clicked() {
                    self.open_settings_file();
                }
            });
        });
    }

    fn render_help_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        render_section(ui, self.tr(Msg::SectionHelp), |ui| {
            let first_run = self.settings.first_run;
            if first_run {
                ui.label(RichText::new(self.tr(Msg::FirstRunMessage)).color(ACCENT_YELLOW));
                ui.add_space(4.0);
            }

            let fill = if first_run { ACCENT_RED } else { BG_BUTTON };
            let readme = egui::Button::new(RichText::new(self.tr(Msg::BtnReadme)).color(TEXT_BRIGHT))
                .fill(fill);
            if ui.add(readme).clicked() {
                self.open_readme(ctx);
            }
        });
    }
}
