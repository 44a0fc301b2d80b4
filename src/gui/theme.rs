//! GUI theme: dark panels with the ChatGPT green accent
//!
//! Color constants for the Bridgiron GUI.

use egui::{self, Color32, CornerRadius, Stroke};

// ═══════════════════════════════════════════════════════════════════════════
// BACKGROUNDS
// ═══════════════════════════════════════════════════════════════════════════

/// Window background
pub const BG_PRIMARY: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
/// Text fields and history popups
pub const BG_SECONDARY: Color32 = Color32::from_rgb(0x2d, 0x2d, 0x2d);
/// Regular buttons and history rows
pub const BG_BUTTON: Color32 = Color32::from_rgb(0x3c, 0x3c, 0x3c);
pub const BG_BUTTON_HOVER: Color32 = Color32::from_rgb(0x4a, 0x4a, 0x4a);
/// Compact view expand button
pub const BG_EXPAND: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);
pub const BORDER: Color32 = Color32::from_rgb(0x40, 0x40, 0x40);

// ═══════════════════════════════════════════════════════════════════════════
// TEXT COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);
pub const TEXT_BRIGHT: Color32 = Color32::WHITE;
/// Section titles
pub const TEXT_LABEL: Color32 = Color32::from_rgb(0xa0, 0xa0, 0xa0);
/// Timestamps and placeholders
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);

// ═══════════════════════════════════════════════════════════════════════════
// ACCENT COLORS
// ═══════════════════════════════════════════════════════════════════════════

/// Copy-report button
pub const ACCENT: Color32 = Color32::from_rgb(0x10, 0xa3, 0x7f);
pub const ACCENT_ACTIVE: Color32 = Color32::from_rgb(0x0d, 0x8a, 0x6a);
/// GPT→CC history
pub const ACCENT_PINK: Color32 = Color32::from_rgb(0xff, 0x69, 0xb4);
/// CC→GPT history
pub const ACCENT_PURPLE: Color32 = Color32::from_rgb(0x93, 0x70, 0xdb);
/// First-run hint
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(0xff, 0xcc, 0x00);
/// Readme button until first opened
pub const ACCENT_RED: Color32 = Color32::from_rgb(0xe6, 0x39, 0x46);
/// History delete button
pub const DELETE_RED: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);

/// Install the dark visuals on `ctx`
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let visuals = &mut style.visuals;

    visuals.dark_mode = true;
    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_SECONDARY;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.bg_fill = BG_BUTTON;
    visuals.widgets.inactive.weak_bg_fill = BG_BUTTON;
    visuals.widgets.hovered.bg_fill = ACCENT;
    visuals.widgets.hovered.weak_bg_fill = ACCENT;
    visuals.widgets.active.bg_fill = ACCENT_ACTIVE;
    visuals.widgets.active.weak_bg_fill = ACCENT_ACTIVE;
    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, TEXT_BRIGHT);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = CornerRadius::same(3);
    }

    ctx.set_style(style);
}
