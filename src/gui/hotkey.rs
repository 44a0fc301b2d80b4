//! In-window hotkey matching

use eframe::egui::{self, Key};

/// Copy-report shortcut
pub const COPY_REPORT_HOTKEY: &str = "alt+c";

/// Check if a hotkey string like "alt+c" was pressed this frame
pub fn check_egui_hotkey(input: &egui::InputState, hotkey_str: &str) -> bool {
    let hotkey_lower = hotkey_str.to_lowercase();
    let parts: Vec<&str> = hotkey_lower.split('+').map(str::trim).collect();
    let Some((key_part, modifier_parts)) = parts.split_last() else {
        return false;
    };

    let mut need_ctrl = false;
    let mut need_alt = false;
    let mut need_shift = false;
    for part in modifier_parts {
        match *part {
            "cmd" | "command" | "ctrl" | "control" => need_ctrl = true,
            "alt" | "option" => need_alt = true,
            "shift" => need_shift = true,
            _ => return false,
        }
    }

    // On Windows/Linux egui reports Ctrl as both `command` and `ctrl`
    let ctrl_pressed = input.modifiers.command || input.modifiers.ctrl;
    if ctrl_pressed != need_ctrl
        || input.modifiers.alt != need_alt
        || input.modifiers.shift != need_shift
    {
        return false;
    }

    match parse_key(key_part) {
        Some(key) => input.key_pressed(key),
        None => false,
    }
}

fn parse_key(name: &str) -> Option<Key> {
    if name.chars().count() == 1 {
        return Key::from_name(&name.to_uppercase());
    }
    match name {
        "esc" | "escape" => Some(Key::Escape),
        "enter" | "return" => Some(Key::Enter),
        "space" => Some(Key::Space),
        other => Key::from_name(other),
    }
}

/// Index selected with the digit keys 1-9, if any was pressed
pub fn pressed_digit(input: &egui::InputState) -> Option<usize> {
    const DIGITS: [Key; 9] = [
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];
    DIGITS.iter().position(|key| input.key_pressed(*key))
}
