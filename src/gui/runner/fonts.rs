//! Font configuration for the GUI

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use tracing::info;

/// Add a system CJK font so Japanese labels render, plus symbol fallbacks
pub(super) fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();

    // Each entry: (name, path); the first CJK font found wins
    #[cfg(target_os = "windows")]
    let font_fallbacks: &[(&str, &str)] = &[
        ("cjk", "C:\\Windows\\Fonts\\meiryo.ttc"),
        ("cjk", "C:\\Windows\\Fonts\\YuGothM.ttc"),
        ("cjk", "C:\\Windows\\Fonts\\msgothic.ttc"),
        ("symbols", "C:\\Windows\\Fonts\\seguisym.ttf"),
    ];

    #[cfg(target_os = "macos")]
    let font_fallbacks: &[(&str, &str)] = &[
        ("cjk", "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"),
        ("cjk", "/System/Library/Fonts/Hiragino Sans GB.ttc"),
        ("symbols", "/System/Library/Fonts/Apple Symbols.ttf"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let font_fallbacks: &[(&str, &str)] = &[
        ("cjk", "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
        ("cjk", "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
        ("cjk", "/usr/share/fonts/truetype/takao-gothic/TakaoPGothic.ttf"),
        ("symbols", "/usr/share/fonts/truetype/noto/NotoSansSymbols2-Regular.ttf"),
    ];

    for (name, path) in font_fallbacks {
        if fonts.font_data.contains_key(*name) {
            continue;
        }
        let Ok(font_data) = std::fs::read(path) else {
            continue;
        };

        fonts
            .font_data
            .insert((*name).to_owned(), FontData::from_owned(font_data).into());

        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            if let Some(list) = fonts.families.get_mut(&family) {
                list.push((*name).to_owned());
            }
        }

        info!("Loaded fallback font '{}' from: {}", name, path);
    }

    ctx.set_fonts(fonts);
}
