//! Thai glyph support for egui.
//!
//! egui's bundled fonts have no Thai coverage, so a system (or configured)
//! font is appended as a fallback to both font families at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;

use crate::config::UiConfig;

/// Font family key used inside egui's font definitions.
const THAI_FONT_NAME: &str = "thai";

/// Locations probed when no font is configured.
pub const THAI_FONT_CANDIDATES: &[&str] = &[
    // Linux (fonts-tlwg / fonts-noto)
    "/usr/share/fonts/truetype/tlwg/Garuda.ttf",
    "/usr/share/fonts/opentype/tlwg/Garuda.otf",
    "/usr/share/fonts/truetype/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSansThai-Regular.ttf",
    // Windows
    "C:\\Windows\\Fonts\\LeelawUI.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
    // macOS
    "/System/Library/Fonts/Supplemental/Ayuthaya.ttf",
    "/System/Library/Fonts/Thonburi.ttc",
];

/// File extensions egui's font loader can parse.
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Existing file with a TrueType/OpenType extension.
///
/// epaint panics on bytes it cannot parse, so anything else is never handed
/// to [`egui::FontData`].
pub fn is_font_file(path: &Path) -> bool {
    let known_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FONT_EXTENSIONS.iter().any(|f| e.eq_ignore_ascii_case(f)));
    known_ext && path.is_file()
}

/// First usable font file: the configured one, then `candidates` in order.
pub fn find_thai_font(configured: Option<&Path>, candidates: &[&str]) -> Option<PathBuf> {
    if let Some(path) = configured {
        if is_font_file(path) {
            return Some(path.to_path_buf());
        }
        log::warn!(
            "configured Thai font is missing or not a .ttf/.otf/.ttc file: {}",
            path.display()
        );
    }

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| is_font_file(p))
}

/// Install a Thai-capable font into `ctx`.  Returns the path that was used.
pub fn install_thai_font(ctx: &egui::Context, ui: &UiConfig) -> Option<PathBuf> {
    let path = find_thai_font(ui.thai_font_path.as_deref(), THAI_FONT_CANDIDATES)?;

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("could not read Thai font {}: {e}", path.display());
            return None;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        THAI_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(THAI_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);

    log::info!("Thai font loaded: {}", path.display());
    Some(path)
}
