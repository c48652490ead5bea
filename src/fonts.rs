//! Font registration for chart text.
//!
//! plotters draws every caption, axis label and legend entry through the
//! `sans-serif` family, which has to be registered before the first render.
//! A Japanese-capable system font is preferred when one is installed; the
//! bundled DejaVu Sans covers Latin text everywhere else.

use std::path::Path;

use once_cell::sync::OnceCell;
use plotters::style::{FontStyle, register_font};
use tracing::{debug, info};

use crate::error::{GraphNarratorError, Result};

pub const FONT_FAMILY: &str = "sans-serif";

static BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Well-known CJK font locations on Linux and macOS.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/ipaexfont-gothic/ipaexg.ttf",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
];

static DEFAULT_FONT: OnceCell<()> = OnceCell::new();

/// Registers the default chart font once per process.
pub fn ensure_registered() -> Result<()> {
    DEFAULT_FONT
        .get_or_try_init(|| {
            for candidate in CJK_FONT_CANDIDATES {
                let path = Path::new(candidate);
                if !path.is_file() {
                    continue;
                }
                match register_file(path) {
                    Ok(()) => {
                        debug!("Using system font {} for chart text", candidate);
                        return Ok(());
                    }
                    Err(e) => debug!("Skipping font {}: {}", candidate, e),
                }
            }
            register_bytes(BUNDLED_FONT).map_err(|_| GraphNarratorError::Image {
                message: "bundled chart font is not a valid font file".to_string(),
            })
        })
        .copied()
}

/// Replaces the chart font with the TrueType/OpenType file at `path`.
///
/// The font data lives for the rest of the process, so call this once at
/// startup rather than per render.
pub fn use_font_file(path: &Path) -> Result<()> {
    ensure_registered()?;
    register_file(path)?;
    info!("Chart font set to {}", path.display());
    Ok(())
}

fn register_file(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).map_err(|e| GraphNarratorError::Configuration {
        message: format!("cannot read font file {}: {}", path.display(), e),
    })?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_bytes(bytes).map_err(|_| GraphNarratorError::Configuration {
        message: format!("{} is not a usable font file", path.display()),
    })
}

fn register_bytes(bytes: &'static [u8]) -> std::result::Result<(), ()> {
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_registers_repeatedly() {
        assert!(ensure_registered().is_ok());
        assert!(ensure_registered().is_ok());
    }

    #[test]
    fn non_font_file_is_a_configuration_error() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert!(matches!(
            use_font_file(&manifest),
            Err(GraphNarratorError::Configuration { .. })
        ));
    }

    #[test]
    fn missing_font_file_is_a_configuration_error() {
        assert!(matches!(
            use_font_file(Path::new("/definitely/not/a/font.ttf")),
            Err(GraphNarratorError::Configuration { .. })
        ));
    }

    #[test]
    fn bundled_font_file_can_be_selected_explicitly() {
        let font = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf");
        assert!(use_font_file(&font).is_ok());
    }
}
