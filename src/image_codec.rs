//! PNG payloads for the generation endpoint.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat};

use crate::chart::Chart;
use crate::error::Result;
use crate::render::render_rgb;

pub const PNG_MIME_TYPE: &str = "image/png";

/// An encoded chart image, ready to be inlined into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    pub fn mime_type(&self) -> &'static str {
        PNG_MIME_TYPE
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        decode_png(&self.bytes)
    }
}

pub fn encode_chart(chart: &Chart) -> Result<ImagePayload> {
    let rgb = render_rgb(chart)?;
    let (width, height) = rgb.dimensions();
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(ImagePayload {
        bytes,
        width,
        height,
    })
}

pub fn chart_to_base64(chart: &Chart) -> Result<String> {
    Ok(encode_chart(chart)?.to_base64())
}

pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?)
}

pub fn save_png(chart: &Chart, path: &Path) -> Result<()> {
    let payload = encode_chart(chart)?;
    std::fs::write(path, &payload.bytes)?;
    tracing::info!("Chart image written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SeriesKind;
    use crate::config::ChartConfig;
    use crate::error::GraphNarratorError;

    fn sample_chart(width: u32, height: u32) -> Chart {
        Chart::new("codec", ChartConfig { width, height })
            .with_series("v", SeriesKind::Line, vec![3.0, 1.0, 4.0, 1.0, 5.0])
    }

    #[test]
    fn decoded_image_keeps_configured_size() {
        let payload = encode_chart(&sample_chart(480, 270)).unwrap();
        assert_eq!((payload.width, payload.height), (480, 270));
        assert_eq!(&payload.bytes[1..4], b"PNG");

        let decoded = payload.decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (480, 270));
    }

    #[test]
    fn base64_decodes_back_to_png() {
        let encoded = chart_to_base64(&sample_chart(320, 240)).unwrap();
        let raw = BASE64.decode(encoded).unwrap();
        let decoded = decode_png(&raw).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (320, 240));
    }

    #[test]
    fn garbage_is_not_a_png() {
        let err = decode_png(b"not an image").unwrap_err();
        assert!(matches!(err, GraphNarratorError::Image { .. }));
    }
}
