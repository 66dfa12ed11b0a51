//! PNG export of pattern tiles.

use anyhow::Context;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::editor::Canvas;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("canvas buffer does not match its {width}x{height} size")]
    BufferSize { width: u32, height: u32 },
    #[error("failed to encode png")]
    Encode(#[from] image::ImageError),
}

pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, ExportError> {
    let image = RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_rgba_bytes())
        .ok_or(ExportError::BufferSize {
            width: canvas.width(),
            height: canvas.height(),
        })?;
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Write `canvas` to `path` as PNG, creating parent directories.
pub fn save_png(canvas: &Canvas, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }
    let bytes = encode_png(canvas).context("encode tile as png")?;
    fs::write(path, &bytes).with_context(|| format!("write png: {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "exported tile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::generate_texture;
    use kit_core::KitColor;
    use kit_design::PatternStyle;

    #[test]
    fn test_png_keeps_pixels() {
        let tile = generate_texture(
            KitColor::rgb(0xa5, 0x00, 0x44),
            Some(KitColor::rgb(0x00, 0x4d, 0x98)),
            PatternStyle::VerticalStripes,
            32,
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/tile.png");
        save_png(&tile, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (32, 32));
        assert_eq!(decoded.get_pixel(0, 0).0, [0x00, 0x4d, 0x98, 255]);
        assert_eq!(decoded.get_pixel(4, 0).0, [0xa5, 0x00, 0x44, 255]);
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let mut canvas = Canvas::new(4, 4, egui::Color32::WHITE);
        canvas.pixels.pop();
        assert!(matches!(
            encode_png(&canvas),
            Err(ExportError::BufferSize { width: 4, height: 4 })
        ));
    }
}
