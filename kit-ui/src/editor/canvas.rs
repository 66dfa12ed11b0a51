// Raster surface the pattern tiles are drawn onto.
// Pixels are row-major, straight (unmultiplied) alpha.

use egui::{Color32, ColorImage};
use kit_core::KitColor;
use tracing::{debug, trace, warn};

pub fn color32(color: KitColor) -> Color32 {
    let [r, g, b] = color.to_array();
    Color32::from_rgb(r, g, b)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        debug!(width, height, ?background, "creating canvas");
        let total_pixels = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![background; total_pixels],
        }
    }

    // Check if coordinates are within canvas bounds
    fn is_valid_coordinate(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    // convert 2d coordinates to 1d index
    fn coord_to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if !self.is_valid_coordinate(x, y) {
            warn!(x, y, "requested pixel outside canvas");
            return None;
        }
        Some(self.pixels[self.coord_to_index(x, y)])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) -> bool {
        if !self.is_valid_coordinate(x, y) {
            trace!(x, y, "ignoring pixel outside canvas");
            return false;
        }
        let index = self.coord_to_index(x, y);
        self.pixels[index] = color;
        true
    }

    pub fn fill(&mut self, color: Color32) {
        trace!(?color, "filling canvas");
        self.pixels.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(Color32::WHITE);
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = self.coord_to_index(x.min(x_end), row);
            let end = self.coord_to_index(x_end, row);
            self.pixels[start..end].fill(color);
        }
    }

    /// Fill every pixel whose center lies within `radius` of (`cx`, `cy`).
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color32) {
        let x_min = (cx - radius).floor().max(0.0) as u32;
        let y_min = (cy - radius).floor().max(0.0) as u32;
        let x_max = ((cx + radius).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((cy + radius).ceil().max(0.0) as u32).min(self.height);
        let r2 = radius * radius;
        for y in y_min..y_max {
            for x in x_min..x_max {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    let index = self.coord_to_index(x, y);
                    self.pixels[index] = color;
                }
            }
        }
    }

    /// Overwrite every pixel with `paint(x, y)`.
    pub fn paint_with(&mut self, mut paint: impl FnMut(u32, u32) -> Color32) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.coord_to_index(x, y);
                self.pixels[index] = paint(x, y);
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.to_srgba_unmultiplied())
            .collect()
    }

    /// Hand the canvas to egui as texture data.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.to_rgba_bytes(),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(512, 512, Color32::WHITE)
    }
}
