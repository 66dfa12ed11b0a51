//! Procedural pattern tiles.
//!
//! Geometry is defined against a 512px reference tile and scaled to the
//! requested size, so every tile size shows the same design. Output is one
//! tile; repeating it over the garment is the preview binding's job.

use std::f32::consts::FRAC_PI_4;

use kit_core::KitColor;
use kit_design::{DesignState, PatternStyle};
use serde::Serialize;
use tracing::debug;

use super::canvas::{color32, Canvas};

pub const REFERENCE_TILE: u32 = 512;

const STRIPE_BANDS: u32 = 8;
const DIAGONAL_SPACING: f32 = 40.0;
const DOT_RADIUS: f32 = 8.0;
const DOT_SPACING: f32 = 30.0;
const CHECKER_SQUARE: f32 = 40.0;

/// Draw one tile of `pattern`.
///
/// `secondary` is never read for [`PatternStyle::Solid`]. Two-color patterns
/// without one paint white.
pub fn generate_texture(
    base: KitColor,
    secondary: Option<KitColor>,
    pattern: PatternStyle,
    tile_size: u32,
) -> Canvas {
    let n = tile_size.max(1);
    let scale = n as f32 / REFERENCE_TILE as f32;
    let background = color32(base);
    let mut canvas = Canvas::new(n, n, background);
    let second = || secondary.unwrap_or(KitColor::WHITE);

    match pattern {
        PatternStyle::Solid => {}
        PatternStyle::HorizontalStripes => {
            let color = color32(second());
            for band in (0..STRIPE_BANDS).step_by(2) {
                let (start, end) = band_span(band, n);
                canvas.fill_rect(0, start, n, end - start, color);
            }
        }
        PatternStyle::VerticalStripes => {
            let color = color32(second());
            for band in (0..STRIPE_BANDS).step_by(2) {
                let (start, end) = band_span(band, n);
                canvas.fill_rect(start, 0, end - start, n, color);
            }
        }
        PatternStyle::DiagonalStripes => {
            let color = color32(second());
            let spacing = (DIAGONAL_SPACING * scale).max(1.0);
            let half = n as f32 / 2.0;
            let offset = 1.5 * n as f32;
            let (sin, cos) = FRAC_PI_4.sin_cos();
            canvas.paint_with(|x, y| {
                let dx = x as f32 + 0.5 - half;
                let dy = y as f32 + 0.5 - half;
                // distance across the stripes, measured from the tile center
                let u = dx * cos + dy * sin;
                if (u + offset).rem_euclid(2.0 * spacing) < spacing {
                    color
                } else {
                    background
                }
            });
        }
        PatternStyle::Gradient => {
            let end = second();
            canvas.paint_with(|_, y| color32(base.lerp(end, (y as f32 + 0.5) / n as f32)));
        }
        PatternStyle::HalfSplit => {
            canvas.fill_rect(n / 2, 0, n - n / 2, n, color32(second()));
        }
        PatternStyle::Dots => {
            let color = color32(second());
            let radius = DOT_RADIUS * scale;
            let spacing = (DOT_SPACING * scale).max(1.0);
            for cy in dot_centers(spacing, n) {
                for cx in dot_centers(spacing, n) {
                    canvas.fill_circle(cx, cy, radius, color);
                }
            }
        }
        PatternStyle::Checker => {
            let color = color32(second());
            let square = ((CHECKER_SQUARE * scale).round() as u32).max(1);
            let cells = n.div_ceil(square);
            for cy in 0..cells {
                for cx in 0..cells {
                    if (cx + cy) % 2 == 0 {
                        canvas.fill_rect(cx * square, cy * square, square, square, color);
                    }
                }
            }
        }
    }

    debug!(pattern = pattern.id(), tile_size = n, "generated pattern tile");
    canvas
}

/// Like [`generate_texture`], for a pattern named by id. Unknown ids draw
/// a solid tile.
pub fn generate_texture_for_id(
    base: KitColor,
    secondary: Option<KitColor>,
    pattern_id: &str,
    tile_size: u32,
) -> Canvas {
    generate_texture(base, secondary, PatternStyle::from_id_or_solid(pattern_id), tile_size)
}

fn band_span(band: u32, n: u32) -> (u32, u32) {
    (band * n / STRIPE_BANDS, (band + 1) * n / STRIPE_BANDS)
}

fn dot_centers(spacing: f32, n: u32) -> impl Iterator<Item = f32> {
    let limit = n as f32;
    (0..)
        .map(move |k| spacing / 2.0 + k as f32 * spacing)
        .take_while(move |c| *c < limit)
}

/// The inputs a tile depends on. Equal keys draw identical tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureKey {
    pub base: KitColor,
    pub secondary: Option<KitColor>,
    pub pattern: PatternStyle,
}

impl TextureKey {
    pub fn for_state(state: &DesignState) -> Self {
        Self {
            base: state.base_color,
            secondary: state.active_secondary(),
            pattern: state.pattern,
        }
    }

    pub fn generate(&self, tile_size: u32) -> Canvas {
        generate_texture(self.base, self.secondary, self.pattern, tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    const BLUE: KitColor = KitColor::rgb(0x00, 0x55, 0xa4);
    const GOLD: KitColor = KitColor::rgb(0xff, 0xd7, 0x00);

    fn count(canvas: &Canvas, color: Color32) -> usize {
        canvas.pixels.iter().filter(|p| **p == color).count()
    }

    fn px(canvas: &Canvas, x: u32, y: u32) -> Option<Color32> {
        canvas.get_pixel(x, y)
    }

    #[test]
    fn test_checker_is_deterministic() {
        let a = generate_texture(BLUE, Some(GOLD), PatternStyle::Checker, 512);
        let b = generate_texture(BLUE, Some(GOLD), PatternStyle::Checker, 512);
        assert_eq!(a, b);
        assert_eq!(px(&a, 0, 0), Some(color32(GOLD)));
        assert_eq!(px(&a, 40, 0), Some(color32(BLUE)));
        assert_eq!(px(&a, 40, 40), Some(color32(GOLD)));
        assert_eq!(px(&a, 511, 40), Some(color32(BLUE)));
    }

    #[test]
    fn test_solid_ignores_secondary() {
        let tile = generate_texture(BLUE, None, PatternStyle::Solid, 64);
        assert_eq!(count(&tile, color32(BLUE)), 64 * 64);
        assert_eq!(tile, generate_texture(BLUE, Some(GOLD), PatternStyle::Solid, 64));
    }

    #[test]
    fn test_stripes_start_with_secondary_band() {
        let h = generate_texture(BLUE, Some(GOLD), PatternStyle::HorizontalStripes, 512);
        assert_eq!(px(&h, 100, 0), Some(color32(GOLD)));
        assert_eq!(px(&h, 100, 63), Some(color32(GOLD)));
        assert_eq!(px(&h, 100, 64), Some(color32(BLUE)));
        assert_eq!(px(&h, 100, 128), Some(color32(GOLD)));
        assert_eq!(count(&h, color32(GOLD)), 512 * 256);

        let v = generate_texture(BLUE, Some(GOLD), PatternStyle::VerticalStripes, 64);
        assert_eq!(px(&v, 7, 30), Some(color32(GOLD)));
        assert_eq!(px(&v, 8, 30), Some(color32(BLUE)));
    }

    #[test]
    fn test_missing_secondary_paints_white() {
        let tile = generate_texture(BLUE, None, PatternStyle::HalfSplit, 32);
        assert_eq!(px(&tile, 15, 0), Some(color32(BLUE)));
        assert_eq!(px(&tile, 16, 0), Some(Color32::WHITE));
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let tile = generate_texture(KitColor::BLACK, Some(KitColor::WHITE), PatternStyle::Gradient, 512);
        let top = px(&tile, 0, 0).map(|c| c.r());
        let bottom = px(&tile, 0, 511).map(|c| c.r());
        assert!(top.is_some_and(|r| r <= 1), "{top:?}");
        assert!(bottom.is_some_and(|r| r >= 254), "{bottom:?}");
        // rows are uniform
        assert_eq!(px(&tile, 0, 200), px(&tile, 511, 200));
    }

    #[test]
    fn test_dots_grid() {
        let tile = generate_texture(BLUE, Some(GOLD), PatternStyle::Dots, 512);
        assert_eq!(px(&tile, 15, 15), Some(color32(GOLD)));
        assert_eq!(px(&tile, 45, 15), Some(color32(GOLD)));
        assert_eq!(px(&tile, 0, 0), Some(color32(BLUE)));
        assert_eq!(px(&tile, 30, 30), Some(color32(BLUE)));
    }

    #[test]
    fn test_diagonal_covers_about_half() {
        let tile = generate_texture(BLUE, Some(GOLD), PatternStyle::DiagonalStripes, 256);
        let gold = count(&tile, color32(GOLD)) as f32 / (256.0 * 256.0);
        assert!((0.4..0.6).contains(&gold), "{gold}");
        // stripes run along the anti-diagonal: constant where x + y is constant
        assert_eq!(px(&tile, 10, 100), px(&tile, 100, 10));
    }

    #[test]
    fn test_unknown_id_falls_back_to_solid() {
        let tile = generate_texture_for_id(BLUE, Some(GOLD), "tartan", 32);
        assert_eq!(tile, generate_texture(BLUE, None, PatternStyle::Solid, 32));
        let stripes = generate_texture_for_id(BLUE, Some(GOLD), "stripes", 32);
        assert_eq!(stripes, generate_texture(BLUE, Some(GOLD), PatternStyle::VerticalStripes, 32));
    }

    #[test]
    fn test_texture_key_tracks_active_secondary() {
        let mut state = DesignState::default();
        assert_eq!(TextureKey::for_state(&state).secondary, None);
        state.pattern = PatternStyle::Checker;
        assert_eq!(TextureKey::for_state(&state).secondary, Some(state.secondary_color));
    }
}
