// Raster side of the editor: the canvas and the pattern tiles drawn on it.

pub mod canvas;
pub mod pattern;

pub use canvas::{color32, Canvas};
pub use pattern::{generate_texture, generate_texture_for_id, TextureKey, REFERENCE_TILE};
