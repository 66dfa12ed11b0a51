//! kit-ui: turns a design into pixels and render parameters.

pub mod editor;
pub mod export;
pub mod preview;

pub use editor::{generate_texture, generate_texture_for_id, Canvas, TextureKey};
pub use export::{encode_png, save_png, ExportError};
pub use preview::{
    project, project_with, PreviewBinding, PreviewSettings, PreviewUpdate, RenderParams,
};
