//! Garment preview binding.
//!
//! [`project`] turns a [`DesignState`] into the parameters a 3D renderer
//! needs: material, an optional repeating pattern tile, and one transform per
//! decal. It holds no state. [`PreviewBinding`] wraps it with a cache so the
//! tile is only redrawn when its inputs change.

use std::f32::consts::PI;

use kit_core::{KitColor, Placement, Side, Vec3};
use kit_design::{DecalSlot, DesignState, EditorConfig, LayerKind, LogoRef};
use serde::Serialize;
use tracing::{debug, trace};

use crate::editor::{Canvas, TextureKey};

pub const MATERIAL_ROUGHNESS: f32 = 0.7;
pub const MATERIAL_METALNESS: f32 = 0.1;
pub const LOGO_OPACITY: f32 = 0.95;
/// Text outline width as a fraction of the font size.
pub const OUTLINE_RATIO: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewSettings {
    pub tile_size: u32,
    pub texture_repeat: u32,
}

impl PreviewSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            tile_size: config.tile_size,
            texture_repeat: config.texture_repeat,
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialParams {
    pub color: KitColor,
    pub roughness: f32,
    pub metalness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextureBinding {
    pub key: TextureKey,
    pub tile_size: u32,
    pub repeat: [u32; 2],
    pub wrap: WrapMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecalTransform {
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: [f32; 3],
    pub scale: f32,
    pub side: Side,
}

impl DecalTransform {
    /// Decals on the back are turned half a revolution about the vertical
    /// axis so they read correctly from behind.
    pub fn from_placement(placement: Placement) -> Self {
        let side = placement.side();
        let rotation = match side {
            Side::Front => [0.0, 0.0, 0.0],
            Side::Back => [0.0, PI, 0.0],
        };
        Self {
            position: placement.position,
            rotation,
            scale: placement.scale,
            side,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoDecal {
    pub source: LogoRef,
    pub transform: DecalTransform,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDecal {
    pub text: String,
    pub transform: DecalTransform,
    pub font_size: f32,
    pub color: KitColor,
    pub outline_width: f32,
    pub outline_color: KitColor,
}

impl TextDecal {
    fn new(text: String, placement: Placement) -> Self {
        Self {
            text,
            transform: DecalTransform::from_placement(placement),
            font_size: placement.scale,
            color: KitColor::WHITE,
            outline_width: placement.scale * OUTLINE_RATIO,
            outline_color: KitColor::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderParams {
    pub material: MaterialParams,
    pub texture: Option<TextureBinding>,
    pub logo: Option<LogoDecal>,
    pub name: Option<TextDecal>,
    pub number: Option<TextDecal>,
}

pub fn project(state: &DesignState) -> RenderParams {
    project_with(state, &PreviewSettings::default())
}

pub fn project_with(state: &DesignState, settings: &PreviewSettings) -> RenderParams {
    let key = TextureKey::for_state(state);
    let texture = key.secondary.is_some().then(|| TextureBinding {
        key,
        tile_size: settings.tile_size,
        repeat: [settings.texture_repeat; 2],
        wrap: WrapMode::Repeat,
    });
    // a tile already carries the base color, so the material stays untinted
    let material = MaterialParams {
        color: if texture.is_some() {
            KitColor::WHITE
        } else {
            state.base_color
        },
        roughness: MATERIAL_ROUGHNESS,
        metalness: MATERIAL_METALNESS,
    };

    let logo = state
        .logo
        .as_ref()
        .filter(|_| state.layers.kind_visible(LayerKind::Logo))
        .map(|source| LogoDecal {
            source: source.clone(),
            transform: DecalTransform::from_placement(state.placement(DecalSlot::Logo)),
            opacity: LOGO_OPACITY,
        });
    let name = state
        .name_text
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|t| TextDecal::new(t.to_uppercase(), state.placement(DecalSlot::Name)));
    let number = state
        .number_text
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|t| TextDecal::new(t.clone(), state.placement(DecalSlot::Number)));

    RenderParams {
        material,
        texture,
        logo,
        name,
        number,
    }
}

/// What a [`PreviewBinding::refresh`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewUpdate {
    /// The render parameters differ from the last refresh.
    pub redraw: bool,
    /// The pattern tile was regenerated or dropped.
    pub texture_changed: bool,
}

#[derive(Debug, Default)]
pub struct PreviewBinding {
    settings: PreviewSettings,
    params: Option<RenderParams>,
    tile: Option<(TextureKey, Canvas)>,
}

impl PreviewBinding {
    pub fn new(settings: PreviewSettings) -> Self {
        Self {
            settings,
            params: None,
            tile: None,
        }
    }

    pub fn params(&self) -> Option<&RenderParams> {
        self.params.as_ref()
    }

    pub fn tile(&self) -> Option<&Canvas> {
        self.tile.as_ref().map(|(_, canvas)| canvas)
    }

    pub fn refresh(&mut self, state: &DesignState) -> PreviewUpdate {
        let params = project_with(state, &self.settings);
        if self.params.as_ref() == Some(&params) {
            trace!("preview unchanged");
            return PreviewUpdate::default();
        }

        let wanted = params.texture.map(|t| t.key);
        let cached = self.tile.as_ref().map(|(key, _)| *key);
        let texture_changed = wanted != cached;
        if texture_changed {
            self.tile = wanted.map(|key| (key, key.generate(self.settings.tile_size)));
            debug!(pattern = ?wanted.map(|k| k.pattern), "preview tile updated");
        }

        self.params = Some(params);
        PreviewUpdate {
            redraw: true,
            texture_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_design::{LayerEntry, LayerId, LayerList, PatternStyle};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_back_decals_are_turned_around() {
        let front = DesignState {
            logo: Some(LogoRef::remote("https://cdn/crest.png", None)),
            logo_placement: Placement::new(0.0, 0.8, 0.6, 0.4),
            ..Default::default()
        };
        let back = DesignState {
            logo_placement: Placement::new(0.0, 0.8, -0.6, 0.4),
            ..front.clone()
        };
        let f = project(&front).logo.map(|l| l.transform);
        let b = project(&back).logo.map(|l| l.transform);
        assert_eq!(f.map(|t| t.rotation), Some([0.0, 0.0, 0.0]));
        assert_eq!(b.map(|t| t.rotation), Some([0.0, PI, 0.0]));
        assert_eq!(b.map(|t| t.side), Some(Side::Back));
        assert_eq!(f.map(|t| t.scale), b.map(|t| t.scale));
    }

    #[test]
    fn test_solid_has_no_texture() {
        let params = project(&DesignState::default());
        assert_eq!(params.texture, None);
        assert_eq!(params.material.color, KitColor::rgb(0x00, 0x55, 0xa4));
        assert_eq!(params.material.roughness, 0.7);
        assert!(params.logo.is_none() && params.name.is_none() && params.number.is_none());
    }

    #[test]
    fn test_pattern_binds_repeating_tile() {
        let state = DesignState {
            pattern: PatternStyle::Checker,
            ..Default::default()
        };
        let params = project(&state);
        let texture = params.texture.unwrap();
        assert_eq!(texture.repeat, [2, 2]);
        assert_eq!(texture.wrap, WrapMode::Repeat);
        assert_eq!(texture.key.pattern, PatternStyle::Checker);
        assert_eq!(params.material.color, KitColor::WHITE);
    }

    #[test]
    fn test_text_decals() {
        let state = DesignState {
            name_text: Some("Mbappé".into()),
            number_text: Some("10".into()),
            ..Default::default()
        };
        let params = project(&state);
        let name = params.name.unwrap();
        assert_eq!(name.text, "MBAPPÉ");
        assert_eq!(name.font_size, 0.15);
        assert!((name.outline_width - 0.0075).abs() < 1e-6);
        assert_eq!(name.transform.side, Side::Back);
        assert_eq!(params.number.map(|n| n.text).as_deref(), Some("10"));
    }

    #[test]
    fn test_hidden_logo_layer_hides_decal() {
        let mut layers = LayerList::new();
        layers.push(LayerEntry {
            id: LayerId(1),
            kind: LayerKind::Logo,
            visible: false,
            name: "Crest".into(),
        });
        let state = DesignState {
            logo: Some(LogoRef::local("crest.png")),
            layers,
            ..Default::default()
        };
        assert!(project(&state).logo.is_none());
    }

    #[test]
    fn test_binding_only_redraws_tile_when_inputs_change() {
        let mut binding = PreviewBinding::new(PreviewSettings {
            tile_size: 64,
            texture_repeat: 2,
        });
        let mut state = DesignState {
            pattern: PatternStyle::Dots,
            ..Default::default()
        };

        let first = binding.refresh(&state);
        assert!(first.redraw && first.texture_changed);
        assert_eq!(binding.tile().map(|t| t.width()), Some(64));
        assert_eq!(binding.refresh(&state), PreviewUpdate::default());

        state.number_text = Some("4".into());
        let moved = binding.refresh(&state);
        assert!(moved.redraw && !moved.texture_changed);

        state.pattern = PatternStyle::Solid;
        let solid = binding.refresh(&state);
        assert!(solid.texture_changed);
        assert!(binding.tile().is_none());
    }
}
