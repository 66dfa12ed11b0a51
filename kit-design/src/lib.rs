//! kit-design: the editable state of one football kit design.
//!
//! Design rules:
//! - One live [`DesignState`] per editing session, owned by a [`DesignEditStore`].
//! - Patterns are a closed enum; unknown ids degrade to solid instead of failing.
//! - History holds full snapshots, never diffs, so undo is a plain swap.
//! - All structs are serializable for session save/load.

use kit_core::{KitColor, Placement};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Schema version written into session files.
pub const DESIGN_SCHEMA_VERSION: &str = "1.0";

/// Base color of a fresh design.
pub const DEFAULT_BASE_COLOR: KitColor = KitColor::rgb(0x00, 0x55, 0xa4);

/// Secondary color of a fresh design.
pub const DEFAULT_SECONDARY_COLOR: KitColor = KitColor::WHITE;

/// Visual treatment of the garment surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternStyle {
    #[default]
    Solid,
    HorizontalStripes,
    VerticalStripes,
    DiagonalStripes,
    Gradient,
    HalfSplit,
    Dots,
    Checker,
}

impl PatternStyle {
    pub const ALL: [PatternStyle; 8] = [
        PatternStyle::Solid,
        PatternStyle::HorizontalStripes,
        PatternStyle::VerticalStripes,
        PatternStyle::DiagonalStripes,
        PatternStyle::Gradient,
        PatternStyle::HalfSplit,
        PatternStyle::Dots,
        PatternStyle::Checker,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PatternStyle::Solid => "solid",
            PatternStyle::HorizontalStripes => "horizontal-stripes",
            PatternStyle::VerticalStripes => "vertical-stripes",
            PatternStyle::DiagonalStripes => "diagonal-stripes",
            PatternStyle::Gradient => "gradient",
            PatternStyle::HalfSplit => "half-split",
            PatternStyle::Dots => "dots",
            PatternStyle::Checker => "checker",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PatternStyle::Solid => "Solid",
            PatternStyle::HorizontalStripes => "Horizontal Stripes",
            PatternStyle::VerticalStripes => "Vertical Stripes",
            PatternStyle::DiagonalStripes => "Diagonal Stripes",
            PatternStyle::Gradient => "Gradient",
            PatternStyle::HalfSplit => "Half Split",
            PatternStyle::Dots => "Dots Pattern",
            PatternStyle::Checker => "Checker",
        }
    }

    /// How many colors the pattern paints with. The secondary color is only
    /// editable when this is 2.
    pub fn color_count(&self) -> u8 {
        match self {
            PatternStyle::Solid => 1,
            _ => 2,
        }
    }

    /// Coarse category stored on design records.
    pub fn texture_type(&self) -> TextureType {
        match self {
            PatternStyle::Solid => TextureType::None,
            PatternStyle::HorizontalStripes
            | PatternStyle::VerticalStripes
            | PatternStyle::DiagonalStripes => TextureType::Stripes,
            PatternStyle::Gradient => TextureType::Gradient,
            PatternStyle::HalfSplit => TextureType::Pattern,
            PatternStyle::Dots => TextureType::Dots,
            PatternStyle::Checker => TextureType::Checker,
        }
    }

    /// Resolve a pattern id. Record-level categories (`stripes`, `none`, ...)
    /// are accepted too and map to their representative pattern.
    pub fn from_id(id: &str) -> Option<PatternStyle> {
        let id = id.trim();
        if let Some(style) = PatternStyle::ALL.iter().find(|p| p.id() == id) {
            return Some(*style);
        }
        TextureType::from_id(id).map(|t| t.default_pattern())
    }

    /// Like [`PatternStyle::from_id`], but unknown ids fall back to solid.
    pub fn from_id_or_solid(id: &str) -> PatternStyle {
        PatternStyle::from_id(id).unwrap_or_else(|| {
            warn!(pattern_id = %id, "unknown pattern id, falling back to solid");
            PatternStyle::Solid
        })
    }
}

/// Texture category as stored by the design record API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    #[default]
    None,
    Stripes,
    Gradient,
    Dots,
    Checker,
    Lines,
    Pattern,
}

impl TextureType {
    pub fn id(&self) -> &'static str {
        match self {
            TextureType::None => "none",
            TextureType::Stripes => "stripes",
            TextureType::Gradient => "gradient",
            TextureType::Dots => "dots",
            TextureType::Checker => "checker",
            TextureType::Lines => "lines",
            TextureType::Pattern => "pattern",
        }
    }

    pub fn from_id(id: &str) -> Option<TextureType> {
        match id.trim() {
            "none" => Some(TextureType::None),
            "stripes" => Some(TextureType::Stripes),
            "gradient" => Some(TextureType::Gradient),
            "dots" => Some(TextureType::Dots),
            "checker" => Some(TextureType::Checker),
            "lines" => Some(TextureType::Lines),
            // older front ends wrote "split" for the half-split pattern
            "pattern" | "split" => Some(TextureType::Pattern),
            _ => None,
        }
    }

    /// The concrete pattern a bare category stands for.
    pub fn default_pattern(&self) -> PatternStyle {
        match self {
            TextureType::None => PatternStyle::Solid,
            TextureType::Stripes => PatternStyle::VerticalStripes,
            TextureType::Gradient => PatternStyle::Gradient,
            TextureType::Dots => PatternStyle::Dots,
            TextureType::Checker => PatternStyle::Checker,
            TextureType::Lines => PatternStyle::HorizontalStripes,
            TextureType::Pattern => PatternStyle::HalfSplit,
        }
    }
}

/// Where the logo image comes from. Local files only live on this machine
/// until the asset upload replaces them with a remote reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogoRef {
    Local {
        path: String,
    },
    Remote {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        public_id: Option<String>,
    },
}

impl LogoRef {
    pub fn local(path: impl Into<String>) -> Self {
        LogoRef::Local { path: path.into() }
    }

    pub fn remote(url: impl Into<String>, public_id: Option<String>) -> Self {
        LogoRef::Remote {
            url: url.into(),
            public_id,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, LogoRef::Local { .. })
    }

    /// Path or URL, whichever this reference holds.
    pub fn location(&self) -> &str {
        match self {
            LogoRef::Local { path } => path,
            LogoRef::Remote { url, .. } => url,
        }
    }
}

/// The three positioned decorations on a kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecalSlot {
    Logo,
    Name,
    Number,
}

impl DecalSlot {
    pub const ALL: [DecalSlot; 3] = [DecalSlot::Logo, DecalSlot::Name, DecalSlot::Number];

    /// Logo on the chest, name and number on the back.
    pub fn default_placement(&self) -> Placement {
        match self {
            DecalSlot::Logo => Placement::new(0.0, 0.8, 0.6, 0.4),
            DecalSlot::Name => Placement::new(0.0, -0.3, -0.6, 0.15),
            DecalSlot::Number => Placement::new(0.0, 0.3, -0.6, 0.4),
        }
    }
}

/// The live design being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignState {
    pub base_color: KitColor,
    pub secondary_color: KitColor,
    pub pattern: PatternStyle,

    pub logo: Option<LogoRef>,
    pub logo_placement: Placement,

    pub name_text: Option<String>,
    pub name_placement: Placement,

    pub number_text: Option<String>,
    pub number_placement: Placement,

    /// Display order is insertion order.
    pub layers: LayerList,
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            base_color: DEFAULT_BASE_COLOR,
            secondary_color: DEFAULT_SECONDARY_COLOR,
            pattern: PatternStyle::Solid,
            logo: None,
            logo_placement: DecalSlot::Logo.default_placement(),
            name_text: None,
            name_placement: DecalSlot::Name.default_placement(),
            number_text: None,
            number_placement: DecalSlot::Number.default_placement(),
            layers: LayerList::new(),
        }
    }
}

impl DesignState {
    pub fn placement(&self, slot: DecalSlot) -> Placement {
        match slot {
            DecalSlot::Logo => self.logo_placement,
            DecalSlot::Name => self.name_placement,
            DecalSlot::Number => self.number_placement,
        }
    }

    /// The secondary color, if the active pattern uses one.
    pub fn active_secondary(&self) -> Option<KitColor> {
        (self.pattern.color_count() == 2).then_some(self.secondary_color)
    }

    pub fn texture_type(&self) -> TextureType {
        self.pattern.texture_type()
    }
}

pub mod config;
pub mod history;
pub mod layers;
pub mod limits;
pub mod patch;
pub mod session;
pub mod sizing;
pub mod store;
pub mod templates;

pub use config::{validate_tile_size, ConfigError, EditorConfig, HistoryPolicy};
pub use history::{HistoryPosition, HistoryStack, DEFAULT_HISTORY_CAPACITY};
pub use layers::{LayerEntry, LayerId, LayerIdAllocator, LayerKind, LayerList};
pub use patch::{ChangeSet, DesignPatch};
pub use session::{load_session, save_session, DesignSession, SESSION_FILE_EXT};
pub use sizing::{KitSize, Measurements, UnknownSize};
pub use store::{DesignEditStore, MIN_HISTORY_CAPACITY};
pub use templates::{KitTemplate, TemplateError, TEMPLATES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_ids_round_trip() {
        for style in PatternStyle::ALL {
            assert_eq!(PatternStyle::from_id(style.id()), Some(style));
        }
    }

    #[test]
    fn test_pattern_color_counts() {
        assert_eq!(PatternStyle::Solid.color_count(), 1);
        for style in PatternStyle::ALL.iter().skip(1) {
            assert_eq!(style.color_count(), 2, "{style:?}");
        }
    }

    #[test]
    fn test_legacy_categories_map_to_patterns() {
        assert_eq!(PatternStyle::from_id("stripes"), Some(PatternStyle::VerticalStripes));
        assert_eq!(PatternStyle::from_id("none"), Some(PatternStyle::Solid));
        assert_eq!(PatternStyle::from_id("split"), Some(PatternStyle::HalfSplit));
        assert_eq!(PatternStyle::from_id("zigzag"), None);
        assert_eq!(PatternStyle::from_id_or_solid("zigzag"), PatternStyle::Solid);
    }

    #[test]
    fn test_pattern_serializes_kebab_case() {
        let json = serde_json::to_string(&PatternStyle::DiagonalStripes).unwrap();
        assert_eq!(json, "\"diagonal-stripes\"");
    }

    #[test]
    fn test_default_state_has_all_placements() {
        let state = DesignState::default();
        assert_eq!(state.base_color.to_hex(), "#0055a4");
        assert_eq!(state.pattern, PatternStyle::Solid);
        assert_eq!(state.active_secondary(), None);
        for slot in DecalSlot::ALL {
            assert_eq!(state.placement(slot), slot.default_placement());
        }
    }

    #[test]
    fn test_missing_state_fields_use_defaults() {
        let state: DesignState = serde_json::from_str(r##"{"base_color":"#ef4135"}"##).unwrap();
        assert_eq!(state.base_color.to_hex(), "#ef4135");
        assert_eq!(state.secondary_color, DEFAULT_SECONDARY_COLOR);
        assert_eq!(state.name_placement, DecalSlot::Name.default_placement());
    }
}
