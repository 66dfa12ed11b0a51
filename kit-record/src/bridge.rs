//! DesignState to and from the record API's shapes.
//!
//! Saving is exact. Loading is forgiving: each field that is missing or
//! malformed falls back to its fresh-design default on its own, and a
//! warning is logged for it.

use kit_core::{KitColor, Placement};
use kit_design::{
    DecalSlot, DesignSession, DesignState, KitSize, LayerEntry, LayerList, LogoRef, PatternStyle,
    TextureType,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::payload::{
    DesignPayload, DesignRecord, LogoAsset, PayloadPlacements, PayloadSettings,
    DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR,
};

/// Everything a payload needs that is not part of the design itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveContext {
    pub model_id: Option<String>,
    pub size: KitSize,
    /// Used as the design name when no player name is set.
    pub fallback_name: String,
}

impl SaveContext {
    pub fn for_session(session: &DesignSession) -> Self {
        Self {
            model_id: session.model_id.clone(),
            size: session.size,
            fallback_name: session.fallback_name(),
        }
    }
}

impl Default for SaveContext {
    fn default() -> Self {
        Self {
            model_id: None,
            size: KitSize::default(),
            fallback_name: "Design".to_string(),
        }
    }
}

pub fn to_payload(state: &DesignState, ctx: &SaveContext) -> DesignPayload {
    // local files mean nothing to the API until they are uploaded
    let logo = match &state.logo {
        Some(LogoRef::Remote { url, public_id }) => Some(LogoAsset {
            url: url.clone(),
            public_id: public_id.clone(),
        }),
        Some(LogoRef::Local { path }) => {
            debug!(path = %path, "leaving un-uploaded logo out of payload");
            None
        }
        None => None,
    };
    let text = state.name_text.clone().unwrap_or_default();

    DesignPayload {
        model_id: ctx.model_id.clone(),
        name: if text.is_empty() {
            ctx.fallback_name.clone()
        } else {
            text.clone()
        },
        color: state.base_color,
        text,
        texture_type: state.texture_type(),
        logo,
        settings: PayloadSettings {
            size: ctx.size,
            font_size: DEFAULT_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            number: state.number_text.clone().unwrap_or_default(),
            layers: state.layers.clone(),
            pattern_style: state.pattern,
            secondary_color: state.secondary_color,
            placements: PayloadPlacements::of(state),
        },
    }
}

/// A record turned back into editor terms.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDesign {
    pub record_id: Option<String>,
    pub model_id: Option<String>,
    pub size: KitSize,
    pub state: DesignState,
}

fn color_or(raw: Option<&str>, field: &'static str, fallback: KitColor) -> KitColor {
    match raw.map(KitColor::parse) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            warn!(field, error = %err, "bad color in record, using default");
            fallback
        }
        None => fallback,
    }
}

fn pattern_of(record: &DesignRecord) -> PatternStyle {
    if let Some(id) = record.settings.get("patternStyle").and_then(Value::as_str) {
        if let Some(style) = PatternStyle::from_id(id) {
            return style;
        }
        warn!(pattern_id = %id, "unknown patternStyle in record");
    }
    match record.texture_type.as_deref() {
        Some(id) => TextureType::from_id(id)
            .map(|t| t.default_pattern())
            .unwrap_or_else(|| PatternStyle::from_id_or_solid(id)),
        None => PatternStyle::Solid,
    }
}

fn placement_of(placements: Option<&Map<String, Value>>, slot: DecalSlot) -> Placement {
    let key = match slot {
        DecalSlot::Logo => "logo",
        DecalSlot::Name => "name",
        DecalSlot::Number => "number",
    };
    let Some(raw) = placements.and_then(|p| p.get(key)) else {
        return slot.default_placement();
    };
    serde_json::from_value(raw.clone()).unwrap_or_else(|err| {
        warn!(?slot, error = %err, "bad placement in record, using default");
        slot.default_placement()
    })
}

fn layers_of(raw: Option<&Value>) -> LayerList {
    let Some(items) = raw.and_then(Value::as_array) else {
        return LayerList::new();
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<LayerEntry>(item.clone()) {
            Ok(entry) if !seen.insert(entry.id) => {
                warn!(layer = entry.id.0, "skipping duplicate layer id");
                None
            }
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping malformed layer entry");
                None
            }
        })
        .collect()
}

fn number_of(raw: Option<&Value>) -> Option<String> {
    match raw {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub fn state_from_record(record: &DesignRecord) -> LoadedDesign {
    let defaults = DesignState::default();
    let settings = &record.settings;
    let placements = settings.get("placements").and_then(Value::as_object);

    let state = DesignState {
        base_color: color_or(record.color.as_deref(), "color", defaults.base_color),
        secondary_color: color_or(
            settings.get("secondaryColor").and_then(Value::as_str),
            "secondaryColor",
            defaults.secondary_color,
        ),
        pattern: pattern_of(record),
        logo: record
            .logo
            .as_ref()
            .map(|logo| LogoRef::remote(logo.url.clone(), logo.public_id.clone())),
        logo_placement: placement_of(placements, DecalSlot::Logo),
        name_text: record.text.clone().filter(|t| !t.is_empty()),
        name_placement: placement_of(placements, DecalSlot::Name),
        number_text: number_of(settings.get("number")),
        number_placement: placement_of(placements, DecalSlot::Number),
        layers: layers_of(settings.get("layers")),
    };

    let size = match settings.get("size").and_then(Value::as_str) {
        Some(label) => label.parse::<KitSize>().unwrap_or_else(|err| {
            warn!(error = %err, "bad size in record, using default");
            KitSize::default()
        }),
        None => KitSize::default(),
    };

    debug!(record_id = ?record.id, pattern = state.pattern.id(), "decoded design record");
    LoadedDesign {
        record_id: record.id.clone(),
        model_id: record.model_id.clone(),
        size,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_design::{LayerId, LayerKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn edited_state() -> DesignState {
        let mut layers = LayerList::new();
        layers.push(LayerEntry {
            id: LayerId(1_700_000_000_000),
            kind: LayerKind::Logo,
            visible: false,
            name: "Crest".into(),
        });
        DesignState {
            base_color: KitColor::rgb(0xa5, 0x00, 0x44),
            secondary_color: KitColor::rgb(0x00, 0x4d, 0x98),
            pattern: PatternStyle::DiagonalStripes,
            logo: Some(LogoRef::remote("https://cdn/crest.png", Some("kit/crest".into()))),
            logo_placement: Placement::new(0.2, 0.7, 0.6, 0.3),
            name_text: Some("PEDRI".into()),
            number_text: Some("8".into()),
            number_placement: Placement::new(0.0, 0.4, -0.6, 0.5),
            layers,
            ..Default::default()
        }
    }

    #[test]
    fn test_save_then_load_restores_state() {
        let state = edited_state();
        let ctx = SaveContext {
            model_id: Some("m1".into()),
            size: KitSize::Xl,
            fallback_name: "Design 1".into(),
        };
        let payload = to_payload(&state, &ctx);
        assert_eq!(payload.name, "PEDRI");
        assert_eq!(payload.texture_type, TextureType::Stripes);

        let record = DesignRecord::from_payload(Some("r1".into()), &payload).unwrap();
        let loaded = state_from_record(&record);
        assert_eq!(loaded.state, state);
        assert_eq!(loaded.size, KitSize::Xl);
        assert_eq!(loaded.model_id.as_deref(), Some("m1"));
        assert_eq!(loaded.record_id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_local_logo_not_sent_and_name_falls_back() {
        let state = DesignState {
            logo: Some(LogoRef::local("/tmp/crest.png")),
            ..Default::default()
        };
        let payload = to_payload(&state, &SaveContext::default());
        assert_eq!(payload.logo, None);
        assert_eq!(payload.name, "Design");
        assert_eq!(payload.text, "");
    }

    #[test]
    fn test_legacy_record_uses_category_and_defaults() {
        let record = DesignRecord::from_value(json!({
            "_id": "old",
            "color": "#FFF",
            "textureType": "stripes",
            "settings": {"number": 10, "size": "huge"}
        }))
        .unwrap();
        let loaded = state_from_record(&record);
        assert_eq!(loaded.state.base_color, KitColor::WHITE);
        assert_eq!(loaded.state.pattern, PatternStyle::VerticalStripes);
        assert_eq!(loaded.state.number_text.as_deref(), Some("10"));
        assert_eq!(loaded.state.logo_placement, DecalSlot::Logo.default_placement());
        assert_eq!(loaded.size, KitSize::M);
    }

    #[test]
    fn test_malformed_fields_fall_back_one_by_one() {
        let record = DesignRecord::from_value(json!({
            "color": "blue",
            "text": "",
            "textureType": "plaid",
            "settings": {
                "secondaryColor": "#00ff00",
                "placements": {"logo": "center", "number": {"position": {"x": 0.1, "y": 0.2, "z": -0.6}, "scale": 0.5}},
                "layers": [
                    {"id": 1, "type": "logo", "visible": true, "name": "ok"},
                    {"id": "x", "type": "sticker"}
                ]
            }
        }))
        .unwrap();
        let loaded = state_from_record(&record);
        let defaults = DesignState::default();
        assert_eq!(loaded.state.base_color, defaults.base_color);
        assert_eq!(loaded.state.secondary_color, KitColor::rgb(0, 0xff, 0));
        assert_eq!(loaded.state.pattern, PatternStyle::Solid);
        assert_eq!(loaded.state.name_text, None);
        assert_eq!(loaded.state.logo_placement, defaults.logo_placement);
        assert_eq!(loaded.state.number_placement, Placement::new(0.1, 0.2, -0.6, 0.5));
        assert_eq!(loaded.state.layers.len(), 1);
    }

    #[test]
    fn test_duplicate_layer_ids_keep_first() {
        let record = DesignRecord::from_value(json!({
            "settings": {
                "layers": [
                    {"id": 7, "type": "logo", "visible": true, "name": "first"},
                    {"id": 7, "type": "logo", "visible": false, "name": "second"},
                    {"id": 8, "type": "logo", "visible": true, "name": "third"}
                ]
            }
        }))
        .unwrap();
        let layers = state_from_record(&record).state.layers;
        let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["first", "third"]);
        assert_eq!(layers.get(LayerId(7)).map(|l| l.visible), Some(true));
    }
}
