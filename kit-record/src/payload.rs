// JSON shapes exchanged with the design record API.
//
// Outgoing payloads are strict serde structs. Incoming records are read
// field by field from a serde_json::Value so that one bad field never sinks
// the whole load.

use kit_core::{KitColor, Placement};
use kit_design::{DecalSlot, DesignState, KitSize, LayerList, PatternStyle, TextureType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPayload {
    #[serde(rename = "model3D", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    pub name: String,
    pub color: KitColor,
    pub text: String,
    pub texture_type: TextureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoAsset>,
    pub settings: PayloadSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoAsset {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadSettings {
    pub size: KitSize,
    pub font_size: u32,
    pub text_color: String,
    pub number: String,
    pub layers: LayerList,
    pub pattern_style: PatternStyle,
    pub secondary_color: KitColor,
    pub placements: PayloadPlacements,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadPlacements {
    pub logo: Placement,
    pub name: Placement,
    pub number: Placement,
}

impl PayloadPlacements {
    pub fn of(state: &DesignState) -> Self {
        Self {
            logo: state.placement(DecalSlot::Logo),
            name: state.placement(DecalSlot::Name),
            number: state.placement(DecalSlot::Number),
        }
    }
}

/// What the asset upload API hands back for a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("design record must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    #[error("design record is not valid JSON")]
    Json(#[from] serde_json::Error),
}

/// A design as returned by the record API.
///
/// Every field is optional. The API may wrap the record in `{"design": ..}`
/// and names the id `_id`; both are handled by [`DesignRecord::from_value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignRecord {
    pub id: Option<String>,
    pub model_id: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub text: Option<String>,
    pub texture_type: Option<String>,
    pub logo: Option<LogoAsset>,
    pub settings: Map<String, Value>,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

impl DesignRecord {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(RecordError::NotAnObject {
                    found: kind_of(&other),
                })
            }
        };
        if let Some(Value::Object(inner)) = object.remove("design") {
            object = inner;
        }

        let logo = object.get("logo").and_then(Value::as_object).and_then(|logo| {
            Some(LogoAsset {
                url: string_field(logo, "url").filter(|u| !u.is_empty())?,
                public_id: string_field(logo, "public_id"),
            })
        });
        // model3D comes back populated as an object on some endpoints
        let model_id = match object.get("model3D") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Object(model)) => string_field(model, "_id"),
            _ => None,
        };
        let settings = match object.remove("settings") {
            Some(Value::Object(settings)) => settings,
            _ => Map::new(),
        };

        Ok(Self {
            id: string_field(&object, "_id").or_else(|| string_field(&object, "id")),
            model_id,
            name: string_field(&object, "name"),
            color: string_field(&object, "color"),
            text: string_field(&object, "text"),
            texture_type: string_field(&object, "textureType"),
            logo,
            settings,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// The record the API would store for `payload` under `id`.
    pub fn from_payload(id: Option<String>, payload: &DesignPayload) -> Result<Self, RecordError> {
        let mut record = Self::from_value(serde_json::to_value(payload)?)?;
        record.id = id;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_names() {
        let state = DesignState::default();
        let payload = DesignPayload {
            model_id: Some("m1".into()),
            name: "Design".into(),
            color: state.base_color,
            text: String::new(),
            texture_type: TextureType::None,
            logo: None,
            settings: PayloadSettings {
                size: KitSize::L,
                font_size: DEFAULT_FONT_SIZE,
                text_color: DEFAULT_TEXT_COLOR.into(),
                number: "9".into(),
                layers: LayerList::new(),
                pattern_style: PatternStyle::Solid,
                secondary_color: state.secondary_color,
                placements: PayloadPlacements::of(&state),
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["model3D"], "m1");
        assert_eq!(value["color"], "#0055a4");
        assert_eq!(value["textureType"], "none");
        assert_eq!(value["settings"]["fontSize"], 24);
        assert_eq!(value["settings"]["textColor"], "#FFFFFF");
        assert_eq!(value["settings"]["size"], "L");
        assert_eq!(value["settings"]["patternStyle"], "solid");
        assert!(value.get("logo").is_none());
    }

    #[test]
    fn test_record_unwraps_api_envelope() {
        let record = DesignRecord::from_value(json!({
            "success": true,
            "design": {
                "_id": "abc",
                "model3D": {"_id": "m9", "name": "Classic"},
                "name": "Les Bleus",
                "color": "#002395",
                "logo": {"url": "https://cdn/x.png", "public_id": "kit/x"},
                "settings": {"fontSize": 24}
            }
        }))
        .unwrap();
        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(record.model_id.as_deref(), Some("m9"));
        assert_eq!(record.logo.and_then(|l| l.public_id).as_deref(), Some("kit/x"));
        assert_eq!(record.settings.len(), 1);
    }

    #[test]
    fn test_record_tolerates_wrong_types() {
        let record = DesignRecord::from_value(json!({
            "id": "x",
            "name": 5,
            "logo": {"url": ""},
            "settings": "nope"
        }))
        .unwrap();
        assert_eq!(record.id.as_deref(), Some("x"));
        assert_eq!(record.name, None);
        assert_eq!(record.logo, None);
        assert!(record.settings.is_empty());

        assert!(matches!(
            DesignRecord::from_value(json!([1, 2])),
            Err(RecordError::NotAnObject { found: "an array" })
        ));
        assert!(DesignRecord::from_json("{not json").is_err());
    }
}
