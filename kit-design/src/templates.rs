//! Built-in kit templates, grouped by league.

use kit_core::KitColor;
use thiserror::Error;

use crate::{PatternStyle, TextureType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KitTemplate {
    pub id: u32,
    pub league: &'static str,
    pub name: &'static str,
    pub base_color: KitColor,
    pub texture: TextureType,
}

impl KitTemplate {
    pub fn pattern(&self) -> PatternStyle {
        self.texture.default_pattern()
    }

    pub fn find(id: u32) -> Option<&'static KitTemplate> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    /// Case-insensitive lookup by template name.
    pub fn lookup(name: &str) -> Result<&'static KitTemplate, TemplateError> {
        TEMPLATES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| TemplateError::Unknown {
                name: name.to_string(),
            })
    }

    pub fn by_league(league: &str) -> impl Iterator<Item = &'static KitTemplate> + '_ {
        TEMPLATES.iter().filter(move |t| t.league == league)
    }

    /// League names in display order.
    pub fn leagues() -> Vec<&'static str> {
        let mut leagues: Vec<&'static str> = Vec::new();
        for t in TEMPLATES {
            if !leagues.contains(&t.league) {
                leagues.push(t.league);
            }
        }
        leagues
    }
}

const fn template(
    id: u32,
    league: &'static str,
    name: &'static str,
    base_color: KitColor,
    texture: TextureType,
) -> KitTemplate {
    KitTemplate {
        id,
        league,
        name,
        base_color,
        texture,
    }
}

pub const TEMPLATES: &[KitTemplate] = &[
    template(1, "Premier League", "Classic Stripes", KitColor::rgb(0x00, 0x55, 0xa4), TextureType::Stripes),
    template(2, "Premier League", "Red Devils", KitColor::rgb(0xef, 0x41, 0x35), TextureType::Gradient),
    template(3, "Premier League", "Sky Blues", KitColor::rgb(0x6c, 0xab, 0xdd), TextureType::None),
    template(4, "La Liga", "Blaugrana", KitColor::rgb(0xa5, 0x00, 0x44), TextureType::Stripes),
    template(5, "La Liga", "Royal White", KitColor::rgb(0xff, 0xff, 0xff), TextureType::None),
    template(6, "La Liga", "Rojiblancos", KitColor::rgb(0xcb, 0x35, 0x24), TextureType::Stripes),
    template(7, "Serie A", "Nerazzurri", KitColor::rgb(0x00, 0x68, 0xa8), TextureType::Stripes),
    template(8, "Serie A", "Rossoneri", KitColor::rgb(0xfb, 0x09, 0x0b), TextureType::Stripes),
    template(9, "Serie A", "Bianconeri", KitColor::rgb(0x00, 0x00, 0x00), TextureType::Stripes),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown template: {name:?}")]
    Unknown { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_leagues_of_three() {
        let leagues = KitTemplate::leagues();
        assert_eq!(leagues, ["Premier League", "La Liga", "Serie A"]);
        for league in leagues {
            assert_eq!(KitTemplate::by_league(league).count(), 3);
        }
    }

    #[test]
    fn test_lookup() {
        let t = KitTemplate::lookup("blaugrana").unwrap();
        assert_eq!(t.id, 4);
        assert_eq!(t.pattern(), PatternStyle::VerticalStripes);
        assert_eq!(KitTemplate::find(3).map(|t| t.pattern()), Some(PatternStyle::Solid));
        assert!(matches!(
            KitTemplate::lookup("Galacticos"),
            Err(TemplateError::Unknown { .. })
        ));
    }
}
