// Sparse updates to a DesignState. Unset fields are left alone; placements
// and the layer list are replaced wholesale when set.

use kit_core::{KitColor, Placement};
use tracing::debug;

use crate::limits::{sanitize_name, sanitize_number};
use crate::{DecalSlot, DesignState, LayerList, LogoRef, PatternStyle};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignPatch {
    pub base_color: Option<KitColor>,
    pub secondary_color: Option<KitColor>,
    pub pattern: Option<PatternStyle>,
    pub logo: Option<Option<LogoRef>>,
    pub logo_placement: Option<Placement>,
    pub name_text: Option<Option<String>>,
    pub name_placement: Option<Placement>,
    pub number_text: Option<Option<String>>,
    pub number_placement: Option<Placement>,
    pub layers: Option<LayerList>,
}

/// Which parts of the state an applied patch actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub colors: bool,
    pub pattern: bool,
    pub text: bool,
    pub logo: bool,
    pub placement: bool,
    pub layers: bool,
}

impl ChangeSet {
    pub fn any(&self) -> bool {
        self.colors || self.pattern || self.text || self.logo || self.placement || self.layers
    }

    /// Color, pattern and text edits are the ones worth an undo step.
    pub fn tracked(&self) -> bool {
        self.colors || self.pattern || self.text
    }

    /// The pattern tile has to be redrawn.
    pub fn texture(&self) -> bool {
        self.colors || self.pattern
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn replace<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

impl DesignPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_color(mut self, color: KitColor) -> Self {
        self.base_color = Some(color);
        self
    }

    pub fn secondary_color(mut self, color: KitColor) -> Self {
        self.secondary_color = Some(color);
        self
    }

    pub fn pattern(mut self, pattern: PatternStyle) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn logo(mut self, logo: Option<LogoRef>) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Trimmed and capped at 15 characters. Empty text clears the name.
    pub fn name_text(mut self, text: impl Into<String>) -> Self {
        self.name_text = Some(non_empty(Some(sanitize_name(&text.into()))));
        self
    }

    /// Digits only, at most two. Empty text clears the number.
    pub fn number_text(mut self, text: impl Into<String>) -> Self {
        self.number_text = Some(non_empty(Some(sanitize_number(&text.into()))));
        self
    }

    pub fn placement(mut self, slot: DecalSlot, placement: Placement) -> Self {
        match slot {
            DecalSlot::Logo => self.logo_placement = Some(placement),
            DecalSlot::Name => self.name_placement = Some(placement),
            DecalSlot::Number => self.number_placement = Some(placement),
        }
        self
    }

    pub fn layers(mut self, layers: LayerList) -> Self {
        self.layers = Some(layers);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == DesignPatch::default()
    }

    /// Merge into `state` and report what changed.
    ///
    /// A secondary color is dropped when the resulting pattern only paints
    /// one color.
    pub fn apply_to(self, state: &mut DesignState) -> ChangeSet {
        let mut changes = ChangeSet::default();

        changes.pattern = replace(&mut state.pattern, self.pattern);

        let mut colors = replace(&mut state.base_color, self.base_color);
        if let Some(secondary) = self.secondary_color {
            if state.pattern.color_count() == 2 {
                colors |= replace(&mut state.secondary_color, Some(secondary));
            } else {
                debug!(
                    pattern = state.pattern.id(),
                    "ignoring secondary color for single-color pattern"
                );
            }
        }
        changes.colors = colors;

        changes.logo = replace(&mut state.logo, self.logo);

        let name = replace(&mut state.name_text, self.name_text.map(non_empty));
        let number = replace(&mut state.number_text, self.number_text.map(non_empty));
        changes.text = name || number;

        let logo_moved = replace(&mut state.logo_placement, self.logo_placement);
        let name_moved = replace(&mut state.name_placement, self.name_placement);
        let number_moved = replace(&mut state.number_placement, self.number_placement);
        changes.placement = logo_moved || name_moved || number_moved;

        changes.layers = replace(&mut state.layers, self.layers);

        changes
    }
}
