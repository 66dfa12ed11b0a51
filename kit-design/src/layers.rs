//! Layer list: which decorative elements exist and whether they are shown.
//!
//! A layer is only a registry entry. It does not own the image or text it
//! stands for; see [`crate::DesignEditStore::attach_logo`] for the operation
//! that keeps the logo and its layer in step.

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Logo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub id: LayerId,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub visible: bool,
    pub name: String,
}

/// Ordered layers; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerList(Vec<LayerEntry>);

impl LayerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LayerEntry) {
        self.0.push(entry);
    }

    /// Flip visibility. Returns the new value, or `None` if no such layer.
    pub fn toggle_visibility(&mut self, id: LayerId) -> Option<bool> {
        let entry = self.0.iter_mut().find(|l| l.id == id)?;
        entry.visible = !entry.visible;
        trace!(layer = id.0, visible = entry.visible, "toggled layer");
        Some(entry.visible)
    }

    pub fn remove(&mut self, id: LayerId) -> Option<LayerEntry> {
        let index = self.0.iter().position(|l| l.id == id)?;
        Some(self.0.remove(index))
    }

    /// Remove every layer of `kind`, returning how many went.
    pub fn remove_kind(&mut self, kind: LayerKind) -> usize {
        let before = self.0.len();
        self.0.retain(|l| l.kind != kind);
        before - self.0.len()
    }

    pub fn get(&self, id: LayerId) -> Option<&LayerEntry> {
        self.0.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayerEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_id(&self) -> Option<LayerId> {
        self.0.iter().map(|l| l.id).max()
    }

    /// True when no layer of `kind` is hidden (vacuously true with none).
    pub fn kind_visible(&self, kind: LayerKind) -> bool {
        self.0.iter().filter(|l| l.kind == kind).all(|l| l.visible)
    }
}

impl FromIterator<LayerEntry> for LayerList {
    fn from_iter<I: IntoIterator<Item = LayerEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LayerList {
    type Item = &'a LayerEntry;
    type IntoIter = std::slice::Iter<'a, LayerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Hands out layer ids that are never reused within a session, even when
/// undo brings back an older layer list.
#[derive(Debug, Clone)]
pub struct LayerIdAllocator {
    next: u64,
}

impl LayerIdAllocator {
    pub fn starting_after(layers: &LayerList) -> Self {
        let mut allocator = Self { next: 1 };
        allocator.observe(layers);
        allocator
    }

    /// Make sure future ids are above everything in `layers`.
    pub fn observe(&mut self, layers: &LayerList) {
        if let Some(max) = layers.max_id() {
            self.next = self.next.max(max.0.saturating_add(1));
        }
    }

    pub fn next_id(&mut self) -> LayerId {
        let id = LayerId(self.next);
        self.next += 1;
        id
    }
}
