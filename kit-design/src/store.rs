//! The design edit store: one live [`DesignState`] plus its undo history.
//!
//! The history is seeded with the state the session started from, so undoing
//! every recorded edit lands back on that starting state. Stores are plain
//! owned values; every editing session gets its own.

use kit_core::Placement;
use tracing::{debug, info, trace};

use crate::limits::clamp_placement;
use crate::{
    ChangeSet, DecalSlot, DesignPatch, DesignState, EditorConfig, HistoryPolicy, HistoryStack,
    KitTemplate, LayerEntry, LayerId, LayerIdAllocator, LayerKind, LogoRef,
};

/// Smallest history that still allows one undo back to the starting state.
pub const MIN_HISTORY_CAPACITY: usize = 2;

#[derive(Debug, Clone)]
pub struct DesignEditStore {
    state: DesignState,
    history: HistoryStack<DesignState>,
    layer_ids: LayerIdAllocator,
    policy: HistoryPolicy,
    /// Bumped on every change to the live state, including undo/redo.
    revision: u64,
}

impl DesignEditStore {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_state(DesignState::default(), config)
    }

    pub fn with_state(initial: DesignState, config: &EditorConfig) -> Self {
        // the seeded root needs a slot of its own
        let capacity = config.history_capacity.max(MIN_HISTORY_CAPACITY);
        let mut history = HistoryStack::with_capacity(capacity);
        history.push(initial.clone());
        Self {
            layer_ids: LayerIdAllocator::starting_after(&initial.layers),
            state: initial,
            history,
            policy: config.history_policy,
            revision: 0,
        }
    }

    pub fn state(&self) -> &DesignState {
        &self.state
    }

    /// Deep copy of the live state, e.g. for a save request.
    pub fn snapshot(&self) -> DesignState {
        self.state.clone()
    }

    pub fn history(&self) -> &HistoryStack<DesignState> {
        &self.history
    }

    /// Number of recorded edits on top of the starting state.
    pub fn history_len(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merge `patch` into the live state and return it.
    pub fn update(&mut self, patch: DesignPatch) -> &DesignState {
        self.apply(patch);
        &self.state
    }

    /// Like [`DesignEditStore::update`], but reports what changed.
    pub fn apply(&mut self, patch: DesignPatch) -> ChangeSet {
        let changes = patch.apply_to(&mut self.state);
        if !changes.any() {
            trace!("update changed nothing");
            return changes;
        }
        self.revision += 1;

        let record = match self.policy {
            HistoryPolicy::TrackedFields => changes.tracked(),
            HistoryPolicy::EveryChange => true,
        };
        if record {
            self.history.push(self.state.clone());
            debug!(
                history_len = self.history_len(),
                revision = self.revision,
                ?changes,
                "recorded design edit"
            );
        }
        changes
    }

    pub fn undo(&mut self) -> Option<&DesignState> {
        let previous = self.history.undo()?.clone();
        self.state = previous;
        self.revision += 1;
        debug!(cursor = ?self.history.cursor(), "undo");
        Some(&self.state)
    }

    pub fn redo(&mut self) -> Option<&DesignState> {
        let next = self.history.redo()?.clone();
        self.state = next;
        self.revision += 1;
        debug!(cursor = ?self.history.cursor(), "redo");
        Some(&self.state)
    }

    /// Swap in a whole new state (e.g. an opened record) and start a fresh
    /// history rooted at it.
    pub fn replace_all(&mut self, state: DesignState) {
        info!(layers = state.layers.len(), "replacing design state");
        self.layer_ids.observe(&state.layers);
        self.history.clear();
        self.history.push(state.clone());
        self.state = state;
        self.revision += 1;
    }

    pub fn add_layer(&mut self, kind: LayerKind, name: impl Into<String>) -> LayerEntry {
        let entry = LayerEntry {
            id: self.layer_ids.next_id(),
            kind,
            visible: true,
            name: name.into(),
        };
        let mut layers = self.state.layers.clone();
        layers.push(entry.clone());
        self.apply(DesignPatch::new().layers(layers));
        debug!(layer = entry.id.0, name = %entry.name, "added layer");
        entry
    }

    /// Returns the new visibility, or `None` if the id is unknown.
    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Option<bool> {
        let mut layers = self.state.layers.clone();
        let visible = layers.toggle_visibility(id)?;
        self.apply(DesignPatch::new().layers(layers));
        Some(visible)
    }

    /// Removes the layer entry only; the logo itself stays. Use
    /// [`DesignEditStore::detach_logo`] to drop both.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<LayerEntry> {
        let mut layers = self.state.layers.clone();
        let removed = layers.remove(id)?;
        self.apply(DesignPatch::new().layers(layers));
        debug!(layer = id.0, "removed layer");
        Some(removed)
    }

    /// Set the logo and append its layer in one update. Any previous logo
    /// layer is replaced, so there is exactly one while a logo is set.
    pub fn attach_logo(&mut self, logo: LogoRef, layer_name: impl Into<String>) -> LayerEntry {
        let entry = LayerEntry {
            id: self.layer_ids.next_id(),
            kind: LayerKind::Logo,
            visible: true,
            name: layer_name.into(),
        };
        let mut layers = self.state.layers.clone();
        layers.remove_kind(LayerKind::Logo);
        layers.push(entry.clone());

        info!(logo = %logo.location(), layer = entry.id.0, "attaching logo");
        self.apply(DesignPatch::new().logo(Some(logo)).layers(layers));
        entry
    }

    /// Clear the logo and every logo layer.
    pub fn detach_logo(&mut self) {
        let mut layers = self.state.layers.clone();
        let removed = layers.remove_kind(LayerKind::Logo);
        info!(removed_layers = removed, "detaching logo");
        self.apply(DesignPatch::new().logo(None).layers(layers));
    }

    /// An upload of `local_path` finished. Swap in the remote reference if
    /// that file is still the live logo; otherwise the result is stale.
    pub fn resolve_logo_upload(
        &mut self,
        local_path: &str,
        url: impl Into<String>,
        public_id: Option<String>,
    ) -> bool {
        let still_current = matches!(
            &self.state.logo,
            Some(LogoRef::Local { path }) if path == local_path
        );
        if !still_current {
            debug!(local_path, "discarding stale logo upload");
            return false;
        }
        self.apply(DesignPatch::new().logo(Some(LogoRef::remote(url, public_id))));
        true
    }

    pub fn set_placement(&mut self, slot: DecalSlot, placement: Placement) {
        let placement = clamp_placement(slot, placement);
        self.apply(DesignPatch::new().placement(slot, placement));
    }

    /// Move a decal to the opposite face of the shirt.
    pub fn toggle_side(&mut self, slot: DecalSlot) {
        let flipped = self.state.placement(slot).flipped();
        trace!(?slot, side = ?flipped.side(), "toggling decal side");
        self.apply(DesignPatch::new().placement(slot, flipped));
    }

    pub fn reset_placement(&mut self, slot: DecalSlot) {
        self.apply(DesignPatch::new().placement(slot, slot.default_placement()));
    }

    pub fn apply_template(&mut self, template: &KitTemplate) -> ChangeSet {
        info!(template = template.name, league = template.league, "applying template");
        self.apply(
            DesignPatch::new()
                .base_color(template.base_color)
                .pattern(template.pattern()),
        )
    }
}
