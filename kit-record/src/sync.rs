//! Last-request-wins bookkeeping for saves and loads.
//!
//! Each `begin_*` call starts a new generation and hands out a ticket. A
//! completion is only acted on if its ticket is still the newest one. A
//! load additionally requires that the store has not been edited since
//! the load began, so a slow response never clobbers newer local work.

use kit_design::DesignEditStore;
use tracing::{debug, info, warn};

use crate::api::{ApiError, DesignRecordApi};
use crate::bridge::{state_from_record, to_payload, LoadedDesign, SaveContext};
use crate::payload::{DesignPayload, DesignRecord};

/// A save in flight. The payload is a snapshot taken when the save began.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    generation: u64,
    pub payload: DesignPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// A newer request of the same kind was started.
    Superseded,
    /// The design was edited while the load was in flight.
    LocalEdits,
}

#[derive(Debug)]
pub enum SaveOutcome {
    Applied(DesignRecord),
    Stale(StaleReason),
    Failed(ApiError),
}

#[derive(Debug)]
pub enum LoadOutcome {
    Applied(LoadedDesign),
    Stale(StaleReason),
    Failed(ApiError),
}

#[derive(Debug, Default)]
pub struct DesignSync {
    save_generation: u64,
    load_generation: u64,
    record_id: Option<String>,
}

impl DesignSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue an already saved record; later saves update it in place.
    pub fn with_record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            ..Self::default()
        }
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn begin_save(&mut self, store: &DesignEditStore, ctx: &SaveContext) -> SaveTicket {
        self.save_generation += 1;
        debug!(generation = self.save_generation, "save started");
        SaveTicket {
            generation: self.save_generation,
            payload: to_payload(store.state(), ctx),
        }
    }

    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<DesignRecord, ApiError>,
    ) -> SaveOutcome {
        if ticket.generation != self.save_generation {
            debug!(
                generation = ticket.generation,
                latest = self.save_generation,
                "discarding superseded save result"
            );
            return SaveOutcome::Stale(StaleReason::Superseded);
        }
        match result {
            Ok(record) => {
                if let Some(id) = &record.id {
                    self.record_id = Some(id.clone());
                }
                info!(record_id = ?self.record_id, "design saved");
                SaveOutcome::Applied(record)
            }
            Err(err) => {
                warn!(error = %err, "design save failed");
                SaveOutcome::Failed(err)
            }
        }
    }

    pub fn begin_load(&mut self, store: &DesignEditStore) -> LoadTicket {
        self.load_generation += 1;
        debug!(generation = self.load_generation, "load started");
        LoadTicket {
            generation: self.load_generation,
            revision: store.revision(),
        }
    }

    /// Apply a fetched record to `store` if it is still wanted. The loaded
    /// state becomes the root of a fresh history.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DesignRecord, ApiError>,
        store: &mut DesignEditStore,
    ) -> LoadOutcome {
        if ticket.generation != self.load_generation {
            debug!(generation = ticket.generation, "discarding superseded load result");
            return LoadOutcome::Stale(StaleReason::Superseded);
        }
        if ticket.revision != store.revision() {
            debug!(
                started_at = ticket.revision,
                now = store.revision(),
                "design edited during load, discarding result"
            );
            return LoadOutcome::Stale(StaleReason::LocalEdits);
        }
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "design load failed");
                return LoadOutcome::Failed(err);
            }
        };

        let loaded = state_from_record(&record);
        store.replace_all(loaded.state.clone());
        self.record_id = loaded.record_id.clone();
        info!(record_id = ?loaded.record_id, "design loaded");
        LoadOutcome::Applied(loaded)
    }

    /// Save synchronously: create on first save, update afterwards.
    pub fn save_with(
        &mut self,
        api: &impl DesignRecordApi,
        store: &DesignEditStore,
        ctx: &SaveContext,
    ) -> SaveOutcome {
        let ticket = self.begin_save(store, ctx);
        let result = match &self.record_id {
            Some(id) => api.update(id, &ticket.payload),
            None => api.create(&ticket.payload),
        };
        self.finish_save(ticket, result)
    }

    pub fn load_with(
        &mut self,
        api: &impl DesignRecordApi,
        id: &str,
        store: &mut DesignEditStore,
    ) -> LoadOutcome {
        let ticket = self.begin_load(store);
        let result = api.get(id);
        self.finish_load(ticket, result, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_core::KitColor;
    use kit_design::{DesignPatch, EditorConfig};
    use serde_json::json;

    fn store() -> DesignEditStore {
        DesignEditStore::new(&EditorConfig::default())
    }

    fn record(color: &str) -> DesignRecord {
        DesignRecord::from_value(json!({"_id": "r1", "color": color})).unwrap()
    }

    #[test]
    fn test_save_snapshot_is_taken_at_request_time() {
        let mut sync = DesignSync::new();
        let mut store = store();
        store.update(DesignPatch::new().number_text("9"));
        let ticket = sync.begin_save(&store, &SaveContext::default());

        store.update(DesignPatch::new().number_text("10"));
        assert_eq!(ticket.payload.settings.number, "9");
    }

    #[test]
    fn test_older_save_completion_is_stale() {
        let mut sync = DesignSync::new();
        let store = store();
        let first = sync.begin_save(&store, &SaveContext::default());
        let second = sync.begin_save(&store, &SaveContext::default());

        let late = sync.finish_save(first, Ok(record("#000000")));
        assert!(matches!(late, SaveOutcome::Stale(StaleReason::Superseded)));
        assert_eq!(sync.record_id(), None);

        let latest = sync.finish_save(second, Ok(record("#000000")));
        assert!(matches!(latest, SaveOutcome::Applied(_)));
        assert_eq!(sync.record_id(), Some("r1"));
    }

    #[test]
    fn test_load_discarded_after_local_edit() {
        let mut sync = DesignSync::new();
        let mut store = store();
        let ticket = sync.begin_load(&store);
        store.update(DesignPatch::new().base_color(KitColor::BLACK));

        let outcome = sync.finish_load(ticket, Ok(record("#ffffff")), &mut store);
        assert!(matches!(outcome, LoadOutcome::Stale(StaleReason::LocalEdits)));
        assert_eq!(store.state().base_color, KitColor::BLACK);
    }

    #[test]
    fn test_failed_load_leaves_state_intact() {
        let mut sync = DesignSync::new();
        let mut store = store();
        let before = store.snapshot();
        let ticket = sync.begin_load(&store);
        let outcome = sync.finish_load(
            ticket,
            Err(ApiError::NotFound { id: "gone".into() }),
            &mut store,
        );
        assert!(matches!(outcome, LoadOutcome::Failed(ApiError::NotFound { .. })));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_applied_load_reseeds_history() {
        let mut sync = DesignSync::new();
        let mut store = store();
        let stale = sync.begin_load(&store);
        let ticket = sync.begin_load(&store);

        let outcome = sync.finish_load(stale, Ok(record("#111111")), &mut store);
        assert!(matches!(outcome, LoadOutcome::Stale(StaleReason::Superseded)));

        let outcome = sync.finish_load(ticket, Ok(record("#ef4135")), &mut store);
        assert!(matches!(outcome, LoadOutcome::Applied(_)));
        assert_eq!(store.state().base_color.to_hex(), "#ef4135");
        assert!(!store.can_undo());
        assert_eq!(sync.record_id(), Some("r1"));
    }
}
