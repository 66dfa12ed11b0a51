//! Design session files.
//!
//! A session is the durable unit of local work. It stores:
//! - the design state as last captured from the store
//! - the selected shirt size
//! - which 3D model and which saved record it belongs to, if any
//!
//! Undo history is deliberately not stored; reopening a session starts a
//! fresh history rooted at the saved state.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::{DesignEditStore, DesignState, EditorConfig, KitSize, DESIGN_SCHEMA_VERSION};

/// File extension recommended for saved sessions.
pub const SESSION_FILE_EXT: &str = "kit.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSession {
    pub session_id: Uuid,
    pub schema_version: String,
    #[serde(default)]
    pub size: KitSize,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub record_id: Option<String>,
    pub state: DesignState,
}

impl DesignSession {
    pub fn new(state: DesignState) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            schema_version: DESIGN_SCHEMA_VERSION.to_string(),
            size: KitSize::default(),
            model_id: None,
            record_id: None,
            state,
        }
    }

    /// A store whose history starts at this session's state.
    pub fn open_store(&self, config: &EditorConfig) -> DesignEditStore {
        DesignEditStore::with_state(self.state.clone(), config)
    }

    /// Copy the store's live state back into the session.
    pub fn capture(&mut self, store: &DesignEditStore) {
        self.state = store.snapshot();
    }

    /// Name used for a saved design with no player name on it.
    pub fn fallback_name(&self) -> String {
        let id = self.session_id.simple().to_string();
        format!("Design {}", &id[..8])
    }
}

/// Save a session to disk as pretty JSON.
pub fn save_session(path: impl AsRef<Path>, session: &DesignSession) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        // fs::write does NOT create directories
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(session).context("serialize session to json")?;
    fs::write(path, json).with_context(|| format!("write session file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), session_id = %session.session_id, "saved session");
    Ok(())
}

/// Load a session from disk.
pub fn load_session(path: impl AsRef<Path>) -> anyhow::Result<DesignSession> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read session file: {}", path.display()))?;
    let session: DesignSession = serde_json::from_str(&data).context("parse session json")?;
    if session.schema_version != DESIGN_SCHEMA_VERSION {
        tracing::warn!(
            found = %session.schema_version,
            expected = DESIGN_SCHEMA_VERSION,
            "session schema version differs"
        );
    }
    Ok(session)
}
