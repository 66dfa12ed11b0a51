// The two remote collaborators the editor talks to. Calls are blocking
// from the editor's point of view; whoever drives them decides threading.

use std::path::Path;
use thiserror::Error;

use crate::payload::{DesignPayload, DesignRecord, RecordError, UploadedAsset};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("design record not found: {id}")]
    NotFound { id: String },
    #[error("request rejected: {reason}")]
    Rejected { reason: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
    #[error("json error")]
    Json(#[from] serde_json::Error),
}

/// Create, update and fetch saved designs.
pub trait DesignRecordApi {
    fn create(&self, payload: &DesignPayload) -> Result<DesignRecord, ApiError>;
    fn update(&self, id: &str, payload: &DesignPayload) -> Result<DesignRecord, ApiError>;
    fn get(&self, id: &str) -> Result<DesignRecord, ApiError>;
}

/// Store an image file and hand back where it can be fetched from.
pub trait AssetUploadApi {
    fn upload(&self, path: &Path) -> Result<UploadedAsset, ApiError>;
}
