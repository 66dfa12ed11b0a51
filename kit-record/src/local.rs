// A directory standing in for the record and asset APIs.
//
//   <root>/records/<id>.json   one design record per file
//   <root>/assets/<id>.<ext>   uploaded logo images

use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{ApiError, AssetUploadApi, DesignRecordApi};
use crate::payload::{DesignPayload, DesignRecord, UploadedAsset};

#[derive(Debug, Clone)]
pub struct LocalRecordStore {
    root: PathBuf,
}

impl LocalRecordStore {
    pub fn open(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        for dir in ["records", "assets"] {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("create record store dir: {}", path.display()))?;
        }
        info!(root = %root.display(), "opened local record store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> Result<PathBuf, ApiError> {
        // ids end up in file names
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ApiError::Rejected {
                reason: format!("invalid record id {id:?}"),
            });
        }
        Ok(self.root.join("records").join(format!("{id}.json")))
    }

    fn write_record(&self, id: &str, payload: &DesignPayload) -> Result<DesignRecord, ApiError> {
        let path = self.record_path(id)?;
        let mut value = serde_json::to_value(payload)?;
        if let Value::Object(object) = &mut value {
            object.insert("_id".to_string(), Value::String(id.to_string()));
        }
        fs::write(&path, serde_json::to_string_pretty(&value)?)?;
        debug!(id, path = %path.display(), "wrote design record");
        Ok(DesignRecord::from_value(value)?)
    }
}

impl DesignRecordApi for LocalRecordStore {
    fn create(&self, payload: &DesignPayload) -> Result<DesignRecord, ApiError> {
        let id = Uuid::new_v4().simple().to_string();
        self.write_record(&id, payload)
    }

    fn update(&self, id: &str, payload: &DesignPayload) -> Result<DesignRecord, ApiError> {
        if !self.record_path(id)?.exists() {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        self.write_record(id, payload)
    }

    fn get(&self, id: &str) -> Result<DesignRecord, ApiError> {
        let path = self.record_path(id)?;
        if !path.exists() {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        let json = fs::read_to_string(&path)?;
        Ok(DesignRecord::from_json(&json)?)
    }
}

impl AssetUploadApi for LocalRecordStore {
    fn upload(&self, path: &Path) -> Result<UploadedAsset, ApiError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let id = Uuid::new_v4().simple().to_string();
        let dest = self.root.join("assets").join(format!("{id}.{ext}"));
        fs::copy(path, &dest)?;
        debug!(from = %path.display(), to = %dest.display(), "stored asset");
        Ok(UploadedAsset {
            url: format!("file://{}", dest.display()),
            public_id: format!("kit-logos/{id}"),
        })
    }
}
