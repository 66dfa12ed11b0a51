//! kit-record: moving designs in and out of the design record API.
//!
//! - `payload`: the JSON shapes the API accepts and returns
//! - `bridge`: DesignState <-> payload/record, lenient on the way in
//! - `api`: the collaborator traits plus a directory-backed implementation
//! - `sync`: last-request-wins bookkeeping for save and load
//! - `share`: share links carrying a whole design in the URL

pub mod api;
pub mod bridge;
pub mod local;
pub mod payload;
pub mod share;
pub mod sync;

pub use api::{ApiError, AssetUploadApi, DesignRecordApi};
pub use bridge::{state_from_record, to_payload, LoadedDesign, SaveContext};
pub use local::LocalRecordStore;
pub use payload::{
    DesignPayload, DesignRecord, LogoAsset, PayloadPlacements, PayloadSettings, RecordError,
    UploadedAsset, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR,
};
pub use share::{decode_share_token, encode_share_token, share_link, token_from_link, ShareError};
pub use sync::{DesignSync, LoadOutcome, LoadTicket, SaveOutcome, SaveTicket, StaleReason};
