// Share links: a whole design packed into a query parameter.
//
// The token is the record payload, JSON encoded then base64url without
// padding. Decoding goes through the same lenient path as a loaded record,
// so links made by older builds still open.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use kit_design::DesignState;
use thiserror::Error;
use tracing::debug;

use crate::bridge::{state_from_record, to_payload, LoadedDesign, SaveContext};
use crate::payload::{DesignRecord, RecordError};

const SHARED_PARAM: &str = "shared";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share token is not valid base64")]
    Base64(#[from] base64::DecodeError),
    #[error("share token JSON error")]
    Json(#[from] serde_json::Error),
    #[error("share token does not hold a design")]
    Record(#[from] RecordError),
    #[error("link has no \"shared\" parameter")]
    MissingToken,
}

pub fn encode_share_token(state: &DesignState, ctx: &SaveContext) -> Result<String, ShareError> {
    let payload = to_payload(state, ctx);
    let json = serde_json::to_vec(&payload)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// `{origin}/design?shared={token}`
pub fn share_link(origin: &str, state: &DesignState, ctx: &SaveContext) -> Result<String, ShareError> {
    let token = encode_share_token(state, ctx)?;
    let link = format!("{}/design?{SHARED_PARAM}={token}", origin.trim_end_matches('/'));
    debug!(len = link.len(), "built share link");
    Ok(link)
}

/// Pull the token out of a full share link.
pub fn token_from_link(link: &str) -> Result<&str, ShareError> {
    let (_, query) = link.split_once('?').ok_or(ShareError::MissingToken)?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == SHARED_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or(ShareError::MissingToken)
}

pub fn decode_share_token(token: &str) -> Result<LoadedDesign, ShareError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim().trim_end_matches('='))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    let record = DesignRecord::from_value(value)?;
    Ok(state_from_record(&record))
}
