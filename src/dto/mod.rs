pub mod aid_dto;
pub mod auth_dto;
pub mod dues_dto;
pub mod loan_dto;
pub mod member_dto;

use bson::oid::ObjectId;
use serde::Serialize;

/// Confirmation body for deletions.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        MessageResponse { msg: msg.into() }
    }
}

/// Hex form of a stored id. Records read back from a repository always carry one.
pub(crate) fn hex_id(id: Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}
