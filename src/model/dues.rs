use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::impl_record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuesStatus {
    #[default]
    #[serde(rename = "payé")]
    Paid,
    #[serde(rename = "en retard")]
    Late,
}

/// A cotisation paid (or owed) by a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dues {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "membre")]
    pub member: ObjectId,
    #[serde(rename = "montant")]
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(rename = "statut", default)]
    pub status: DuesStatus,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl_record!(Dues, "cotisations");
