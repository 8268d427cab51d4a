use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::impl_record;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aid {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "beneficiaire")]
    pub beneficiary: ObjectId,
    #[serde(rename = "typeAide")]
    pub aid_type: String,
    #[serde(rename = "montant")]
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl_record!(Aid, "aides");
