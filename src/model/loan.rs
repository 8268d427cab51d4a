use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::impl_record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoanStatus {
    #[default]
    #[serde(rename = "actif")]
    Active,
    #[serde(rename = "remboursé")]
    Repaid,
}

/// A prêt granted to a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "beneficiaire")]
    pub beneficiary: ObjectId,
    #[serde(rename = "montant")]
    pub amount: f64,
    /// Interest rate, in percent.
    #[serde(rename = "interet")]
    pub interest_rate: f64,
    /// Duration in months.
    #[serde(rename = "duree")]
    pub duration: u32,
    #[serde(rename = "dateDebut")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "statut", default)]
    pub status: LoanStatus,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl_record!(Loan, "prets");
