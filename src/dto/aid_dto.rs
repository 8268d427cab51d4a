use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::dto::hex_id;
use crate::dto::member_dto::MemberView;
use crate::model::aid::Aid;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAidRequest {
    #[validate(
        required(message = "Le bénéficiaire est requis"),
        length(equal = 24, message = "Identifiant de bénéficiaire invalide")
    )]
    pub beneficiaire: Option<String>,

    #[validate(
        required(message = "Le type d'aide est requis"),
        length(min = 1, message = "Le type d'aide est requis")
    )]
    pub type_aide: Option<String>,

    #[validate(
        required(message = "Le montant est requis"),
        range(min = 0.0, message = "Le montant doit être positif")
    )]
    pub montant: Option<f64>,

    pub date: Option<DateTime<Utc>>,

    pub description: Option<String>,
}

impl CreateAidRequest {
    pub fn into_aid(self, beneficiary: ObjectId) -> Aid {
        Aid {
            id: None,
            beneficiary,
            aid_type: self.type_aide.unwrap_or_default(),
            amount: self.montant.unwrap_or_default(),
            date: self.date.unwrap_or_else(Utc::now),
            description: self.description,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAidRequest {
    #[validate(length(equal = 24, message = "Identifiant de bénéficiaire invalide"))]
    pub beneficiaire: Option<String>,

    #[validate(length(min = 1, message = "Le type d'aide est requis"))]
    pub type_aide: Option<String>,

    #[validate(range(min = 0.0, message = "Le montant doit être positif"))]
    pub montant: Option<f64>,

    pub date: Option<DateTime<Utc>>,

    /// Absent keeps the stored text, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Tells an explicit `null` (`Some(None)`) apart from a missing field (`None`).
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateAidRequest {
    pub fn apply(self, aid: &mut Aid, beneficiary: Option<ObjectId>) {
        if let Some(beneficiary) = beneficiary {
            aid.beneficiary = beneficiary;
        }
        if let Some(type_aide) = self.type_aide {
            aid.aid_type = type_aide;
        }
        if let Some(montant) = self.montant {
            aid.amount = montant;
        }
        if let Some(date) = self.date {
            aid.date = date;
        }
        if let Some(description) = self.description {
            aid.description = description;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AidView {
    #[serde(rename = "_id")]
    pub id: String,
    pub beneficiaire: Option<MemberView>,
    pub type_aide: String,
    pub montant: f64,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl AidView {
    pub fn new(aid: Aid, beneficiaire: Option<MemberView>) -> Self {
        AidView {
            id: hex_id(aid.id),
            beneficiaire,
            type_aide: aid.aid_type,
            montant: aid.amount,
            date: aid.date,
            description: aid.description,
            created_at: aid.created_at,
            updated_at: aid.updated_at,
        }
    }
}
