use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::hex_id;
use crate::dto::member_dto::MemberView;
use crate::model::dues::{Dues, DuesStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDuesRequest {
    #[validate(
        required(message = "Le membre est requis"),
        length(equal = 24, message = "Identifiant de membre invalide")
    )]
    pub membre: Option<String>,

    #[validate(
        required(message = "Le montant est requis"),
        range(min = 0.0, message = "Le montant doit être positif")
    )]
    pub montant: Option<f64>,

    pub date: Option<DateTime<Utc>>,

    pub statut: Option<DuesStatus>,
}

impl CreateDuesRequest {
    pub fn into_dues(self, member: ObjectId) -> Dues {
        Dues {
            id: None,
            member,
            amount: self.montant.unwrap_or_default(),
            date: self.date.unwrap_or_else(Utc::now),
            status: self.statut.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDuesRequest {
    #[validate(length(equal = 24, message = "Identifiant de membre invalide"))]
    pub membre: Option<String>,

    #[validate(range(min = 0.0, message = "Le montant doit être positif"))]
    pub montant: Option<f64>,

    pub date: Option<DateTime<Utc>>,

    pub statut: Option<DuesStatus>,
}

impl UpdateDuesRequest {
    /// `member` is the already-resolved replacement for `membre`, if any.
    pub fn apply(self, dues: &mut Dues, member: Option<ObjectId>) {
        if let Some(member) = member {
            dues.member = member;
        }
        if let Some(montant) = self.montant {
            dues.amount = montant;
        }
        if let Some(date) = self.date {
            dues.date = date;
        }
        if let Some(statut) = self.statut {
            dues.status = statut;
        }
    }
}

/// Dues with the paying member populated (`null` once that member is gone).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuesView {
    #[serde(rename = "_id")]
    pub id: String,
    pub membre: Option<MemberView>,
    pub montant: f64,
    pub date: DateTime<Utc>,
    pub statut: DuesStatus,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl DuesView {
    pub fn new(dues: Dues, membre: Option<MemberView>) -> Self {
        DuesView {
            id: hex_id(dues.id),
            membre,
            montant: dues.amount,
            date: dues.date,
            statut: dues.status,
            created_at: dues.created_at,
            updated_at: dues.updated_at,
        }
    }
}
