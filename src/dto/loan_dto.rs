use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::hex_id;
use crate::dto::member_dto::MemberView;
use crate::model::loan::{Loan, LoanStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    #[validate(
        required(message = "Le bénéficiaire est requis"),
        length(equal = 24, message = "Identifiant de bénéficiaire invalide")
    )]
    pub beneficiaire: Option<String>,

    #[validate(
        required(message = "Le montant est requis"),
        range(min = 0.0, message = "Le montant doit être positif")
    )]
    pub montant: Option<f64>,

    #[validate(
        required(message = "L'intérêt est requis"),
        range(min = 0.0, message = "L'intérêt doit être positif")
    )]
    pub interet: Option<f64>,

    #[validate(required(message = "La durée est requise"))]
    pub duree: Option<u32>,

    pub date_debut: Option<DateTime<Utc>>,

    pub statut: Option<LoanStatus>,
}

impl CreateLoanRequest {
    pub fn into_loan(self, beneficiary: ObjectId) -> Loan {
        Loan {
            id: None,
            beneficiary,
            amount: self.montant.unwrap_or_default(),
            interest_rate: self.interet.unwrap_or_default(),
            duration: self.duree.unwrap_or_default(),
            start_date: self.date_debut.unwrap_or_else(Utc::now),
            status: self.statut.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanRequest {
    #[validate(length(equal = 24, message = "Identifiant de bénéficiaire invalide"))]
    pub beneficiaire: Option<String>,

    #[validate(range(min = 0.0, message = "Le montant doit être positif"))]
    pub montant: Option<f64>,

    #[validate(range(min = 0.0, message = "L'intérêt doit être positif"))]
    pub interet: Option<f64>,

    pub duree: Option<u32>,

    pub date_debut: Option<DateTime<Utc>>,

    pub statut: Option<LoanStatus>,
}

impl UpdateLoanRequest {
    pub fn apply(self, loan: &mut Loan, beneficiary: Option<ObjectId>) {
        if let Some(beneficiary) = beneficiary {
            loan.beneficiary = beneficiary;
        }
        if let Some(montant) = self.montant {
            loan.amount = montant;
        }
        if let Some(interet) = self.interet {
            loan.interest_rate = interet;
        }
        if let Some(duree) = self.duree {
            loan.duration = duree;
        }
        if let Some(date_debut) = self.date_debut {
            loan.start_date = date_debut;
        }
        if let Some(statut) = self.statut {
            loan.status = statut;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    #[serde(rename = "_id")]
    pub id: String,
    pub beneficiaire: Option<MemberView>,
    pub montant: f64,
    pub interet: f64,
    pub duree: u32,
    pub date_debut: DateTime<Utc>,
    pub statut: LoanStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl LoanView {
    pub fn new(loan: Loan, beneficiaire: Option<MemberView>) -> Self {
        LoanView {
            id: hex_id(loan.id),
            beneficiaire,
            montant: loan.amount,
            interet: loan.interest_rate,
            duree: loan.duration,
            date_debut: loan.start_date,
            statut: loan.status,
            created_at: loan.created_at,
            updated_at: loan.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_date_is_read_in_camel_case() {
        let req: CreateLoanRequest = serde_json::from_str(
            r#"{"beneficiaire":"65f0c0ffee0000000000abcd","montant":500,"interet":2.5,"duree":12,"dateDebut":"2024-01-15T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        let loan = req.into_loan(ObjectId::new());
        assert_eq!(loan.start_date.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.duration, 12);
    }

    #[test]
    fn interest_and_duration_are_required() {
        let req: CreateLoanRequest =
            serde_json::from_str(r#"{"beneficiaire":"65f0c0ffee0000000000abcd","montant":500}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("interet"));
        assert!(fields.contains_key("duree"));
        assert!(!fields.contains_key("montant"));
    }

    #[test]
    fn negative_duration_does_not_parse() {
        assert!(serde_json::from_str::<CreateLoanRequest>(r#"{"duree":-3}"#).is_err());
    }
}
