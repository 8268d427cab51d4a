use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::hex_id;
use crate::model::member::Member;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(required(message = "Le nom est requis"), length(min = 1, message = "Le nom est requis"))]
    pub nom: Option<String>,

    #[validate(
        required(message = "Le prénom est requis"),
        length(min = 1, message = "Le prénom est requis")
    )]
    pub prenom: Option<String>,

    #[validate(
        required(message = "Veuillez fournir un email valide"),
        email(message = "Veuillez fournir un email valide")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "L'adresse est requise"),
        length(min = 1, message = "L'adresse est requise")
    )]
    pub adresse: Option<String>,

    #[validate(
        required(message = "Le téléphone est requis"),
        length(min = 1, message = "Le téléphone est requis")
    )]
    pub telephone: Option<String>,
}

impl CreateMemberRequest {
    /// Only meaningful once the request has been validated.
    pub fn into_member(self) -> Member {
        Member {
            id: None,
            last_name: self.nom.unwrap_or_default(),
            first_name: self.prenom.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            address: self.adresse.unwrap_or_default(),
            phone: self.telephone.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, message = "Le nom est requis"))]
    pub nom: Option<String>,
    #[validate(length(min = 1, message = "Le prénom est requis"))]
    pub prenom: Option<String>,
    #[validate(email(message = "Veuillez fournir un email valide"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "L'adresse est requise"))]
    pub adresse: Option<String>,
    #[validate(length(min = 1, message = "Le téléphone est requis"))]
    pub telephone: Option<String>,
}

impl UpdateMemberRequest {
    pub fn apply(self, member: &mut Member) {
        if let Some(nom) = self.nom {
            member.last_name = nom;
        }
        if let Some(prenom) = self.prenom {
            member.first_name = prenom;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(adresse) = self.adresse {
            member.address = adresse;
        }
        if let Some(telephone) = self.telephone {
            member.phone = telephone;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberView {
    #[serde(rename = "_id")]
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub adresse: String,
    pub telephone: String,
    /// Ids of the dues recorded for this member.
    pub cotisations: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl MemberView {
    pub fn new(member: Member, cotisations: Vec<String>) -> Self {
        MemberView {
            id: hex_id(member.id),
            nom: member.last_name,
            prenom: member.first_name,
            email: member.email,
            adresse: member.address,
            telephone: member.phone,
            cotisations,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_all_reported() {
        let req: CreateMemberRequest = serde_json::from_str(r#"{"nom":"Dupont"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["prenom", "email", "adresse", "telephone"] {
            assert!(fields.contains_key(field), "{} should be reported", field);
        }
        assert!(!fields.contains_key("nom"));
    }

    #[test]
    fn partial_update_keeps_untouched_fields() {
        let mut member = CreateMemberRequest {
            nom: Some("Dupont".to_string()),
            prenom: Some("Jean".to_string()),
            email: Some("d@x.com".to_string()),
            adresse: Some("1 rue de la Paix".to_string()),
            telephone: Some("0600000000".to_string()),
        }
        .into_member();

        let update: UpdateMemberRequest = serde_json::from_str(r#"{"telephone":"0700000000"}"#).unwrap();
        assert!(update.validate().is_ok());
        update.apply(&mut member);
        assert_eq!(member.phone, "0700000000");
        assert_eq!(member.last_name, "Dupont");
        assert_eq!(member.email, "d@x.com");
    }

    #[test]
    fn update_rejects_bad_email() {
        let update: UpdateMemberRequest = serde_json::from_str(r#"{"email":"not-an-email"}"#).unwrap();
        assert!(update.validate().is_err());
    }
}
