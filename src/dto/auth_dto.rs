use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::hex_id;
use crate::model::role::{Resource, Role};
use crate::model::user::User;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required(message = "Le nom est requis"), length(min = 1, message = "Le nom est requis"))]
    pub name: Option<String>,

    #[validate(
        required(message = "Veuillez fournir un email valide"),
        email(message = "Veuillez fournir un email valide")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Le mot de passe doit comporter au moins 6 caractères"),
        length(min = 6, message = "Le mot de passe doit comporter au moins 6 caractères")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Veuillez fournir un email valide"),
        email(message = "Veuillez fournir un email valide")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Le mot de passe est requis"),
        length(min = 1, message = "Le mot de passe est requis")
    )]
    pub password: Option<String>,
}

/// Unknown role labels are rejected while the body is parsed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// A user as exposed over HTTP, without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: hex_id(user.id),
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

/// Landing data for the signed-in user: what the role may open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub user: UserView,
    pub role: Role,
    pub title: String,
    pub description: String,
    pub features: Vec<Resource>,
}

impl From<UserView> for DashboardView {
    fn from(user: UserView) -> Self {
        let (title, description) = user.role.welcome();
        DashboardView {
            role: user.role,
            title: title.to_string(),
            description: description.to_string(),
            features: user.role.features(),
            user,
        }
    }
}
