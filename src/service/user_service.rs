use std::sync::Arc;

use async_trait::async_trait;
use bson::doc;
use tracing::{error, info, instrument, warn};

use crate::config::AdminUserConfig;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserView};
use crate::model::role::Role;
use crate::model::user::User;
use crate::repository::record_repo::Repository;
use crate::repository::repository_error::RepositoryError;
use crate::service::{not_found_as, parse_id, ServiceResult};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

const ALREADY_REGISTERED: &str = "Utilisateur déjà enregistré";
const NOT_FOUND: &str = "Utilisateur non trouvé";

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse>;
    async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse>;
    async fn list_users(&self) -> ServiceResult<Vec<UserView>>;
    async fn get_user(&self, id: &str) -> ServiceResult<UserView>;
    async fn update_role(&self, id: &str, role: Role) -> ServiceResult<UserView>;
    /// Creates the bootstrap Président account unless its email is taken.
    async fn ensure_admin(&self, admin: &AdminUserConfig) -> ServiceResult<()>;
}

pub struct UserServiceImpl {
    pub users: Arc<dyn Repository<User>>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(users: Arc<dyn Repository<User>>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { users, jwt_utils }
    }

    fn issue(&self, user: User) -> ServiceResult<AuthResponse> {
        let view = UserView::from(user);
        let token = self
            .jwt_utils
            .generate_token(&view.id, view.role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        Ok(AuthResponse { token, user: view })
    }

    async fn create(&self, name: String, email: String, password: String, role: Role) -> ServiceResult<User> {
        if self.users.find_one(doc! { "email": email.as_str() }).await?.is_some() {
            warn!("Email already registered: {}", email);
            return Err(ServiceError::DuplicateEmail(ALREADY_REGISTERED.to_string()));
        }
        let password_hash = hash_password(password).await?;
        let user = User {
            id: None,
            name,
            email,
            password_hash,
            role,
            created_at: None,
            updated_at: None,
        };
        self.users.insert(user).await.map_err(|e| match e {
            RepositoryError::AlreadyExists(_) => ServiceError::DuplicateEmail(ALREADY_REGISTERED.to_string()),
            other => other.into(),
        })
    }
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_password(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || PasswordUtilsImpl::hash_password(&password))
        .await
        .map_err(|e| ServiceError::InternalError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::InternalError(e.to_string()))
}

async fn verify_password(password: String, hash: String) -> ServiceResult<bool> {
    tokio::task::spawn_blocking(move || PasswordUtilsImpl::verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::InternalError(format!("Verification task failed: {}", e)))?
        .map_err(|e| ServiceError::InternalError(e.to_string()))
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(email = ?request.email))]
    async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        info!("Registering new user");
        let user = self
            .create(
                request.name.unwrap_or_default(),
                request.email.unwrap_or_default(),
                request.password.unwrap_or_default(),
                Role::default(),
            )
            .await?;
        info!("User registered successfully");
        self.issue(user)
    }

    #[instrument(skip(self, request), fields(email = ?request.email))]
    async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        info!("User login attempt");
        let email = request.email.unwrap_or_default();
        let Some(user) = self.users.find_one(doc! { "email": email.as_str() }).await? else {
            warn!("Login for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };
        let valid = verify_password(request.password.unwrap_or_default(), user.password_hash.clone()).await?;
        if !valid {
            warn!("Invalid password for user: {}", email);
            return Err(ServiceError::InvalidCredentials);
        }
        info!("User logged in successfully");
        self.issue(user)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> ServiceResult<Vec<UserView>> {
        let users = self.users.find_many(None).await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: &str) -> ServiceResult<UserView> {
        let id = parse_id(id, NOT_FOUND)?;
        self.users
            .find_by_id(&id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self, role), fields(role = %role))]
    async fn update_role(&self, id: &str, role: Role) -> ServiceResult<UserView> {
        let id = parse_id(id, NOT_FOUND)?;
        let mut user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        user.role = role;
        let stored = self.users.replace(&id, user).await.map_err(not_found_as(NOT_FOUND))?;
        info!("Role updated");
        Ok(UserView::from(stored))
    }

    #[instrument(skip(self, admin), fields(email = %admin.email))]
    async fn ensure_admin(&self, admin: &AdminUserConfig) -> ServiceResult<()> {
        if let Some(existing) = self.users.find_one(doc! { "email": admin.email.as_str() }).await? {
            if existing.role != Role::President {
                error!("Bootstrap admin email is registered with role {}", existing.role);
            }
            info!("Bootstrap admin already present");
            return Ok(());
        }
        self.create(admin.name.clone(), admin.email.clone(), admin.password.clone(), Role::President)
            .await?;
        info!("Bootstrap admin created");
        Ok(())
    }
}
