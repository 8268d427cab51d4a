use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Method, Request},
    middleware::Next,
    response::Response,
};
use bson::oid::ObjectId;
use tracing::{debug, error, warn};

use crate::dto::auth_dto::UserView;
use crate::model::role::{Access, Resource};
use crate::model::user::User;
use crate::repository::record_repo::Repository;
use crate::util::error::{HandlerError, HandlerErrorKind, SERVER_ERROR_MSG};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub const NO_TOKEN_MSG: &str = "Non autorisé, pas de token";
pub const INVALID_TOKEN_MSG: &str = "Non autorisé, token invalide";
pub const FORBIDDEN_MSG: &str = "Accès refusé";

/// What the guard needs to resolve a bearer token into a user.
pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub users: Arc<dyn Repository<User>>,
}

/// Guard configuration for one group of routes. Without a resource any
/// authenticated user passes.
#[derive(Clone)]
pub struct GuardState {
    pub auth: Arc<AuthState>,
    pub resource: Option<Resource>,
}

impl GuardState {
    pub fn authenticated(auth: Arc<AuthState>) -> Self {
        GuardState { auth, resource: None }
    }

    pub fn for_resource(auth: Arc<AuthState>, resource: Resource) -> Self {
        GuardState {
            auth,
            resource: Some(resource),
        }
    }
}

/// The user behind the request, attached by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserView);

fn unauthorized(msg: &str) -> HandlerError {
    HandlerError::new(HandlerErrorKind::Unauthorized, msg)
}

pub fn access_for(method: &Method) -> Access {
    if method == Method::GET || method == Method::HEAD {
        Access::Read
    } else {
        Access::Write
    }
}

pub async fn require_auth(
    State(guard): State<GuardState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized(NO_TOKEN_MSG))?;
    let token = guard
        .auth
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| unauthorized(NO_TOKEN_MSG))?;

    let claims = guard.auth.jwt_utils.validate_token(&token).map_err(|e| {
        warn!("Rejected token: {}", e);
        unauthorized(INVALID_TOKEN_MSG)
    })?;
    let user_id = ObjectId::parse_str(&claims.user.id).map_err(|_| unauthorized(INVALID_TOKEN_MSG))?;

    let user = guard
        .auth
        .users
        .find_by_id(&user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user for token: {}", e);
            HandlerError::new(HandlerErrorKind::Internal, SERVER_ERROR_MSG)
        })?
        .ok_or_else(|| {
            warn!("Token refers to unknown user: {}", claims.user.id);
            unauthorized(INVALID_TOKEN_MSG)
        })?;

    // A token issued before a role change no longer speaks for the user.
    if user.role != claims.user.role {
        warn!("Token role {} differs from stored role {}", claims.user.role, user.role);
        return Err(unauthorized(INVALID_TOKEN_MSG));
    }

    if let Some(resource) = guard.resource {
        let access = access_for(req.method());
        if !user.role.can(resource, access) {
            warn!("Role {} denied {:?} on {:?}", user.role, access, resource);
            return Err(HandlerError::new(HandlerErrorKind::Forbidden, FORBIDDEN_MSG));
        }
    }

    debug!("Authenticated user {}", claims.user.id);
    req.extensions_mut().insert(CurrentUser(UserView::from(user)));
    Ok(next.run(req).await)
}
