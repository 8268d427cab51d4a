use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::IntoResponse,
    Json,
};

use crate::dto::auth_dto::{DashboardView, LoginRequest, RegisterRequest, UpdateRoleRequest};
use crate::middlewares::auth_middleware::{CurrentUser, FORBIDDEN_MSG};
use crate::model::role::{Access, Resource};
use crate::service::user_service::UserService;
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::extract::ValidatedJson;

// Register
pub async fn register_handler(
    State(service): State<Arc<dyn UserService>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.register(payload).await?;
    Ok(Json(res))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<dyn UserService>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.login(payload).await?;
    Ok(Json(res))
}

pub async fn list_users_handler(
    State(service): State<Arc<dyn UserService>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_users().await?;
    Ok(Json(res))
}

/// Users may read their own record; reading others needs user management rights.
pub async fn get_user_handler(
    State(service): State<Arc<dyn UserService>>,
    Extension(CurrentUser(me)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    if me.id != id && !me.role.can(Resource::Users, Access::Read) {
        return Err(HandlerError::new(HandlerErrorKind::Forbidden, FORBIDDEN_MSG));
    }
    let res = service.get_user(&id).await?;
    Ok(Json(res))
}

pub async fn update_role_handler(
    State(service): State<Arc<dyn UserService>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update_role(&id, payload.role).await?;
    Ok(Json(res))
}

pub async fn dashboard_handler(Extension(CurrentUser(me)): Extension<CurrentUser>) -> impl IntoResponse {
    Json(DashboardView::from(me))
}
