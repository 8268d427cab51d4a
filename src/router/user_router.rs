use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::user_handler::{
    dashboard_handler, get_user_handler, list_users_handler, login_handler, register_handler,
    update_role_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState, GuardState};
use crate::model::role::Resource;
use crate::service::user_service::UserService;

/// Public registration and login.
pub fn auth_router(service: Arc<dyn UserService>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(service)
}

pub fn user_router(service: Arc<dyn UserService>, auth: Arc<AuthState>) -> Router {
    // User management
    let managed = Router::new()
        .route("/", get(list_users_handler))
        .route("/{id}/role", put(update_role_handler))
        .route_layer(middleware::from_fn_with_state(
            GuardState::for_resource(auth.clone(), Resource::Users),
            require_auth,
        ));

    // Any signed-in user; the handler restricts to self unless allowed more
    let own = Router::new()
        .route("/{id}", get(get_user_handler))
        .route_layer(middleware::from_fn_with_state(
            GuardState::authenticated(auth),
            require_auth,
        ));

    managed.merge(own).with_state(service)
}

pub fn dashboard_router(auth: Arc<AuthState>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route_layer(middleware::from_fn_with_state(
            GuardState::authenticated(auth),
            require_auth,
        ))
}
