use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::dues_handler::{
    add_dues_handler, delete_dues_handler, get_dues_handler, list_dues_handler, update_dues_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState, GuardState};
use crate::model::role::Resource;
use crate::service::dues_service::DuesService;

pub fn dues_router(service: Arc<dyn DuesService>, auth: Arc<AuthState>) -> Router {
    Router::new()
        .route("/", post(add_dues_handler).get(list_dues_handler))
        // Older clients post here.
        .route("/ajouter", post(add_dues_handler))
        .route(
            "/{id}",
            get(get_dues_handler)
                .put(update_dues_handler)
                .delete(delete_dues_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            GuardState::for_resource(auth, Resource::Dues),
            require_auth,
        ))
        .with_state(service)
}
