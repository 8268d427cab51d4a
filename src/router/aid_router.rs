use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::aid_handler::{
    add_aid_handler, delete_aid_handler, get_aid_handler, list_aids_handler, update_aid_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState, GuardState};
use crate::model::role::Resource;
use crate::service::aid_service::AidService;

pub fn aid_router(service: Arc<dyn AidService>, auth: Arc<AuthState>) -> Router {
    Router::new()
        .route("/", post(add_aid_handler).get(list_aids_handler))
        // Older clients post here.
        .route("/ajouter", post(add_aid_handler))
        .route(
            "/{id}",
            get(get_aid_handler)
                .put(update_aid_handler)
                .delete(delete_aid_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            GuardState::for_resource(auth, Resource::Aid),
            require_auth,
        ))
        .with_state(service)
}
