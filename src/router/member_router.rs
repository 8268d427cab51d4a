use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::member_handler::{
    add_member_handler, delete_member_handler, get_member_handler, list_members_handler, update_member_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState, GuardState};
use crate::model::role::Resource;
use crate::service::member_service::MemberService;

pub fn member_router(service: Arc<dyn MemberService>, auth: Arc<AuthState>) -> Router {
    Router::new()
        .route("/", post(add_member_handler).get(list_members_handler))
        // Older clients post here.
        .route("/ajouter", post(add_member_handler))
        .route(
            "/{id}",
            get(get_member_handler)
                .put(update_member_handler)
                .delete(delete_member_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            GuardState::for_resource(auth, Resource::Members),
            require_auth,
        ))
        .with_state(service)
}
