use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::loan_handler::{
    add_loan_handler, delete_loan_handler, get_loan_handler, list_loans_handler, update_loan_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState, GuardState};
use crate::model::role::Resource;
use crate::service::loan_service::LoanService;

pub fn loan_router(service: Arc<dyn LoanService>, auth: Arc<AuthState>) -> Router {
    Router::new()
        .route("/", post(add_loan_handler).get(list_loans_handler))
        // Older clients post here.
        .route("/ajouter", post(add_loan_handler))
        .route(
            "/{id}",
            get(get_loan_handler)
                .put(update_loan_handler)
                .delete(delete_loan_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            GuardState::for_resource(auth, Resource::Loans),
            require_auth,
        ))
        .with_state(service)
}
