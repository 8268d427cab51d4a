pub mod aid_router;
pub mod dues_router;
pub mod loan_router;
pub mod member_router;
pub mod user_router;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::middlewares::auth_middleware::AuthState;
use crate::service::{
    aid_service::AidService, dues_service::DuesService, loan_service::LoanService,
    member_service::MemberService, user_service::UserService,
};
use crate::util::error::{HandlerError, HandlerErrorKind};

/// Everything the HTTP layer dispatches to.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub members: Arc<dyn MemberService>,
    pub dues: Arc<dyn DuesService>,
    pub loans: Arc<dyn LoanService>,
    pub aids: Arc<dyn AidService>,
    pub auth: Arc<AuthState>,
}

pub fn build_router(services: &Services) -> Router {
    let auth = services.auth.clone();

    let mut api = Router::new()
        .nest("/auth", user_router::auth_router(services.users.clone()))
        .nest("/users", user_router::user_router(services.users.clone(), auth.clone()))
        .merge(user_router::dashboard_router(auth.clone()));

    // French paths first, then their English aliases.
    for path in ["/membres", "/members"] {
        api = api.nest(path, member_router::member_router(services.members.clone(), auth.clone()));
    }
    for path in ["/cotisations", "/dues"] {
        api = api.nest(path, dues_router::dues_router(services.dues.clone(), auth.clone()));
    }
    for path in ["/prets", "/loans"] {
        api = api.nest(path, loan_router::loan_router(services.loans.clone(), auth.clone()));
    }
    for path in ["/aides", "/aid"] {
        api = api.nest(path, aid_router::aid_router(services.aids.clone(), auth.clone()));
    }

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .fallback(not_found)
}

async fn not_found() -> HandlerError {
    HandlerError::new(HandlerErrorKind::NotFound, "Route non trouvée")
}
