use axum::Router;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{AdminUserConfig, AppConfig, Settings};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::repository_error::RepositoryError;
use crate::repository::Repositories;
use crate::router::{build_router, Services};
use crate::service::aid_service::AidServiceImpl;
use crate::service::dues_service::DuesServiceImpl;
use crate::service::loan_service::LoanServiceImpl;
use crate::service::member_service::MemberServiceImpl;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::jwt::JwtTokenUtilsImpl;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database connection failed: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Repository setup failed: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub services: Services,
}

impl App {
    /// Connects to MongoDB, wires every service and seeds the bootstrap admin.
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        let db = settings.mongo.connect().await?;
        info!("Connected to MongoDB database {}", settings.mongo.database);
        let repositories = Repositories::mongo(&db).await?;

        let app = Self::with_repositories(settings, repositories);
        app.create_first_admin_user(settings.admin.as_ref()).await;
        Ok(app)
    }

    pub fn with_repositories(settings: &Settings, repositories: Repositories) -> Self {
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(settings.jwt.clone()));
        let auth = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
            users: repositories.users.clone(),
        });

        let services = Services {
            users: Arc::new(UserServiceImpl::new(repositories.users.clone(), jwt_utils)),
            members: Arc::new(MemberServiceImpl::new(
                repositories.members.clone(),
                repositories.dues.clone(),
            )),
            dues: Arc::new(DuesServiceImpl::new(
                repositories.dues.clone(),
                repositories.members.clone(),
            )),
            loans: Arc::new(LoanServiceImpl::new(
                repositories.loans.clone(),
                repositories.dues.clone(),
                repositories.members.clone(),
            )),
            aids: Arc::new(AidServiceImpl::new(
                repositories.aids.clone(),
                repositories.dues.clone(),
                repositories.members.clone(),
            )),
            auth,
        };

        let router = build_router(&services);
        App {
            config: settings.app.clone(),
            router,
            services,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), AppError> {
        let host: IpAddr = self
            .config
            .host
            .parse()
            .map_err(|_| AppError::InvalidAddress(self.config.host.clone()))?;
        let addr = SocketAddr::new(host, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    pub async fn create_first_admin_user(&self, admin: Option<&AdminUserConfig>) {
        let Some(admin) = admin else {
            warn!("ADMIN_EMAIL not set, no bootstrap admin created");
            return;
        };
        if let Err(e) = self.services.users.ensure_admin(admin).await {
            error!("Failed to create admin user: {e}");
        }
    }
}
