pub mod health;
pub mod login;

use crate::auth::CredentialChecker;
use crate::migrate::MigrationReport;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<CredentialChecker>,
    /// Outcome of startup initialization; `None` when it was not run.
    pub initialization: Option<Arc<MigrationReport>>,
}

impl AppState {
    pub fn new(checker: Arc<CredentialChecker>, initialization: Option<MigrationReport>) -> Self {
        Self {
            checker,
            initialization: initialization.map(Arc::new),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/login", post(login::login))
        .layer(cors)
        .with_state(state)
}
