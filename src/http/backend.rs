use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::http::handlers;
use crate::validation::Gateway;

/// Shared state handed to every request handler
#[derive(Debug, Clone)]
pub struct Backend {
    pub gateway: Arc<Gateway>,
}

impl Backend {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// All gateway routes bound to this backend
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(handlers::docs))
            .route("/openapi.json", get(handlers::openapi))
            .route("/ping", get(handlers::ping))
            .route("/w3c", get(handlers::w3c).post(handlers::w3c))
            .route("/yangre", post(handlers::yangre))
            .with_state(self)
    }
}
