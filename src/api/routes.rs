use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::health::{health_check, home};
use super::predictions::prediction_routes;
use crate::auth::{AccountService, UserStore};
use crate::middleware::cors_layer;
use crate::services::{ModelStore, PredictionService};

pub fn create_routes(models: Arc<ModelStore>, users: Arc<dyn UserStore>) -> Router {
    let prediction_service = PredictionService::new(models);
    let account_service = AccountService::new(users);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .nest("/predict", prediction_routes(prediction_service))
        .merge(auth_routes(account_service))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
