use axum::{extract::State, response::Json, routing::post, Router};
use axum_valid::Valid;

use crate::auth::{
    AccountService, AuthError, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse,
};

/// Account routes
pub fn auth_routes(account_service: AccountService) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(account_service)
}

/// Register a new user
#[tracing::instrument(skip(account_service, request))]
async fn register(
    State(account_service): State<AccountService>,
    Valid(Json(request)): Valid<Json<RegisterRequest>>,
) -> Result<Json<RegisterResponse>, AuthError> {
    let response = account_service.register(request).await?;
    Ok(Json(response))
}

/// Login user
#[tracing::instrument(skip(account_service, request))]
async fn login(
    State(account_service): State<AccountService>,
    Valid(Json(request)): Valid<Json<LoginRequest>>,
) -> Result<Json<MessageResponse>, AuthError> {
    let response = account_service.login(request).await?;
    Ok(Json(response))
}
