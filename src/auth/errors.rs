use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bu e-posta zaten kayıtlı.")]
    EmailAlreadyExists,
    #[error("Kullanıcı bulunamadı.")]
    UserNotFound,
    #[error("Yanlış şifre.")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] crate::auth::password::PasswordError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailAlreadyExists => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::PasswordHashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AuthError::EmailAlreadyExists => "Email already exists",
            AuthError::UserNotFound => "User not found",
            AuthError::InvalidCredentials => "Invalid credentials",
            AuthError::Database(ref e) => {
                tracing::error!(error = %e, "Database error");
                "Database error"
            }
            AuthError::PasswordHashing(ref e) => {
                tracing::error!(error = %e, "Password processing error");
                "Password processing error"
            }
        };

        // Internal details stay in the logs
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
            "message": message,
        }));

        (status, body).into_response()
    }
}
