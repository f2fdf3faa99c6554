use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::AuthError;
use crate::models::{NewUser, User};

/// Persistence for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Inserts a user. A duplicate email yields `EmailAlreadyExists` even if
    /// it slipped past an earlier existence check.
    async fn insert(&self, user: NewUser) -> Result<User, AuthError>;
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, ad, soyad, email, sifre FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (ad, soyad, email, sifre)
             VALUES ($1, $2, $3, $4)
             RETURNING id, ad, soyad, email, sifre",
        )
        .bind(&user.ad)
        .bind(&user.soyad)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::Database(e)
        })
    }
}
