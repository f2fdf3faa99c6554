use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `users` table. `sifre` holds the bcrypt hash, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub ad: String,
    pub soyad: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub sifre: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.ad, self.soyad)
    }
}

/// A user about to be inserted, with the password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub ad: String,
    pub soyad: String,
    pub email: String,
    pub password_hash: String,
}
