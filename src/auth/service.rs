use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{
    AuthError, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, UserStore,
};
use crate::models::NewUser;

/// Registration and password login. No token or session is issued; a
/// successful login only returns a greeting.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AuthError> {
        // Check if user already exists
        if self.store.find_by_email(&request.email).await?.is_some() {
            tracing::info!("Registration rejected, email already in use");
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&request.sifre)?;

        let user = self
            .store
            .insert(NewUser {
                ad: request.ad,
                soyad: request.soyad,
                email: request.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "Registered user");

        Ok(RegisterResponse {
            message: "Kullanıcı başarıyla kaydedildi".to_string(),
            user_id: user.id,
        })
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> Result<MessageResponse, AuthError> {
        let user = self
            .store
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(&request.sifre, &user.sifre)? {
            tracing::info!(user_id = user.id, "Login rejected, wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");

        Ok(MessageResponse {
            message: format!("Hoş geldiniz, {}!", user.full_name()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MockUserStore;
    use crate::models::User;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            ad: "Ayşe".to_string(),
            soyad: "Yılmaz".to_string(),
            email: email.to_string(),
            sifre: "gizli-şifre".to_string(),
        }
    }

    fn stored_user(password: &str) -> User {
        User {
            id: 7,
            ad: "Ayşe".to_string(),
            soyad: "Yılmaz".to_string(),
            email: "ayse@example.com".to_string(),
            sifre: hash_password(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_returns_id() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .withf(|email: &str| email == "ayse@example.com")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|user: &NewUser| {
                user.email == "ayse@example.com"
                    && user.password_hash != "gizli-şifre"
                    && verify_password("gizli-şifre", &user.password_hash).unwrap()
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: 1,
                    ad: user.ad,
                    soyad: user.soyad,
                    email: user.email,
                    sifre: user.password_hash,
                })
            });

        let service = AccountService::new(Arc::new(store));
        let response = service.register(register_request("ayse@example.com")).await.unwrap();

        assert_eq!(response.user_id, 1);
    }

    #[tokio::test]
    async fn test_register_existing_email_conflicts_without_insert() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("whatever"))));
        store.expect_insert().times(0);

        let service = AccountService::new(Arc::new(store));
        let result = service.register(register_request("ayse@example.com")).await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_login_greets_by_full_name() {
        let user = stored_user("doğru-şifre");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AccountService::new(Arc::new(store));
        let response = service
            .login(LoginRequest {
                email: "ayse@example.com".to_string(),
                sifre: "doğru-şifre".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.message, "Hoş geldiniz, Ayşe Yılmaz!");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let user = stored_user("doğru-şifre");
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AccountService::new(Arc::new(store));
        let result = service
            .login(LoginRequest {
                email: "ayse@example.com".to_string(),
                sifre: "yanlış".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let mut store = MockUserStore::new();
        store.expect_find_by_email().returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(store));
        let result = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                sifre: "anything".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}
