// Shared helpers for router and database tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use tower::ServiceExt;

use health_risk::api::routes::create_routes;
use health_risk::auth::{AuthError, UserStore};
use health_risk::models::{CancerFeature, NewUser, User};
use health_risk::services::{load_classifier, ModelStore};

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// User store backed by a vector, enforcing unique emails like the real table.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        let stored = User {
            id: users.len() as i32 + 1,
            ad: user.ad,
            soyad: user.soyad,
            email: user.email,
            sifre: user.password_hash,
        };
        users.push(stored.clone());
        Ok(stored)
    }
}

pub fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models")
}

/// The bundled artifacts, including the cancer feature list.
pub fn bundled_models() -> Arc<ModelStore> {
    Arc::new(ModelStore::load(&models_dir()).expect("bundled models load"))
}

/// The bundled classifiers with cancer prediction disabled.
pub fn models_without_cancer_features() -> Arc<ModelStore> {
    let dir = models_dir();
    let store = ModelStore::new(
        load_classifier(&dir.join("diabetes_model.json")).unwrap(),
        load_classifier(&dir.join("heart_model.json")).unwrap(),
        load_classifier(&dir.join("cancer_model.json")).unwrap(),
        None,
    )
    .unwrap();
    Arc::new(store)
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_models(bundled_models())
    }

    pub fn with_models(models: Arc<ModelStore>) -> Self {
        let users = Arc::new(InMemoryUserStore::default());
        let router = create_routes(models, users.clone());
        Self { router, users }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (u16, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.request(request).await;
        let status = response.status().as_u16();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (u16, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.request(request).await;
        let status = response.status().as_u16();
        (status, body_json(response).await)
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    })
}

pub fn diabetes_payload() -> Value {
    json!({
        "Pregnancies": 2,
        "Glucose": 120,
        "BloodPressure": 70,
        "SkinThickness": 20,
        "Insulin": 79,
        "BMI": 25.5,
        "DiabetesPedigreeFunction": 0.5,
        "Age": 30
    })
}

pub fn heart_payload() -> Value {
    json!({
        "age": 54,
        "sex": 1,
        "chest_pain_type": 3,
        "resting_bp_s": 140,
        "cholesterol": 239,
        "fasting_blood_sugar": 0,
        "resting_ecg": 0,
        "max_heart_rate": 160,
        "exercise_angina": 0,
        "oldpeak": 1.2,
        "ST_slope": 2
    })
}

/// Cancer payload with every measurement set to `base`, then `overrides` applied.
pub fn cancer_payload(base: f64, overrides: &[(&str, f64)]) -> Value {
    let mut fields: Map<String, Value> = CancerFeature::ALL
        .iter()
        .map(|feature| (feature.as_str().to_string(), json!(base)))
        .collect();
    for (name, value) in overrides {
        fields.insert(name.to_string(), json!(value));
    }
    Value::Object(fields)
}

pub fn register_payload(email: &str, sifre: &str) -> Value {
    json!({
        "ad": "Ayşe",
        "soyad": "Yılmaz",
        "email": email,
        "sifre": sifre
    })
}
