use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ndarray::Array1;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    risk_percentage, CancerInput, CancerRisk, DiabetesInput, DiabetesRisk, Disease, HeartInput,
    HeartRisk,
};
use crate::services::classifier::{Classifier, ModelError};
use crate::services::model_store::ModelStore;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Cancer features dosyası bulunamadı.")]
    CancerFeaturesUnavailable,
    #[error("Model inference failed: {0}")]
    Model(#[from] ModelError),
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        match self {
            PredictionError::CancerFeaturesUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            PredictionError::Model(ref e) => {
                tracing::error!(error = %e, "Model inference failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Model inference failed",
                        "message": self.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Maps validated inputs onto model feature vectors and turns class
/// probabilities into risk percentages. Nothing is persisted.
#[derive(Clone)]
pub struct PredictionService {
    models: Arc<ModelStore>,
}

impl PredictionService {
    pub fn new(models: Arc<ModelStore>) -> Self {
        Self { models }
    }

    pub fn predict_diabetes(&self, input: &DiabetesInput) -> Result<DiabetesRisk, PredictionError> {
        let features = input.to_feature_vector();
        let probability = self.positive_probability(Disease::Diabetes, &features)?;

        Ok(DiabetesRisk {
            diabetes_risk: risk_percentage(probability),
        })
    }

    pub fn predict_heart(&self, input: &HeartInput) -> Result<HeartRisk, PredictionError> {
        let features = input.to_feature_vector();
        let probability = self.positive_probability(Disease::Heart, &features)?;

        Ok(HeartRisk {
            heart_risk: risk_percentage(probability),
        })
    }

    /// Fails with `CancerFeaturesUnavailable` without touching the model when
    /// no feature order was loaded.
    pub fn predict_cancer(&self, input: &CancerInput) -> Result<CancerRisk, PredictionError> {
        let order = self.models.cancer_features().ok_or_else(|| {
            tracing::warn!("Cancer prediction requested but no feature order is loaded");
            PredictionError::CancerFeaturesUnavailable
        })?;

        let features = input.to_feature_vector(order);
        let prediction = self.models.classifier(Disease::Cancer).predict(&features)?;
        let probability = self.positive_probability(Disease::Cancer, &features)?;

        Ok(CancerRisk {
            prediction,
            cancer_risk: risk_percentage(probability),
        })
    }

    fn positive_probability(
        &self,
        disease: Disease,
        features: &Array1<f64>,
    ) -> Result<f64, PredictionError> {
        let classifier: &dyn Classifier = self.models.classifier(disease);
        let proba = classifier.predict_proba(features)?;

        let positive = proba.get(1).copied().ok_or_else(|| {
            ModelError::InvalidArtifact(format!(
                "{} model returned {} class probabilities",
                disease,
                proba.len()
            ))
        })?;

        tracing::debug!(%disease, probability = positive, "Computed risk");
        Ok(positive)
    }
}
