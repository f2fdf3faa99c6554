use axum::{extract::State, response::Json, routing::post, Router};
use axum_valid::Valid;

use crate::models::{CancerInput, CancerRisk, DiabetesInput, DiabetesRisk, HeartInput, HeartRisk};
use crate::services::{PredictionError, PredictionService};

/// Prediction routes
pub fn prediction_routes(prediction_service: PredictionService) -> Router {
    Router::new()
        .route("/diabetes", post(predict_diabetes))
        .route("/heart", post(predict_heart))
        .route("/cancer", post(predict_cancer))
        .with_state(prediction_service)
}

#[tracing::instrument(skip_all)]
async fn predict_diabetes(
    State(prediction_service): State<PredictionService>,
    Valid(Json(input)): Valid<Json<DiabetesInput>>,
) -> Result<Json<DiabetesRisk>, PredictionError> {
    Ok(Json(prediction_service.predict_diabetes(&input)?))
}

#[tracing::instrument(skip_all)]
async fn predict_heart(
    State(prediction_service): State<PredictionService>,
    Valid(Json(input)): Valid<Json<HeartInput>>,
) -> Result<Json<HeartRisk>, PredictionError> {
    Ok(Json(prediction_service.predict_heart(&input)?))
}

#[tracing::instrument(skip_all)]
async fn predict_cancer(
    State(prediction_service): State<PredictionService>,
    Valid(Json(input)): Valid<Json<CancerInput>>,
) -> Result<Json<CancerRisk>, PredictionError> {
    Ok(Json(prediction_service.predict_cancer(&input)?))
}
