// Inference: classifiers, the model store and the prediction service

pub mod classifier;
pub mod model_store;
pub mod prediction_service;

pub use classifier::{load_classifier, Classifier, ModelError};
pub use model_store::ModelStore;
pub use prediction_service::{PredictionError, PredictionService};
