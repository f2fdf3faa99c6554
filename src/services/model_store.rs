use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::{CancerFeature, DiabetesInput, Disease, HeartInput};
use crate::services::classifier::{load_classifier, Classifier, ModelError};

pub const DIABETES_MODEL_FILE: &str = "diabetes_model.json";
pub const HEART_MODEL_FILE: &str = "heart_model.json";
pub const CANCER_MODEL_FILE: &str = "cancer_model.json";
pub const CANCER_FEATURES_FILE: &str = "cancer_features.json";

/// The pre-trained classifiers, loaded once at startup and never mutated.
pub struct ModelStore {
    diabetes: Box<dyn Classifier>,
    heart: Box<dyn Classifier>,
    cancer: Box<dyn Classifier>,
    cancer_features: Option<Vec<CancerFeature>>,
}

impl ModelStore {
    /// Builds a store from already-loaded classifiers, applying the same
    /// consistency checks as [`ModelStore::load`].
    pub fn new(
        diabetes: Box<dyn Classifier>,
        heart: Box<dyn Classifier>,
        cancer: Box<dyn Classifier>,
        cancer_features: Option<Vec<CancerFeature>>,
    ) -> Result<Self, ModelError> {
        expect_width(diabetes.as_ref(), DiabetesInput::FEATURE_COUNT)?;
        expect_width(heart.as_ref(), HeartInput::FEATURE_COUNT)?;
        if let Some(features) = &cancer_features {
            expect_width(cancer.as_ref(), features.len())?;
        }

        Ok(Self {
            diabetes,
            heart,
            cancer,
            cancer_features,
        })
    }

    /// Loads the three required classifiers and the optional cancer feature
    /// list from `dir`. A missing classifier is fatal; a missing feature list
    /// only disables cancer prediction.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let diabetes = load_classifier(&dir.join(DIABETES_MODEL_FILE))?;
        let heart = load_classifier(&dir.join(HEART_MODEL_FILE))?;
        let cancer = load_classifier(&dir.join(CANCER_MODEL_FILE))?;

        let features_path = dir.join(CANCER_FEATURES_FILE);
        let cancer_features = if features_path.exists() {
            let features = load_cancer_features(&features_path)?;
            tracing::info!(
                path = %features_path.display(),
                count = features.len(),
                "Loaded cancer feature order"
            );
            Some(features)
        } else {
            tracing::warn!(
                path = %features_path.display(),
                "Cancer feature list not found, cancer prediction disabled"
            );
            None
        };

        Self::new(diabetes, heart, cancer, cancer_features)
    }

    pub fn classifier(&self, disease: Disease) -> &dyn Classifier {
        match disease {
            Disease::Diabetes => self.diabetes.as_ref(),
            Disease::Heart => self.heart.as_ref(),
            Disease::Cancer => self.cancer.as_ref(),
        }
    }

    pub fn cancer_features(&self) -> Option<&[CancerFeature]> {
        self.cancer_features.as_deref()
    }
}

/// Parses and resolves the cancer feature order. Unknown or repeated names are
/// rejected here so no request ever sees them.
pub fn load_cancer_features(path: &Path) -> Result<Vec<CancerFeature>, ModelError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let names: Vec<String> = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    resolve_cancer_features(&names)
}

pub fn resolve_cancer_features<S: AsRef<str>>(
    names: &[S],
) -> Result<Vec<CancerFeature>, ModelError> {
    let mut seen = HashSet::new();
    let mut features = Vec::with_capacity(names.len());

    for name in names {
        let feature: CancerFeature = name.as_ref().parse()?;
        if !seen.insert(feature) {
            return Err(ModelError::DuplicateFeature(name.as_ref().to_string()));
        }
        features.push(feature);
    }

    if features.is_empty() {
        return Err(ModelError::InvalidArtifact(
            "cancer feature list is empty".to_string(),
        ));
    }

    Ok(features)
}

fn expect_width(classifier: &dyn Classifier, expected: usize) -> Result<(), ModelError> {
    let actual = classifier.n_features();
    if actual != expected {
        return Err(ModelError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
