use ndarray::{Array1, ArrayView1};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::UnknownCancerFeature;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("Model expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    UnknownFeature(#[from] UnknownCancerFeature),
    #[error("Duplicate cancer feature: {0}")]
    DuplicateFeature(String),
}

/// A pre-trained binary classifier.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Width of the feature vector the model was trained on
    fn n_features(&self) -> usize;

    /// Predicted class label, 0 or 1
    fn predict(&self, features: &Array1<f64>) -> Result<u8, ModelError>;

    /// Class probabilities `[P(0), P(1)]`
    fn predict_proba(&self, features: &Array1<f64>) -> Result<Array1<f64>, ModelError>;
}

/// On-disk representation of a classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default)]
        scaler: Option<ScalerArtifact>,
    },
    RandomForest {
        n_features: usize,
        trees: Vec<TreeArtifact>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScalerArtifact {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: [f64; 2],
    },
}

/// Reads a JSON artifact and builds the classifier it describes.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    artifact.into_classifier()
}

impl ModelArtifact {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ModelError> {
        match self {
            ModelArtifact::LogisticRegression {
                coefficients,
                intercept,
                scaler,
            } => Ok(Box::new(LogisticRegression::new(
                coefficients,
                intercept,
                scaler,
            )?)),
            ModelArtifact::RandomForest { n_features, trees } => {
                Ok(Box::new(RandomForest::new(n_features, trees)?))
            }
        }
    }
}

/// Standardisation applied before a linear model, `(x - mean) / std`.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    pub means: Array1<f64>,
    pub stds: Array1<f64>,
}

impl FeatureScaler {
    fn from_artifact(artifact: ScalerArtifact, width: usize) -> Result<Self, ModelError> {
        if artifact.means.len() != width || artifact.stds.len() != width {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler has {} means and {} stds for {} coefficients",
                artifact.means.len(),
                artifact.stds.len(),
                width
            )));
        }

        // Zero-variance columns pass through unscaled
        let stds = Array1::from(artifact.stds).mapv(|s| if s == 0.0 { 1.0 } else { s });

        Ok(Self {
            means: Array1::from(artifact.means),
            stds,
        })
    }

    pub fn transform_single(&self, features: &Array1<f64>) -> Array1<f64> {
        (features - &self.means) / &self.stds
    }
}

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Array1<f64>,
    intercept: f64,
    scaler: Option<FeatureScaler>,
}

impl LogisticRegression {
    pub fn new(
        coefficients: Vec<f64>,
        intercept: f64,
        scaler: Option<ScalerArtifact>,
    ) -> Result<Self, ModelError> {
        if coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "logistic regression has no coefficients".to_string(),
            ));
        }

        let width = coefficients.len();
        let scaler = scaler
            .map(|s| FeatureScaler::from_artifact(s, width))
            .transpose()?;

        Ok(Self {
            coefficients: Array1::from(coefficients),
            intercept,
            scaler,
        })
    }

    fn positive_probability(&self, features: &Array1<f64>) -> Result<f64, ModelError> {
        check_width(self.n_features(), features)?;

        let scaled = match &self.scaler {
            Some(scaler) => scaler.transform_single(features),
            None => features.clone(),
        };

        Ok(sigmoid(scaled.dot(&self.coefficients) + self.intercept))
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &Array1<f64>) -> Result<u8, ModelError> {
        Ok(u8::from(self.positive_probability(features)? > 0.5))
    }

    fn predict_proba(&self, features: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
        let p = self.positive_probability(features)?;
        Ok(Array1::from(vec![1.0 - p, p]))
    }
}

/// Ensemble of decision trees; probabilities are the mean of the per-tree leaf
/// class distributions.
#[derive(Debug, Clone)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<Vec<TreeNode>>,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<TreeArtifact>) -> Result<Self, ModelError> {
        if n_features == 0 {
            return Err(ModelError::InvalidArtifact(
                "random forest declares zero features".to_string(),
            ));
        }
        if trees.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }

        let trees: Vec<Vec<TreeNode>> = trees.into_iter().map(|t| t.nodes).collect();
        for (index, nodes) in trees.iter().enumerate() {
            validate_tree(index, nodes, n_features)?;
        }

        Ok(Self { n_features, trees })
    }

    fn leaf_distribution(nodes: &[TreeNode], features: ArrayView1<f64>) -> [f64; 2] {
        let mut current = 0;
        loop {
            match &nodes[current] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return [value[0] / total, value[1] / total];
                }
            }
        }
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Array1<f64>) -> Result<u8, ModelError> {
        let proba = self.predict_proba(features)?;
        // Ties resolve to the first class
        Ok(u8::from(proba[1] > proba[0]))
    }

    fn predict_proba(&self, features: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
        check_width(self.n_features, features)?;

        let mut sums = [0.0, 0.0];
        for nodes in &self.trees {
            let [p0, p1] = Self::leaf_distribution(nodes, features.view());
            sums[0] += p0;
            sums[1] += p1;
        }

        let count = self.trees.len() as f64;
        Ok(Array1::from(vec![sums[0] / count, sums[1] / count]))
    }
}

/// Children must come after their parent, which rules out cycles and lets
/// traversal run without a depth guard.
fn validate_tree(index: usize, nodes: &[TreeNode], n_features: usize) -> Result<(), ModelError> {
    if nodes.is_empty() {
        return Err(ModelError::InvalidArtifact(format!("tree {} is empty", index)));
    }

    for (position, node) in nodes.iter().enumerate() {
        match node {
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= n_features {
                    return Err(ModelError::InvalidArtifact(format!(
                        "tree {} node {} splits on feature {} of {}",
                        index, position, feature, n_features
                    )));
                }
                for child in [*left, *right] {
                    if child <= position || child >= nodes.len() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} has invalid child {}",
                            index, position, child
                        )));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if value[0] < 0.0 || value[1] < 0.0 || value[0] + value[1] <= 0.0 {
                    return Err(ModelError::InvalidArtifact(format!(
                        "tree {} leaf {} has no class weight",
                        index, position
                    )));
                }
            }
        }
    }

    Ok(())
}

fn check_width(expected: usize, features: &Array1<f64>) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
