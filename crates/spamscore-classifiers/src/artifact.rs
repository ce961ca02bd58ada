//! Loading of serialized model artifacts

use crate::classifier::Classifier;
use crate::logistic::LogisticRegression;
use crate::naive_bayes::MultinomialNb;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use spamscore_core::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Serialized classifier, tagged by model family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// Binary logistic regression
    LogisticRegression { coef: Vec<f64>, intercept: f64 },

    /// Two-class multinomial naive Bayes
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl ClassifierArtifact {
    /// Build the classifier this artifact describes
    pub fn build(self) -> Result<Box<dyn Classifier>> {
        let classifier: Box<dyn Classifier> = match self {
            Self::LogisticRegression { coef, intercept } => {
                Box::new(LogisticRegression::new(coef, intercept)?)
            }
            Self::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => Box::new(MultinomialNb::new(class_log_prior, feature_log_prob)?),
        };
        Ok(classifier)
    }
}

/// Read and decode an artifact file.
///
/// `.yaml`/`.yml` files are decoded as YAML; everything else as JSON.
pub fn read_artifact<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::artifact(format!("cannot read {}: {e}", path.display())))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    debug!(path = %path.display(), yaml = is_yaml, "Decoding artifact");

    if is_yaml {
        serde_yaml::from_str(&content)
            .map_err(|e| Error::artifact(format!("cannot decode {}: {e}", path.display())))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| Error::artifact(format!("cannot decode {}: {e}", path.display())))
    }
}

/// Load a classifier artifact from a JSON or YAML file
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Box<dyn Classifier>> {
    read_artifact::<ClassifierArtifact>(path)?.build()
}

/// Hex-encoded SHA-256 of a file's contents
pub fn fingerprint(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::artifact(format!("cannot read {}: {e}", path.display())))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
