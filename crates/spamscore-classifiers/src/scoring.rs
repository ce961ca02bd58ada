//! Spam scoring over a loaded model

use crate::artifact::{fingerprint, load_classifier};
use crate::classifier::Classifier;
use crate::preprocess::preprocess;
use crate::vectorizer::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use spamscore_core::{Error, Result, Score};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Locations of the two model artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPaths {
    /// Serialized classifier
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,

    /// Serialized vectorizer
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            classifier_path: default_classifier_path(),
            vectorizer_path: default_vectorizer_path(),
        }
    }
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("models/best_model.json")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("models/vectorizer.json")
}

/// SHA-256 fingerprints of the loaded artifact files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFingerprints {
    pub classifier_sha256: String,
    pub vectorizer_sha256: String,
}

/// Immutable pairing of a fitted vectorizer and a classifier.
///
/// Built once at startup and shared read-only; the vectorizer is kept in
/// memory rather than re-read for each call.
pub struct SpamModel {
    vectorizer: TfidfVectorizer,
    classifier: Box<dyn Classifier>,
    fingerprints: Option<ArtifactFingerprints>,
}

impl SpamModel {
    /// Pair a vectorizer with a classifier of matching dimension
    pub fn new(vectorizer: TfidfVectorizer, classifier: Box<dyn Classifier>) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(Error::classifier(format!(
                "vectorizer produces {} features but {} expects {}",
                vectorizer.n_features(),
                classifier.name(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            vectorizer,
            classifier,
            fingerprints: None,
        })
    }

    /// Load both artifacts from disk
    pub fn load(paths: &ModelPaths) -> Result<Self> {
        info!("Loading classifier from: {}", paths.classifier_path.display());
        let classifier = load_classifier(&paths.classifier_path)?;

        info!("Loading vectorizer from: {}", paths.vectorizer_path.display());
        let vectorizer = TfidfVectorizer::load(&paths.vectorizer_path)?;

        let fingerprints = ArtifactFingerprints {
            classifier_sha256: fingerprint(&paths.classifier_path)?,
            vectorizer_sha256: fingerprint(&paths.vectorizer_path)?,
        };

        let mut model = Self::new(vectorizer, classifier)?;
        info!(
            classifier = model.classifier.name(),
            n_features = model.n_features(),
            "Model loaded"
        );
        model.fingerprints = Some(fingerprints);
        Ok(model)
    }

    /// Score one text against a threshold
    pub fn score(&self, text: &str, threshold: f64) -> Result<Score> {
        score(text, self, threshold)
    }

    /// Positive-class probability for one text
    pub fn propensity(&self, text: &str) -> Result<f64> {
        let normalized = preprocess(text);
        let features = self.vectorizer.transform(&normalized);
        self.classifier.predict_positive_class_probability(&features)
    }

    /// Name of the underlying classifier
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Feature dimension shared by vectorizer and classifier
    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Fingerprints of the artifact files, when loaded from disk
    pub fn fingerprints(&self) -> Option<&ArtifactFingerprints> {
        self.fingerprints.as_ref()
    }
}

impl fmt::Debug for SpamModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpamModel")
            .field("classifier", &self.classifier.name())
            .field("n_features", &self.n_features())
            .field("fingerprints", &self.fingerprints)
            .finish()
    }
}

/// Score `text` with `model`: preprocess, vectorize, take the spam-class
/// probability and compare it to `threshold` (inclusive).
pub fn score(text: &str, model: &SpamModel, threshold: f64) -> Result<Score> {
    if threshold.is_nan() {
        return Err(Error::internal("threshold must be a number"));
    }

    let start = Instant::now();
    let propensity = model.propensity(text)?;
    let result = Score::from_propensity(propensity, threshold);

    debug!(
        propensity,
        threshold,
        prediction = result.prediction,
        latency_us = start.elapsed().as_micros() as u64,
        "Scored text"
    );

    Ok(result)
}
