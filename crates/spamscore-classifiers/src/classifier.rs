//! Classifier trait and shared helpers

use crate::vectorizer::SparseVector;
use spamscore_core::{Error, Result};

/// Trait for binary probabilistic classifiers.
///
/// Implementations are immutable after construction and shared read-only
/// across requests.
pub trait Classifier: Send + Sync {
    /// Probability of the positive (spam) class for a feature vector
    fn predict_positive_class_probability(&self, features: &SparseVector) -> Result<f64>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Number of features the classifier expects
    fn n_features(&self) -> usize;
}

/// Reject vectors whose dimension does not match the classifier
pub(crate) fn check_dimension(classifier: &dyn Classifier, features: &SparseVector) -> Result<()> {
    if features.dim() != classifier.n_features() {
        return Err(Error::classifier(format!(
            "{} expects {} features, got {}",
            classifier.name(),
            classifier.n_features(),
            features.dim()
        )));
    }
    Ok(())
}

/// Reject probabilities that are non-finite or outside [0, 1]
pub(crate) fn check_probability(classifier: &dyn Classifier, p: f64) -> Result<f64> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(Error::classifier(format!(
            "{} produced invalid probability {p}",
            classifier.name()
        )));
    }
    Ok(p)
}

/// Logistic function, stable for large |z|
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
