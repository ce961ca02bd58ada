//! Multinomial naive Bayes over two classes

use crate::classifier::{check_dimension, check_probability, Classifier};
use crate::vectorizer::SparseVector;
use spamscore_core::{Error, Result};

/// Two-class multinomial naive Bayes.
///
/// Class 0 is ham, class 1 is spam. Posteriors come from the joint log
/// likelihood `class_log_prior[c] + x · feature_log_prob[c]`, normalized
/// with log-sum-exp.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    name: String,
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNb {
    /// Create a model from fitted log probabilities
    pub fn new(class_log_prior: [f64; 2], feature_log_prob: [Vec<f64>; 2]) -> Result<Self> {
        let [ham, spam] = &feature_log_prob;
        if ham.is_empty() || ham.len() != spam.len() {
            return Err(Error::classifier(format!(
                "feature_log_prob rows must be non-empty and equal length, got {} and {}",
                ham.len(),
                spam.len()
            )));
        }
        // log probabilities may be -inf for impossible events but never NaN or +inf
        let valid = |w: &f64| !w.is_nan() && *w <= 0.0;
        if !class_log_prior.iter().all(valid) || !ham.iter().chain(spam.iter()).all(valid) {
            return Err(Error::classifier(
                "naive Bayes log probabilities must be <= 0 and not NaN",
            ));
        }

        Ok(Self {
            name: "multinomial_nb".to_string(),
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Joint log likelihood of each class
    pub fn joint_log_likelihood(&self, features: &SparseVector) -> Result<[f64; 2]> {
        check_dimension(self, features)?;
        Ok([0usize, 1].map(|c| self.class_log_prior[c] + features.dot(&self.feature_log_prob[c])))
    }
}

impl Classifier for MultinomialNb {
    fn predict_positive_class_probability(&self, features: &SparseVector) -> Result<f64> {
        let [ham, spam] = self.joint_log_likelihood(features)?;
        let max = ham.max(spam);
        if max == f64::NEG_INFINITY {
            return Err(Error::classifier("both classes have zero likelihood"));
        }
        let log_norm = max + ((ham - max).exp() + (spam - max).exp()).ln();

        check_probability(self, (spam - log_norm).exp().min(1.0))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> MultinomialNb {
        let ln = f64::ln;
        MultinomialNb::new(
            [ln(0.8), ln(0.2)],
            [vec![ln(0.1), ln(0.9)], vec![ln(0.9), ln(0.1)]],
        )
        .unwrap()
    }

    #[test]
    fn test_prior_only_for_empty_vector() {
        let p = model()
            .predict_positive_class_probability(&SparseVector::zeros(2))
            .unwrap();
        assert!((p - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_spam_feature_dominates() {
        let spam = SparseVector::new(2, [(0, 3.0)]).unwrap();
        let p = model().predict_positive_class_probability(&spam).unwrap();
        assert!(p > 0.9, "got {p}");
    }

    #[test]
    fn test_large_counts_stay_in_range() {
        let spam = SparseVector::new(2, [(0, 5_000.0)]).unwrap();
        let p = model().predict_positive_class_probability(&spam).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_joint_log_likelihood_checks_dimension() {
        let wide = SparseVector::new(5, [(4, 1.0)]).unwrap();
        assert!(model().joint_log_likelihood(&wide).is_err());

        let [ham, spam] = model().joint_log_likelihood(&SparseVector::zeros(2)).unwrap();
        assert!((ham - 0.8f64.ln()).abs() < 1e-12);
        assert!((spam - 0.2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        assert!(MultinomialNb::new([-0.1, -0.2], [vec![-1.0], vec![-1.0, -2.0]]).is_err());
        assert!(MultinomialNb::new([-0.1, 0.5], [vec![-1.0], vec![-1.0]]).is_err());
    }
}
