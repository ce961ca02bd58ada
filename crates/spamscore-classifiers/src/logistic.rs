//! Binary logistic regression

use crate::classifier::{check_dimension, check_probability, sigmoid, Classifier};
use crate::vectorizer::SparseVector;
use spamscore_core::{Error, Result};

/// Linear model with a logistic link: `p = sigmoid(intercept + coef · x)`
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    name: String,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Create a model from fitted weights
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self> {
        if coef.is_empty() {
            return Err(Error::classifier("logistic regression needs at least one coefficient"));
        }
        if !intercept.is_finite() || coef.iter().any(|w| !w.is_finite()) {
            return Err(Error::classifier("logistic regression weights must be finite"));
        }

        Ok(Self {
            name: "logistic_regression".to_string(),
            coef,
            intercept,
        })
    }

    /// Decision function value before the logistic link
    pub fn decision_function(&self, features: &SparseVector) -> Result<f64> {
        check_dimension(self, features)?;
        Ok(self.intercept + features.dot(&self.coef))
    }
}

impl Classifier for LogisticRegression {
    fn predict_positive_class_probability(&self, features: &SparseVector) -> Result<f64> {
        let z = self.decision_function(features)?;
        check_probability(self, sigmoid(z))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_vector_uses_intercept() {
        let model = LogisticRegression::new(vec![1.0, -1.0], 0.0).unwrap();
        let p = model
            .predict_positive_class_probability(&SparseVector::zeros(2))
            .unwrap();
        assert_eq!(p, 0.5);
    }

    #[test]
    fn test_positive_weights_raise_probability() {
        let model = LogisticRegression::new(vec![3.0, -3.0], -0.5).unwrap();
        let spam = SparseVector::new(2, [(0, 1.0)]).unwrap();
        let ham = SparseVector::new(2, [(1, 1.0)]).unwrap();

        assert!(model.predict_positive_class_probability(&spam).unwrap() > 0.9);
        assert!(model.predict_positive_class_probability(&ham).unwrap() < 0.1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = LogisticRegression::new(vec![1.0], 0.0).unwrap();
        let err = model
            .predict_positive_class_probability(&SparseVector::zeros(3))
            .unwrap_err();
        assert!(err.to_string().contains("expects 1 features, got 3"));
    }

    #[test]
    fn test_decision_function_checks_dimension() {
        let model = LogisticRegression::new(vec![1.0], 0.25).unwrap();
        let wide = SparseVector::new(4, [(3, 1.0)]).unwrap();
        assert!(model.decision_function(&wide).is_err());

        let x = SparseVector::new(1, [(0, 2.0)]).unwrap();
        assert_eq!(model.decision_function(&x).unwrap(), 2.25);
    }

    #[test]
    fn test_rejects_invalid_weights() {
        assert!(LogisticRegression::new(vec![], 0.0).is_err());
        assert!(LogisticRegression::new(vec![f64::NAN], 0.0).is_err());
        assert!(LogisticRegression::new(vec![1.0], f64::INFINITY).is_err());
    }
}
