//! Scoring tests against the artifacts shipped in `models/`

use spamscore_classifiers::{score, ModelPaths, SpamModel};
use std::path::PathBuf;

const SPAM_TEXT: &str = "well done england get official poly ringtone colour flag yer mobile text tone flag optout txt eng stop box wwx £";

fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models")
}

fn load_model() -> SpamModel {
    let dir = models_dir();
    SpamModel::load(&ModelPaths {
        classifier_path: dir.join("best_model.json"),
        vectorizer_path: dir.join("vectorizer.json"),
    })
    .expect("shipped artifacts should load")
}

#[test]
fn test_score_smoke_test() {
    let model = load_model();
    assert!(score("Test message", &model, 0.5).is_ok());
}

#[test]
fn test_score_output_format() {
    let model = load_model();
    let result = score("Test message", &model, 0.5).unwrap();
    let json = serde_json::to_value(result).unwrap();

    assert!(json["prediction"].is_boolean());
    assert!(json["propensity"].is_f64());
}

#[test]
fn test_score_propensity_range() {
    let model = load_model();
    let result = score("Test message", &model, 0.5).unwrap();
    assert!((0.0..=1.0).contains(&result.propensity));
}

#[test]
fn test_threshold_zero() {
    let model = load_model();
    assert!(score("Test message", &model, 0.0).unwrap().prediction);
}

#[test]
fn test_threshold_one() {
    let model = load_model();
    assert!(!score("Test message", &model, 1.0).unwrap().prediction);
}

#[test]
fn test_obvious_spam_text() {
    let model = load_model();
    let result = score(SPAM_TEXT, &model, 0.5).unwrap();
    assert!(result.prediction);
    assert!(result.propensity > 0.5, "got {}", result.propensity);
}

#[test]
fn test_mis_encoded_spam_text() {
    let model = load_model();
    let text = SPAM_TEXT.replace('£', "Â£");
    assert!(score(&text, &model, 0.5).unwrap().prediction);
}

#[test]
fn test_obvious_non_spam_text() {
    let model = load_model();
    for text in ["Hi Mom, how are you today?", "Hi Mom, how are you doing today?"] {
        let result = score(text, &model, 0.5).unwrap();
        assert!(!result.prediction, "{text} was flagged");
        assert!(result.propensity <= 0.5);
    }
}

#[test]
fn test_empty_text() {
    let model = load_model();
    let result = score("", &model, 0.5).unwrap();
    assert!((0.0..=1.0).contains(&result.propensity));
}

#[test]
fn test_idempotent() {
    let model = load_model();
    let first = score(SPAM_TEXT, &model, 0.5).unwrap();
    let second = score(SPAM_TEXT, &model, 0.5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fingerprints_recorded() {
    let model = load_model();
    let fingerprints = model.fingerprints().expect("loaded from disk");
    assert_eq!(fingerprints.classifier_sha256.len(), 64);
    assert_ne!(fingerprints.classifier_sha256, fingerprints.vectorizer_sha256);
}

#[test]
fn test_missing_artifact_fails_to_load() {
    let dir = models_dir();
    let err = SpamModel::load(&ModelPaths {
        classifier_path: dir.join("does_not_exist.json"),
        vectorizer_path: dir.join("vectorizer.json"),
    })
    .unwrap_err();
    assert!(err.to_string().contains("does_not_exist.json"));
}
