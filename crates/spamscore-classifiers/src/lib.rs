//! spamscore Classifiers
//!
//! Everything between raw text and a spam probability:
//! - `preprocess`: fixed text normalization (lowercase, punctuation and digit
//!   stripping, stopword removal, lemmatization)
//! - `vectorizer`: TF-IDF transform restored from a fitted artifact
//! - `classifier`: the probabilistic classifier trait, implemented by
//!   logistic regression and multinomial naive Bayes
//! - `scoring`: the model handle and the `score` function
//!
//! Models are loaded once and are immutable afterwards, so a single
//! `SpamModel` can be shared across threads behind an `Arc`.

pub mod artifact;
pub mod classifier;
pub mod lemma;
pub mod logistic;
pub mod naive_bayes;
pub mod preprocess;
pub mod scoring;
pub mod vectorizer;

pub use artifact::{fingerprint, load_classifier, read_artifact, ClassifierArtifact};
pub use classifier::Classifier;
pub use logistic::LogisticRegression;
pub use naive_bayes::MultinomialNb;
pub use preprocess::preprocess;
pub use scoring::{score, ArtifactFingerprints, ModelPaths, SpamModel};
pub use vectorizer::{Norm, SparseVector, TfidfVectorizer, VectorizerArtifact};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::preprocess::preprocess;
    pub use crate::scoring::{score, ModelPaths, SpamModel};
    pub use crate::vectorizer::{SparseVector, TfidfVectorizer};
}
