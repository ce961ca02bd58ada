//! TF-IDF vectorizer restored from a fitted artifact
//!
//! The artifact carries the learned vocabulary and idf weights. Transforming
//! text extracts tokens with the artifact's token pattern, builds n-grams,
//! counts in-vocabulary terms, applies idf weighting and normalizes.

use crate::artifact::read_artifact;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spamscore_core::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Sparse feature vector with entries sorted by index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a vector from `(index, value)` pairs.
    ///
    /// Pairs are sorted by index; duplicate indices are summed and zeros dropped.
    pub fn new(dim: usize, entries: impl IntoIterator<Item = (usize, f64)>) -> Result<Self> {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (index, value) in entries {
            if index >= dim {
                return Err(Error::vectorizer(format!(
                    "feature index {index} out of range for dimension {dim}"
                )));
            }
            *merged.entry(index).or_insert(0.0) += value;
        }

        Ok(Self {
            dim,
            entries: merged.into_iter().filter(|(_, v)| *v != 0.0).collect(),
        })
    }

    /// Vector with no non-zero entries
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Number of features (dense length)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Non-zero `(index, value)` pairs in index order
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product with a dense weight vector of the same dimension.
    ///
    /// Panics if `weights` is shorter than `dim`; classifiers check the
    /// dimension before calling this.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(index, value)| weights[*index] * value)
            .sum()
    }
}

/// Vector normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Euclidean norm
    #[default]
    L2,
    /// Sum of absolute values
    L1,
}

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,

    /// Regex selecting tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive range of n-gram lengths
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Use presence (1.0) instead of counts
    #[serde(default)]
    pub binary: bool,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Multiply term frequencies by idf
    #[serde(default = "default_true")]
    pub use_idf: bool,

    /// Normalization; `null` disables it
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF transformer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    lowercase: bool,
    binary: bool,
    sublinear_tf: bool,
    use_idf: bool,
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    /// Load a vectorizer artifact from a JSON or YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let artifact: VectorizerArtifact = read_artifact(path)?;
        Self::from_artifact(artifact)
    }

    /// Validate an artifact and compile its token pattern
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let n_features = artifact.idf.len();

        if artifact.vocabulary.len() != n_features {
            return Err(Error::vectorizer(format!(
                "vocabulary has {} terms but idf has {} weights",
                artifact.vocabulary.len(),
                n_features
            )));
        }

        if let Some((term, index)) = artifact
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= n_features)
        {
            return Err(Error::vectorizer(format!(
                "term '{term}' maps to index {index}, outside 0..{n_features}"
            )));
        }

        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err(Error::vectorizer("idf weights must be finite"));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::vectorizer(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            Error::vectorizer(format!(
                "invalid token_pattern '{}': {e}",
                artifact.token_pattern
            ))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            token_pattern,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
            binary: artifact.binary,
            sublinear_tf: artifact.sublinear_tf,
            use_idf: artifact.use_idf,
            norm: artifact.norm,
        })
    }

    /// Number of output features
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Feature index of a term, if it is in the vocabulary
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Split text into the terms the vocabulary is keyed by
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|gram| gram.join(" ")));
        }
        terms
    }

    /// Transform text into a weighted, normalized feature vector
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(index) = self.index_of(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + tf.ln()
                } else {
                    tf
                };
                let weight = if self.use_idf { tf * self.idf[index] } else { tf };
                (index, weight)
            })
            .collect();

        if let Some(norm) = self.norm {
            let magnitude = match norm {
                Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
                Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            };
            if magnitude > 0.0 {
                for (_, value) in &mut entries {
                    *value /= magnitude;
                }
            }
        }

        entries.retain(|(_, v)| *v != 0.0);

        SparseVector {
            dim: self.n_features(),
            entries,
        }
    }
}
