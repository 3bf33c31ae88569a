//! Read-only table of pretrained word vectors (e.g. GloVe), as supplied by an embedding loader.

use std::collections::HashMap;

use log::{debug, info};
use ndarray::{Array1, ArrayView1};

use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// Word to fixed-dimension vector mapping.
#[derive(Debug, Clone)]
pub struct WordVectors {
    dim: usize,
    vectors: HashMap<String, Array1<f64>>,
}

impl WordVectors {
    pub fn new(dim: usize) -> Self {
        WordVectors {
            dim,
            vectors: HashMap::new(),
        }
    }

    /// Builds a table from `(word, vector)` pairs. The dimension is taken from the first
    /// vector; every other vector must match it.
    pub fn from_pairs<I, S, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Array1<f64>>,
    {
        let mut table = WordVectors::new(0);
        for (i, (word, vector)) in pairs.into_iter().enumerate() {
            let vector = vector.into();
            if i == 0 {
                table.dim = vector.len();
            }
            table.insert(word, vector)?;
        }
        debug!("Loaded {} word vectors of dimension {}", table.len(), table.dim);
        Ok(table)
    }

    pub fn insert(&mut self, word: impl Into<String>, vector: Array1<f64>) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                found: vector.len(),
            });
        }
        self.vectors.insert(word.into(), vector);
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<ArrayView1<'_, f64>> {
        self.vectors.get(word).map(|v| v.view())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Known words, usable as a vocabulary filter when building a corpus.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.vectors.keys().map(String::as_str)
    }

    /// Vocabulary words of `corpus` without a vector, in vocabulary order.
    pub fn missing_words<'c>(&self, corpus: &'c Corpus) -> Vec<&'c str> {
        let missing: Vec<&str> = corpus
            .vocabulary()
            .filter(|word| !self.contains(word))
            .collect();
        for word in &missing {
            debug!("Word '{}' not in embeddings", word);
        }
        info!(
            "Missing {} embeddings out of {} words",
            missing.len(),
            corpus.vocab_size()
        );
        missing
    }
}
