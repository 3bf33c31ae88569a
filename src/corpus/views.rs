//! Dense views derived from a [`Corpus`]. Each view is materialized at most once per corpus
//! and handed out by reference afterwards. Rows follow document order, columns follow
//! vocabulary order.

use log::debug;
use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;

use super::Corpus;
use crate::error::{Error, Result};

/// Per-word document frequency and its inverse, `ln(num_docs / df)`.
#[derive(Debug, Clone)]
pub struct InverseDocumentFrequency {
    document_frequency: Array1<usize>,
    idf: Array1<f64>,
}

impl InverseDocumentFrequency {
    pub fn document_frequency(&self) -> &Array1<usize> {
        &self.document_frequency
    }

    pub fn idf(&self) -> &Array1<f64> {
        &self.idf
    }
}

impl Corpus {
    /// Raw counts, `num_docs × vocab_size`.
    pub fn document_term_matrix(&self) -> &Array2<f64> {
        self.document_term
            .get_or_init(|| self.compute_document_term_matrix())
    }

    pub fn inverse_document_frequency(&self) -> Result<&InverseDocumentFrequency> {
        if let Some(idf) = self.idf.get() {
            return Ok(idf);
        }
        let computed = self.compute_inverse_document_frequency()?;
        Ok(self.idf.get_or_init(|| computed))
    }

    pub fn idf_vector(&self) -> Result<&Array1<f64>> {
        Ok(self.inverse_document_frequency()?.idf())
    }

    /// Number of documents containing `word`, or `None` for words outside the vocabulary.
    pub fn document_frequency(&self, word: &str) -> Result<Option<usize>> {
        let df = self.inverse_document_frequency()?.document_frequency();
        Ok(self
            .word_id(word)
            .and_then(|id| self.column_of(id))
            .map(|column| df[column]))
    }

    /// Document-term matrix with every column scaled by its word's IDF.
    pub fn tfidf_matrix(&self) -> Result<&Array2<f64>> {
        if let Some(tfidf) = self.tfidf.get() {
            return Ok(tfidf);
        }
        let idf = self.idf_vector()?;
        let computed = self.document_term_matrix() * idf;
        Ok(self.tfidf.get_or_init(|| computed))
    }

    fn compute_document_term_matrix(&self) -> Array2<f64> {
        debug!(
            "Materializing {}x{} document-term matrix for '{}'",
            self.len(),
            self.vocab_size(),
            self.name
        );
        let mut matrix = Array2::zeros((self.len(), self.vocab_size()));
        matrix
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(self.documents.par_values())
            .for_each(|(mut row, counts)| {
                for (word_id, &count) in counts {
                    if let Some(column) = self.vocabulary.get_index_of(word_id) {
                        row[column] = f64::from(count);
                    }
                }
            });
        matrix
    }

    fn compute_inverse_document_frequency(&self) -> Result<InverseDocumentFrequency> {
        let mut document_frequency = Array1::<usize>::zeros(self.vocab_size());
        for counts in self.documents.values() {
            for word_id in counts.keys() {
                if let Some(column) = self.vocabulary.get_index_of(word_id) {
                    document_frequency[column] += 1;
                }
            }
        }

        if let Some(column) = document_frequency.iter().position(|&df| df == 0) {
            let word = self
                .vocabulary
                .get_index(column)
                .map(|(_, word)| word.clone())
                .unwrap_or_default();
            return Err(Error::InconsistentVocabulary { word });
        }

        let num_docs = self.len() as f64;
        let idf = document_frequency.mapv(|df| (num_docs / df as f64).ln());
        Ok(InverseDocumentFrequency {
            document_frequency,
            idf,
        })
    }
}
