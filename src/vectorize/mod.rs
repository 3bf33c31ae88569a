//! # Document Vectorizer
//!
//! Dense feature matrix for a [`Corpus`], one row per document in corpus order. The count
//! and TF-IDF modes hand out the corpus' cached views as they are; the word-vector mode
//! averages word vectors weighted by word counts.

use std::borrow::Cow;

use log::info;
use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::corpus::{Corpus, DocId, WordCounts};
use crate::embeddings::WordVectors;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub enum FeatureMode<'a> {
    /// Raw document-term counts.
    Counts,
    TfIdf,
    /// Count-weighted average of the documents' word vectors.
    WordVectors(&'a WordVectors),
}

/// Feature matrix of `corpus`, `num_docs × features`.
pub fn vectorize<'c>(corpus: &'c Corpus, mode: FeatureMode<'_>) -> Result<Cow<'c, Array2<f64>>> {
    match mode {
        FeatureMode::Counts => Ok(Cow::Borrowed(corpus.document_term_matrix())),
        FeatureMode::TfIdf => Ok(Cow::Borrowed(corpus.tfidf_matrix()?)),
        FeatureMode::WordVectors(vectors) => {
            Ok(Cow::Owned(average_word_vectors(corpus, vectors)?))
        }
    }
}

/// `sum(count_w * vector_w) / sum(count_w)` for every document. Fails on the first document
/// holding a word without a vector; no partial matrix is returned.
pub fn average_word_vectors(corpus: &Corpus, vectors: &WordVectors) -> Result<Array2<f64>> {
    info!(
        "Averaging {}-dimensional word vectors over {} documents",
        vectors.dim(),
        corpus.len()
    );
    let documents: Vec<(DocId, &WordCounts)> = corpus.documents().collect();

    let mut matrix = Array2::zeros((documents.len(), vectors.dim()));
    matrix
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(documents.par_iter())
        .try_for_each(|(row, &(doc_id, counts))| {
            let mut words = Vec::with_capacity(counts.len());
            for (&word_id, &count) in counts {
                let word = corpus.word(word_id).ok_or_else(|| Error::UnknownWord {
                    doc_id,
                    word: word_id.to_string(),
                })?;
                words.push((word, count));
            }
            weighted_average(doc_id, words, vectors, row)
        })?;

    Ok(matrix)
}

fn weighted_average<'w, I>(
    doc_id: DocId,
    words: I,
    vectors: &WordVectors,
    mut row: ArrayViewMut1<f64>,
) -> Result<()>
where
    I: IntoIterator<Item = (&'w str, u32)>,
{
    let mut total: u64 = 0;
    for (word, count) in words {
        let vector = vectors.get(word).ok_or_else(|| Error::UnknownWord {
            doc_id,
            word: word.to_owned(),
        })?;
        row.scaled_add(f64::from(count), &vector);
        total += u64::from(count);
    }

    if total == 0 {
        return Err(Error::EmptyDocument { doc_id });
    }
    row /= total as f64;
    Ok(())
}
