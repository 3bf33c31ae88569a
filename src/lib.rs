//! # corpus_embed
//!
//! Turns a bag-of-words corpus into low-dimensional document coordinates.
//!
//! - [`corpus`]: sparse document/vocabulary model with cached document-term, IDF and TF-IDF views
//! - [`embeddings`]: read-only word-vector table supplied by an embedding collaborator
//! - [`vectorize`]: dense feature matrices from a corpus (raw counts, TF-IDF, averaged word vectors)
//! - [`dimred`]: covariance-eigendecomposition PCA and the [`dimred::Reducer`] seam for external reducers
//! - [`output`]: reduced coordinates paired with the corpus document order

pub mod corpus;
mod dense;
pub mod dimred;
pub mod embeddings;
mod error;
pub mod output;
mod utils;
pub mod vectorize;

pub use corpus::{BuildReport, Corpus, CorpusBuilder, DocId, WordId};
pub use dimred::pca::{Pca, PcaBuilder};
pub use dimred::Reducer;
pub use embeddings::WordVectors;
pub use error::{Error, Result};
pub use output::DocumentEmbedding;
pub use utils::{Covariance, FloatOps, Standardize};
pub use vectorize::{vectorize, FeatureMode};
