use crate::corpus::DocId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A retained vocabulary word occurs in no document.
    #[error("vocabulary word '{word}' has a document frequency of zero")]
    InconsistentVocabulary { word: String },

    #[error("document {doc_id} contains '{word}', which has no word vector")]
    UnknownWord { doc_id: DocId, word: String },

    #[error("document {doc_id} has a total word count of zero")]
    EmptyDocument { doc_id: DocId },

    #[error("cannot project onto {requested} components of {features} features")]
    InvalidComponentCount { requested: usize, features: usize },

    #[error("word '{word}' is mapped by more than one word id")]
    DuplicateWord { word: String },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("matrix has no rows")]
    EmptyMatrix,

    #[error("symmetric eigendecomposition did not converge")]
    EigenDecomposition,
}
