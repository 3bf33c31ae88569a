//! # Corpus Model
//!
//! Sparse bag-of-words relation between documents and a vocabulary. A [`Corpus`] is built
//! once from `(doc_id, word_id, count)` records and is immutable afterwards, apart from the
//! derived dense views in [`views`] which are computed on first access and cached.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use log::{debug, info, warn};
use ndarray::Array2;

use crate::error::{Error, Result};

mod views;

pub use views::InverseDocumentFrequency;

pub type DocId = u32;
pub type WordId = u32;

/// Word counts of a single document, in first-seen word order. Counts are always positive.
pub type WordCounts = IndexMap<WordId, u32>;

/// Diagnostics collected while building a [`Corpus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Vocabulary words rejected by the vocabulary filter.
    pub filtered_words: usize,
    /// Vocabulary words left without a single occurrence after filtering.
    pub removed_words: usize,
    /// Records referencing a word id outside the vocabulary.
    pub dropped_records: usize,
    /// Records carrying a count of zero.
    pub zero_count_records: usize,
}

pub struct CorpusBuilder {
    name: String,
    declared_documents: Option<usize>,
    vocabulary: IndexMap<WordId, String>,
    records: Vec<(DocId, WordId, u32)>,
    vocabulary_filter: Option<HashSet<String>>,
}

impl CorpusBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        CorpusBuilder {
            name: name.into(),
            declared_documents: None,
            vocabulary: IndexMap::new(),
            records: Vec::new(),
            vocabulary_filter: None,
        }
    }

    /// Number of documents announced by the corpus source. Only used for diagnostics,
    /// the corpus itself counts the documents that keep at least one record.
    pub fn declared_documents(mut self, num_documents: usize) -> Self {
        self.declared_documents = Some(num_documents);
        self
    }

    /// Word-id to word mapping. Iteration order becomes the column order of every view.
    pub fn vocabulary<I, S>(mut self, id_to_word: I) -> Self
    where
        I: IntoIterator<Item = (WordId, S)>,
        S: Into<String>,
    {
        self.vocabulary
            .extend(id_to_word.into_iter().map(|(id, word)| (id, word.into())));
        self
    }

    pub fn records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = (DocId, WordId, u32)>,
    {
        self.records.extend(records);
        self
    }

    /// Restrict the vocabulary to a known word set, typically the keys of a word-vector table.
    pub fn vocabulary_filter<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocabulary_filter = Some(words.into_iter().map(|w| w.as_ref().to_owned()).collect());
        self
    }

    pub fn build(self) -> Result<Corpus> {
        let CorpusBuilder {
            name,
            declared_documents,
            mut vocabulary,
            records,
            vocabulary_filter,
        } = self;
        let mut report = BuildReport::default();

        if let Some(filter) = &vocabulary_filter {
            let original_size = vocabulary.len();
            vocabulary.retain(|_, word| filter.contains(word.as_str()));
            report.filtered_words = original_size - vocabulary.len();
            info!(
                "Filtered out {}/{} words from the corpus vocabulary",
                report.filtered_words, original_size
            );
        }

        let mut documents: IndexMap<DocId, WordCounts> = IndexMap::new();
        for (doc_id, word_id, count) in records {
            if count == 0 {
                report.zero_count_records += 1;
                continue;
            }
            if !vocabulary.contains_key(&word_id) {
                report.dropped_records += 1;
                continue;
            }
            // repeated (doc, word) pairs: the last record wins
            documents.entry(doc_id).or_default().insert(word_id, count);
        }
        if report.zero_count_records > 0 {
            warn!("Skipped {} records with a zero count", report.zero_count_records);
        }
        if report.dropped_records > 0 {
            debug!(
                "Dropped {} records referencing words outside the vocabulary",
                report.dropped_records
            );
        }

        let occurring: HashSet<WordId> = documents
            .values()
            .flat_map(|counts| counts.keys().copied())
            .collect();
        let before_removal = vocabulary.len();
        vocabulary.retain(|id, _| occurring.contains(id));
        report.removed_words = before_removal - vocabulary.len();
        if report.removed_words > 0 {
            info!(
                "Removed {} vocabulary words without occurrences",
                report.removed_words
            );
        }

        let mut word_to_id = HashMap::with_capacity(vocabulary.len());
        for (&id, word) in &vocabulary {
            if word_to_id.insert(word.clone(), id).is_some() {
                return Err(Error::DuplicateWord { word: word.clone() });
            }
        }

        if let Some(declared) = declared_documents {
            if declared != documents.len() {
                warn!(
                    "Corpus '{}' declares {} documents but {} have retained words",
                    name,
                    declared,
                    documents.len()
                );
            }
        }

        let corpus = Corpus {
            name,
            vocabulary,
            word_to_id,
            documents,
            report,
            document_term: OnceLock::new(),
            idf: OnceLock::new(),
            tfidf: OnceLock::new(),
        };
        info!("Loaded corpus: {}", corpus);
        Ok(corpus)
    }
}

/// A named collection of bag-of-words documents over a fixed vocabulary.
///
/// Every word id in a document has a vocabulary entry and every vocabulary entry occurs in
/// at least one document. Document order and vocabulary order are fixed at construction and
/// shared by all derived views.
pub struct Corpus {
    name: String,
    vocabulary: IndexMap<WordId, String>,
    word_to_id: HashMap<String, WordId>,
    documents: IndexMap<DocId, WordCounts>,
    report: BuildReport,
    document_term: OnceLock<Array2<f64>>,
    idf: OnceLock<InverseDocumentFrequency>,
    tfidf: OnceLock<Array2<f64>>,
}

impl Corpus {
    /// Builds a corpus from a word-id mapping and `(doc_id, word_id, count)` records.
    pub fn build<I, S, R>(
        name: impl Into<String>,
        num_documents: usize,
        id_to_word: I,
        records: R,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (WordId, S)>,
        S: Into<String>,
        R: IntoIterator<Item = (DocId, WordId, u32)>,
    {
        CorpusBuilder::new(name)
            .declared_documents(num_documents)
            .vocabulary(id_to_word)
            .records(records)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of documents, which is also the row count of every derived view.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn build_report(&self) -> &BuildReport {
        &self.report
    }

    /// Vocabulary words in column order.
    pub fn vocabulary(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.vocabulary.values().map(String::as_str)
    }

    /// Document ids in row order.
    pub fn document_ids(&self) -> impl ExactSizeIterator<Item = DocId> + '_ {
        self.documents.keys().copied()
    }

    /// Documents with their word counts, in row order.
    pub fn documents(&self) -> impl ExactSizeIterator<Item = (DocId, &WordCounts)> + '_ {
        self.documents.iter().map(|(&id, counts)| (id, counts))
    }

    pub fn document(&self, doc_id: DocId) -> Option<&WordCounts> {
        self.documents.get(&doc_id)
    }

    pub fn word(&self, word_id: WordId) -> Option<&str> {
        self.vocabulary.get(&word_id).map(String::as_str)
    }

    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.word_to_id.get(word).copied()
    }

    /// Column of `word_id` in the derived views.
    pub fn column_of(&self, word_id: WordId) -> Option<usize> {
        self.vocabulary.get_index_of(&word_id)
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Corpus(name={}, num_docs={}, vocab_size={})",
            self.name,
            self.len(),
            self.vocab_size()
        )
    }
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn small_corpus() -> Corpus {
        Corpus::build(
            "small",
            3,
            vec![(1, "alpha"), (2, "beta"), (3, "gamma"), (4, "delta")],
            vec![(1, 1, 2), (1, 2, 1), (2, 1, 1), (2, 3, 3), (3, 4, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_build_keeps_record_order() {
        let corpus = small_corpus();

        assert_eq!(corpus.name(), "small");
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.vocab_size(), 4);
        assert_eq!(corpus.document_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            corpus.vocabulary().collect::<Vec<_>>(),
            vec!["alpha", "beta", "gamma", "delta"]
        );
        assert_eq!(corpus.document(2).unwrap().get(&3), Some(&3));
        assert_eq!(corpus.word(4), Some("delta"));
        assert_eq!(corpus.word_id("gamma"), Some(3));
        assert_eq!(*corpus.build_report(), BuildReport::default());
        assert_eq!(
            corpus.to_string(),
            "Corpus(name=small, num_docs=3, vocab_size=4)"
        );
    }

    #[test]
    fn test_document_order_follows_first_appearance() {
        let corpus = Corpus::build(
            "unordered",
            3,
            vec![(10, "x"), (20, "y")],
            vec![(7, 10, 1), (3, 20, 2), (7, 20, 1), (5, 10, 4)],
        )
        .unwrap();

        assert_eq!(corpus.document_ids().collect::<Vec<_>>(), vec![7, 3, 5]);
    }

    #[test]
    fn test_last_record_wins() {
        let corpus = Corpus::build(
            "dupes",
            1,
            vec![(1, "a")],
            vec![(1, 1, 2), (1, 1, 5)],
        )
        .unwrap();

        assert_eq!(corpus.document(1).unwrap().get(&1), Some(&5));
        assert_eq!(corpus.document(1).unwrap().len(), 1);
    }

    #[test]
    fn test_unused_words_are_removed() {
        let corpus = Corpus::build(
            "sparse",
            2,
            vec![(1, "used"), (2, "unused"), (3, "also_used")],
            vec![(1, 1, 1), (2, 3, 2)],
        )
        .unwrap();

        assert_eq!(corpus.vocab_size(), 2);
        assert_eq!(corpus.build_report().removed_words, 1);
        assert_eq!(corpus.word_id("unused"), None);
        assert_eq!(
            corpus.vocabulary().collect::<Vec<_>>(),
            vec!["used", "also_used"]
        );
    }

    #[test]
    fn test_vocabulary_filter_drops_records_and_documents() {
        let corpus = CorpusBuilder::new("filtered")
            .declared_documents(3)
            .vocabulary(vec![(1, "cat"), (2, "dog"), (3, "zzyzx")])
            .records(vec![(1, 1, 1), (1, 3, 2), (2, 3, 4), (3, 2, 1)])
            .vocabulary_filter(["cat", "dog"])
            .build()
            .unwrap();

        let report = corpus.build_report();
        assert_eq!(report.filtered_words, 1);
        assert_eq!(report.dropped_records, 2);
        assert_eq!(report.removed_words, 0);
        // document 2 only contained the filtered word
        assert_eq!(corpus.document_ids().collect::<Vec<_>>(), vec![1, 3]);
        assert!(corpus.document(2).is_none());
    }

    #[test]
    fn test_zero_counts_are_skipped() {
        let corpus = Corpus::build(
            "zeros",
            2,
            vec![(1, "a"), (2, "b")],
            vec![(1, 1, 0), (1, 2, 3), (2, 2, 1)],
        )
        .unwrap();

        assert_eq!(corpus.build_report().zero_count_records, 1);
        assert_eq!(corpus.build_report().removed_words, 1);
        assert!(corpus.documents().all(|(_, counts)| counts.values().all(|&c| c > 0)));
    }

    #[test]
    fn test_duplicate_word_is_rejected() {
        let result = Corpus::build(
            "dup",
            1,
            vec![(1, "same"), (2, "same")],
            vec![(1, 1, 1), (1, 2, 1)],
        );

        assert!(matches!(result, Err(Error::DuplicateWord { word }) if word == "same"));
    }

    #[test]
    fn test_every_document_word_is_in_vocabulary() {
        let corpus = small_corpus();
        for (_, counts) in corpus.documents() {
            for word_id in counts.keys() {
                assert!(corpus.column_of(*word_id).is_some());
            }
        }
    }
}
