use std::io::Write;

use log::info;
use ndarray::{Array2, ArrayView1};

use crate::corpus::{Corpus, DocId};
use crate::error::{Error, Result};

/// Reduced coordinates, one row per document, paired with the corpus document order.
#[derive(Debug, Clone)]
pub struct DocumentEmbedding {
    doc_ids: Vec<DocId>,
    coordinates: Array2<f64>,
}

impl DocumentEmbedding {
    pub fn new(corpus: &Corpus, coordinates: Array2<f64>) -> Result<Self> {
        if coordinates.nrows() != corpus.len() {
            return Err(Error::DimensionMismatch {
                expected: corpus.len(),
                found: coordinates.nrows(),
            });
        }
        Ok(DocumentEmbedding {
            doc_ids: corpus.document_ids().collect(),
            coordinates,
        })
    }

    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    pub fn coordinates(&self) -> &Array2<f64> {
        &self.coordinates
    }

    pub fn dims(&self) -> usize {
        self.coordinates.ncols()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, ArrayView1<'_, f64>)> + '_ {
        self.doc_ids
            .iter()
            .copied()
            .zip(self.coordinates.rows())
    }

    /// Writes one `docId dim1 dim2 ... dimN` line per document. Coordinates always carry a
    /// decimal point, so whole values print as `2.0`.
    pub fn write_lines<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for (doc_id, row) in self.iter() {
            write!(writer, "{}", doc_id)?;
            for value in row {
                write!(writer, " {:?}", value)?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        info!("Wrote {} document embeddings", self.doc_ids.len());
        Ok(())
    }
}
