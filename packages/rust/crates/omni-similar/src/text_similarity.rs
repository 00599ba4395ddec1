//! TF-IDF vector space over ingredient token lists.
//!
//! **Weighting:**
//! ```text
//! tfidf(t, d) = tf(t, d) × idf(t)
//! tf(t, d)    = count of t in d
//! idf(t)      = ln((1 + N) / (1 + df(t))) + 1
//! ```
//! Document and query vectors are L2-normalized, so cosine similarity is a
//! sparse dot product. Documents are stored as per-term posting lists and a
//! query only touches the postings of its own terms.

use std::collections::HashMap;

use crate::error::{Result, SimilarError};
use crate::ranker::{ScoreRow, ScoreTable};
use crate::types::CandidatePool;

/// Sparse vector: `(term index, weight)` sorted by term index.
pub type SparseVector = Vec<(usize, f64)>;

/// Vocabulary, IDF weights and normalized document vectors fit on a corpus.
///
/// Read-only after [`VectorSpaceModel::fit`]; safe to share across queries.
#[derive(Debug, Clone)]
pub struct VectorSpaceModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    /// `postings[term]` = `(document, normalized weight)` in document order
    postings: Vec<Vec<(usize, f64)>>,
    n_documents: usize,
}

#[allow(clippy::cast_precision_loss)]
fn smooth_idf(n_documents: usize, document_frequency: usize) -> f64 {
    ((1.0 + n_documents as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
}

fn l2_normalize(vector: &mut SparseVector) {
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        vector.clear();
    } else {
        for (_, w) in vector.iter_mut() {
            *w /= norm;
        }
    }
}

/// Raw term counts for the tokens the vocabulary knows, sorted by term index.
fn term_counts<S: AsRef<str>>(
    tokens: &[S],
    mut lookup: impl FnMut(&str) -> Option<usize>,
) -> Vec<(usize, f64)> {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for token in tokens {
        if let Some(term) = lookup(token.as_ref()) {
            *counts.entry(term).or_insert(0.0) += 1.0;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_unstable_by_key(|&(term, _)| term);
    counts
}

impl VectorSpaceModel {
    /// Fit vocabulary and IDF on `documents` and store their vectors.
    ///
    /// Documents with no tokens are allowed and score `0.0` against anything.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::EmptyCorpus`] when `documents` is empty.
    pub fn fit<D: AsRef<[String]>>(documents: &[D]) -> Result<Self> {
        if documents.is_empty() {
            return Err(SimilarError::EmptyCorpus);
        }

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let counts: Vec<Vec<(usize, f64)>> = documents
            .iter()
            .map(|doc| {
                term_counts(doc.as_ref(), |token| {
                    let next = vocabulary.len();
                    Some(*vocabulary.entry(token.to_string()).or_insert(next))
                })
            })
            .collect();

        let mut document_frequency = vec![0_usize; vocabulary.len()];
        for doc in &counts {
            for &(term, _) in doc {
                document_frequency[term] += 1;
            }
        }
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| smooth_idf(documents.len(), df))
            .collect();

        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); vocabulary.len()];
        for (doc_idx, mut vector) in counts.into_iter().enumerate() {
            for (term, weight) in &mut vector {
                *weight *= idf[*term];
            }
            l2_normalize(&mut vector);
            for (term, weight) in vector {
                postings[term].push((doc_idx, weight));
            }
        }

        log::debug!(
            "VectorSpaceModel::fit: {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary,
            idf,
            postings,
            n_documents: documents.len(),
        })
    }

    /// Project tokens into the fitted space. Unseen tokens are dropped.
    #[must_use]
    pub fn transform<S: AsRef<str>>(&self, tokens: &[S]) -> SparseVector {
        let mut vector = term_counts(tokens, |token| self.vocabulary.get(token).copied());
        for (term, weight) in &mut vector {
            *weight *= self.idf[*term];
        }
        l2_normalize(&mut vector);
        vector
    }

    /// Cosine similarity of `query` against every document, in corpus order.
    ///
    /// A query sharing no vocabulary with a document scores `0.0` for it.
    #[must_use]
    pub fn score_query<S: AsRef<str>>(&self, query: &[S]) -> Vec<f64> {
        let mut scores = vec![0.0; self.n_documents];
        for (term, query_weight) in self.transform(query) {
            for &(doc, doc_weight) in &self.postings[term] {
                scores[doc] += query_weight * doc_weight;
            }
        }
        for score in &mut scores {
            *score = score.clamp(0.0, 1.0);
        }
        scores
    }

    /// IDF weight of a term, if it is in the vocabulary.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&t| self.idf[t])
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents fit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n_documents
    }

    /// Always false for a fitted model; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_documents == 0
    }
}

/// Fit a model over the pool's ingredient tokens and score `query` against it.
///
/// # Errors
///
/// Returns [`SimilarError::EmptyCorpus`] for an empty pool.
pub fn search_by_text<S: AsRef<str>>(pool: &CandidatePool, query: &[S]) -> Result<ScoreTable> {
    let documents: Vec<&[String]> = pool.items().iter().map(|item| item.text.as_slice()).collect();
    let model = VectorSpaceModel::fit(&documents)?;
    let scores = model.score_query(query);

    if scores.iter().all(|&s| s == 0.0) {
        log::warn!("search_by_text: query shares no vocabulary with the pool");
    }

    let rows = pool
        .items()
        .iter()
        .zip(scores)
        .map(|(item, score)| ScoreRow {
            id: item.id.clone(),
            name: item.name.clone(),
            score,
            detail: item.raw_text.clone(),
        })
        .collect();
    ScoreTable::new(rows)
}

/// Score the pool against the ingredient tokens of one of its own members.
///
/// The member stays in the corpus, so it appears in the result with its
/// self-similarity (1.0 unless its text is empty).
///
/// # Errors
///
/// Returns [`SimilarError::UnknownIdentifier`] if `id` is not in the pool.
pub fn search_by_document(pool: &CandidatePool, id: &str) -> Result<ScoreTable> {
    let pos = pool.position(id)?;
    search_by_text(pool, pool.items()[pos].text.as_slice())
}
