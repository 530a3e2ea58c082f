use thiserror::Error;

use crate::{
    models::{MovieRecord, Recommendation, RecommendationSet},
    services::{
        features,
        similarity::{self, SimilarityMatrix},
        vectorizer::{self, VectorSpace},
    },
};

/// Error types for the recommendation engine
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Movie '{0}' not found in the database.")]
    NotFound(String),
    #[error("Cannot build recommendations from an empty corpus")]
    EmptyCorpus,
    #[error("Invalid query: {0}")]
    Validation(String),
    #[error("Vector dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// How a query string is matched against corpus titles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleMatch {
    /// Case-insensitive exact match only
    #[default]
    Exact,
    /// Exact match first, then the first title containing the query
    Partial,
}

/// Content-based recommender over an immutable corpus
///
/// Building runs the whole pipeline once: compose feature blobs, fit the
/// vocabulary, vectorize, and compute the similarity matrix. Queries are
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Vec<MovieRecord>,
    folded_titles: Vec<String>,
    vocabulary: VectorSpace,
    matrix: SimilarityMatrix,
    title_match: TitleMatch,
}

impl Recommender {
    /// Builds the recommender from a corpus snapshot
    pub fn build(corpus: Vec<MovieRecord>) -> Result<Self, RecommendError> {
        if corpus.is_empty() {
            return Err(RecommendError::EmptyCorpus);
        }

        let blobs = features::compose_corpus(&corpus);
        let (vocabulary, vectors) = vectorizer::fit_transform(&blobs);
        let matrix = similarity::similarity_matrix(&vectors)?;

        let zero_vectors = vectors.iter().filter(|v| v.is_zero()).count();
        if zero_vectors > 0 {
            tracing::warn!(
                zero_vectors,
                "Some movies have no usable metadata and will score 0.0 against everything"
            );
        }

        let folded_titles = corpus.iter().map(|m| m.title.to_lowercase()).collect();

        Ok(Self {
            corpus,
            folded_titles,
            vocabulary,
            matrix,
            title_match: TitleMatch::default(),
        })
    }

    /// Sets the title matching strategy
    pub fn with_title_match(mut self, title_match: TitleMatch) -> Self {
        self.title_match = title_match;
        self
    }

    pub fn title_match(&self) -> TitleMatch {
        self.title_match
    }

    pub fn corpus(&self) -> &[MovieRecord] {
        &self.corpus
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn vocabulary(&self) -> &VectorSpace {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Resolves a query title to its corpus row
    ///
    /// Duplicate titles resolve to the first matching row.
    pub fn resolve(&self, query: &str) -> Result<usize, RecommendError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RecommendError::Validation(
                "movie title must not be blank".to_string(),
            ));
        }

        let folded = query.to_lowercase();
        let exact = self.folded_titles.iter().position(|t| *t == folded);

        let found = match (exact, self.title_match) {
            (Some(row), _) => Some(row),
            (None, TitleMatch::Partial) => {
                self.folded_titles.iter().position(|t| t.contains(&folded))
            }
            (None, TitleMatch::Exact) => None,
        };

        found.ok_or_else(|| RecommendError::NotFound(query.to_string()))
    }

    /// Returns up to `top_n` movies most similar to `query_title`
    ///
    /// The query's own row is never included. Ties are broken by corpus order.
    pub fn recommend(
        &self,
        query_title: &str,
        top_n: usize,
    ) -> Result<RecommendationSet, RecommendError> {
        if top_n == 0 {
            return Err(RecommendError::Validation(
                "top_n must be a positive integer".to_string(),
            ));
        }

        let row = self.resolve(query_title)?;
        let recommendations = self.similar_to_row(row, top_n);

        tracing::debug!(
            query = %query_title.trim(),
            matched_row = row,
            returned = recommendations.len(),
            "Ranked recommendations"
        );

        Ok(RecommendationSet {
            query: query_title.trim().to_string(),
            matched_title: self.corpus[row].title.clone(),
            recommendations,
        })
    }

    /// Ranks every other row against `row`
    fn similar_to_row(&self, row: usize, top_n: usize) -> Vec<Recommendation> {
        let mut ranked: Vec<(usize, f64)> = self
            .matrix
            .row(row)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .collect();

        // Stable sort keeps ascending row order among equal scores
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .take(top_n)
            .enumerate()
            .map(|(position, (other, score))| Recommendation {
                rank: position + 1,
                row: other,
                title: self.corpus[other].title.clone(),
                score,
            })
            .collect()
    }
}
