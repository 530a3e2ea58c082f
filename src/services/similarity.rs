use crate::services::{recommender::RecommendError, vectorizer::CountVector};

/// Square, symmetric matrix of pairwise cosine similarities
///
/// Row and column `i` both refer to corpus row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between rows `i` and `j`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of range");
        self.values[i * self.size + j]
    }

    /// All similarities of row `i`, indexed by column
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

/// Cosine similarity between two count vectors
///
/// Returns 0.0 when either vector is zero. Counts are non-negative, so the
/// result lies in [0.0, 1.0]; it is clamped to absorb rounding.
pub fn cosine_similarity(a: &CountVector, b: &CountVector) -> Result<f64, RecommendError> {
    if a.dim() != b.dim() {
        return Err(RecommendError::DimensionMismatch {
            expected: a.dim(),
            found: b.dim(),
        });
    }

    Ok(cosine_with_norms(a, a.norm(), b, b.norm()))
}

fn cosine_with_norms(a: &CountVector, norm_a: f64, b: &CountVector, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Computes the full pairwise similarity matrix
///
/// Only the upper triangle is computed and then mirrored, so `get(i, j)` and
/// `get(j, i)` are bit-identical. The diagonal is exactly 1.0 for non-zero
/// vectors and 0.0 for zero vectors.
pub fn similarity_matrix(vectors: &[CountVector]) -> Result<SimilarityMatrix, RecommendError> {
    let size = vectors.len();

    if let Some(first) = vectors.first() {
        if let Some(bad) = vectors.iter().find(|v| v.dim() != first.dim()) {
            return Err(RecommendError::DimensionMismatch {
                expected: first.dim(),
                found: bad.dim(),
            });
        }
    }

    let norms: Vec<f64> = vectors.iter().map(CountVector::norm).collect();
    let mut values = vec![0.0; size * size];

    for i in 0..size {
        values[i * size + i] = if vectors[i].is_zero() { 0.0 } else { 1.0 };

        for j in (i + 1)..size {
            let score = cosine_with_norms(&vectors[i], norms[i], &vectors[j], norms[j]);
            values[i * size + j] = score;
            values[j * size + i] = score;
        }
    }

    tracing::debug!(size, "Computed similarity matrix");

    Ok(SimilarityMatrix { size, values })
}
