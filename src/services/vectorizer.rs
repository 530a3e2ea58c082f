//! Bag-of-words count vectors over a shared corpus vocabulary.

use std::collections::{BTreeMap, BTreeSet};

/// Tokens shorter than this many characters are ignored
pub const MIN_TOKEN_CHARS: usize = 2;

/// Splits text into lowercase word tokens
///
/// A token is a maximal run of alphanumeric characters or `_`. Single-character
/// tokens are dropped, so `"Spider-Man: A"` yields `["spider", "man"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Sparse term-count vector
///
/// Entries are `(column, count)` pairs sorted by column with no zero counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountVector {
    dim: usize,
    entries: Vec<(usize, u32)>,
}

impl CountVector {
    /// Vocabulary size the vector is indexed against
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// True when the source blob produced no recognized tokens
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count for one column
    pub fn get(&self, column: usize) -> u32 {
        self.entries
            .binary_search_by_key(&column, |&(col, _)| col)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn dot(&self, other: &CountVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0u64;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_col, a_count) = self.entries[i];
            let (b_col, b_count) = other.entries[j];
            match a_col.cmp(&b_col) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += u64::from(a_count) * u64::from(b_count);
                    i += 1;
                    j += 1;
                }
            }
        }

        sum as f64
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, count)| f64::from(count) * f64::from(count))
            .sum::<f64>()
            .sqrt()
    }

    /// Dense representation with one slot per vocabulary term
    pub fn to_dense(&self) -> Vec<u32> {
        let mut dense = vec![0; self.dim];
        for &(column, count) in &self.entries {
            dense[column] = count;
        }
        dense
    }
}

/// Vocabulary shared by every vector of a corpus
///
/// Terms are ordered lexicographically; a term's column is its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorSpace {
    columns: BTreeMap<String, usize>,
}

impl VectorSpace {
    /// Learns the vocabulary from every blob in the corpus
    pub fn fit<S: AsRef<str>>(blobs: &[S]) -> Self {
        let terms: BTreeSet<String> = blobs
            .iter()
            .flat_map(|blob| tokenize(blob.as_ref()))
            .collect();

        let columns = terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term, column))
            .collect();

        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    /// Terms in column order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Counts the blob's tokens against this vocabulary
    ///
    /// Tokens outside the vocabulary are ignored.
    pub fn transform(&self, blob: &str) -> CountVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in tokenize(blob) {
            if let Some(column) = self.column_of(&token) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }

        CountVector {
            dim: self.len(),
            entries: counts.into_iter().collect(),
        }
    }
}

/// Builds the vocabulary from the whole corpus and vectorizes every blob
///
/// The returned vectors have the same length and order as `blobs`.
pub fn fit_transform<S: AsRef<str>>(blobs: &[S]) -> (VectorSpace, Vec<CountVector>) {
    let space = VectorSpace::fit(blobs);
    let vectors = blobs
        .iter()
        .map(|blob| space.transform(blob.as_ref()))
        .collect();

    tracing::debug!(
        documents = blobs.len(),
        vocabulary = space.len(),
        "Vectorized corpus"
    );

    (space, vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Spider-Man: Into the Spider-Verse"),
            vec!["spider", "man", "into", "the", "spider", "verse"]
        );
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert_eq!(tokenize("a I go x2"), vec!["go", "x2"]);
    }

    #[test]
    fn test_tokenize_keeps_underscores_and_unicode() {
        assert_eq!(tokenize("sci_fi Amélie"), vec!["sci_fi", "amélie"]);
    }

    #[test]
    fn test_vocabulary_is_lexicographic_and_shared() {
        let blobs = vec!["dog cat", "bird dog", "cat bird bird"];
        let (space, vectors) = fit_transform(&blobs);

        assert_eq!(space.terms().collect::<Vec<_>>(), vec!["bird", "cat", "dog"]);
        assert_eq!(vectors.len(), 3);
        assert!(vectors.iter().all(|v| v.dim() == 3));
        assert_eq!(vectors[0].to_dense(), vec![0, 1, 1]);
        assert_eq!(vectors[1].to_dense(), vec![1, 0, 1]);
        assert_eq!(vectors[2].to_dense(), vec![2, 1, 0]);
    }

    #[test]
    fn test_counts_repeated_terms() {
        let (space, vectors) = fit_transform(&["Action action ACTION hero"]);
        let action = space.column_of("action").unwrap();

        assert_eq!(vectors[0].get(action), 3);
        assert_eq!(vectors[0].get(space.column_of("hero").unwrap()), 1);
    }

    #[test]
    fn test_empty_corpus_yields_empty_vocabulary() {
        let blobs: Vec<String> = Vec::new();
        let (space, vectors) = fit_transform(&blobs);

        assert!(space.is_empty());
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_blank_blob_is_zero_vector() {
        let (_, vectors) = fit_transform(&["drama", "   "]);
        assert!(!vectors[0].is_zero());
        assert!(vectors[1].is_zero());
        assert_eq!(vectors[1].norm(), 0.0);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let space = VectorSpace::fit(&["space opera"]);
        let vector = space.transform("space western");

        assert_eq!(vector.entries(), &[(space.column_of("space").unwrap(), 1)]);
    }

    #[test]
    fn test_dot_and_norm() {
        let (_, vectors) = fit_transform(&["a1 b1 b1", "b1 c1"]);

        assert_eq!(vectors[0].dot(&vectors[1]), 2.0);
        assert!((vectors[0].norm() - 5f64.sqrt()).abs() < 1e-12);
        assert!((vectors[1].norm() - 2f64.sqrt()).abs() < 1e-12);
    }
}
