use serde::Serialize;

/// One ranked entry in a recommendation list
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    /// 1-based position in the list
    pub rank: usize,
    /// Corpus row the entry refers to
    #[serde(skip)]
    pub row: usize,
    pub title: String,
    /// Cosine similarity to the query movie, in [0.0, 1.0]
    pub score: f64,
}

impl Recommendation {
    /// Similarity as a percentage with one decimal, e.g. `87.5%`
    pub fn similarity_percent(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }

    /// Single display line, e.g. `1. Avatar 2 (Similarity: 100.0%)`
    pub fn display_line(&self) -> String {
        format!(
            "{}. {} (Similarity: {})",
            self.rank,
            self.title,
            self.similarity_percent()
        )
    }
}

/// Result of a recommendation query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationSet {
    /// Query as supplied by the caller, trimmed
    pub query: String,
    /// Corpus title the query resolved to
    pub matched_title: String,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Titles in ranked order
    pub fn titles(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.title.as_str()).collect()
    }
}
