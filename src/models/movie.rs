use serde::{Deserialize, Serialize};

/// A single movie as it appears in the corpus
///
/// Records are immutable once loaded. Metadata fields that were missing in the
/// source are stored as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    /// Identifier from the dataset (row position when the dataset has none)
    pub id: i64,
    /// Display title, used for lookups
    pub title: String,
    /// Free-text plot keywords
    #[serde(default)]
    pub keywords: String,
    /// Space-separated lead cast names
    #[serde(default)]
    pub cast: String,
    /// Space-separated genre names
    #[serde(default)]
    pub genres: String,
    /// Director name
    #[serde(default)]
    pub director: String,
}

impl MovieRecord {
    /// Creates a record with only an id and title; metadata starts empty
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            keywords: String::new(),
            cast: String::new(),
            genres: String::new(),
            director: String::new(),
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = cast.into();
        self
    }

    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = genres.into();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }
}
