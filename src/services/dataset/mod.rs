//! Dataset sources for the recommendation corpus.
//!
//! A source produces the full, ordered list of movie records. The service and
//! the prompt both load through [`MovieSource`] so a reload re-reads the same
//! source.

use crate::{error::AppResult, models::MovieRecord};

pub mod csv_file;

pub use csv_file::CsvFileSource;

/// Trait for movie dataset providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieSource: Send + Sync {
    /// Loads every movie record, in corpus order
    async fn load_movies(&self) -> AppResult<Vec<MovieRecord>>;

    /// Human-readable description for logging and stats
    fn describe(&self) -> String;
}

/// Source backed by records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    movies: Vec<MovieRecord>,
}

impl InMemorySource {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }
}

#[async_trait::async_trait]
impl MovieSource for InMemorySource {
    async fn load_movies(&self) -> AppResult<Vec<MovieRecord>> {
        Ok(self.movies.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} movies)", self.movies.len())
    }
}
