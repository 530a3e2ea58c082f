use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::{
        dataset::MovieSource,
        recommender::{RecommendError, Recommender, TitleMatch},
    },
};

/// Immutable, fully built recommendation state for one dataset load
///
/// A snapshot is never modified after construction. Reloading the dataset
/// builds a new snapshot and replaces the old one wholesale.
#[derive(Debug)]
pub struct Snapshot {
    pub recommender: Recommender,
    pub built_at: DateTime<Utc>,
    /// Description of the source the corpus came from
    pub source: String,
}

/// Summary of a snapshot, as reported by the stats endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotStats {
    pub movie_count: usize,
    pub vocabulary_size: usize,
    pub built_at: DateTime<Utc>,
    pub source: String,
}

impl Snapshot {
    /// Runs the full pipeline over `movies`
    pub fn build(
        movies: Vec<MovieRecord>,
        title_match: TitleMatch,
        source: impl Into<String>,
    ) -> Result<Self, RecommendError> {
        let recommender = Recommender::build(movies)?.with_title_match(title_match);
        let source = source.into();

        tracing::info!(
            source = %source,
            movies = recommender.len(),
            vocabulary = recommender.vocabulary().len(),
            "Built similarity snapshot"
        );

        Ok(Self {
            recommender,
            built_at: Utc::now(),
            source,
        })
    }

    /// Loads the corpus from `source` and builds it off the async executor
    pub async fn load(source: &dyn MovieSource, title_match: TitleMatch) -> AppResult<Self> {
        let movies = source.load_movies().await?;
        let description = source.describe();

        tokio::task::spawn_blocking(move || Snapshot::build(movies, title_match, description))
            .await
            .map_err(|e| AppError::Internal(format!("Snapshot build task failed: {}", e)))?
            .map_err(AppError::from)
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            movie_count: self.recommender.len(),
            vocabulary_size: self.recommender.vocabulary().len(),
            built_at: self.built_at,
            source: self.source.clone(),
        }
    }
}
