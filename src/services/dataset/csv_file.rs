use std::{
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::{dataset::MovieSource, features::FEATURE_FIELDS},
};

/// Movie dataset stored as a CSV file with a header row
///
/// Required column: `title`. Used when present: `id` and the metadata columns
/// in [`FEATURE_FIELDS`]. All other columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl MovieSource for CsvFileSource {
    async fn load_movies(&self) -> AppResult<Vec<MovieRecord>> {
        let path = self.path.clone();

        let movies = tokio::task::spawn_blocking(move || -> AppResult<Vec<MovieRecord>> {
            let file = std::fs::File::open(&path)?;
            parse_movies(file)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Dataset loader task failed: {}", e)))??;

        tracing::info!(
            path = %self.path.display(),
            movies = movies.len(),
            "Loaded movie dataset"
        );

        Ok(movies)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// One CSV row; every column is optional so sparse datasets still load
#[derive(Debug, Deserialize)]
struct CsvMovieRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    id: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
    #[serde(default)]
    cast: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    director: Option<String>,
}

/// Parses movie records from CSV data
///
/// Missing metadata cells become empty strings. Rows without a title are
/// skipped. A row's position (0-based, header excluded) is used as its id when
/// the dataset has no usable `id` value.
pub fn parse_movies<R: Read>(reader: R) -> AppResult<Vec<MovieRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == "title") {
        return Err(AppError::Dataset(format!(
            "missing 'title' column (found: {})",
            headers.iter().collect::<Vec<_>>().join(", ")
        )));
    }

    let missing: Vec<&str> = FEATURE_FIELDS
        .iter()
        .copied()
        .filter(|field| !headers.iter().any(|h| h == *field))
        .collect();
    if !missing.is_empty() {
        tracing::warn!(
            missing = ?missing,
            "Dataset lacks metadata columns; they will be treated as empty"
        );
    }

    let mut movies = Vec::new();
    let mut skipped = 0usize;

    for (position, row) in reader.deserialize::<CsvMovieRow>().enumerate() {
        let row = row?;

        let title = row.title.map(|t| t.trim().to_string()).unwrap_or_default();
        if title.is_empty() {
            skipped += 1;
            tracing::warn!(row = position, "Skipping dataset row without a title");
            continue;
        }

        movies.push(MovieRecord {
            id: row.id.unwrap_or(position as i64),
            title,
            keywords: row.keywords.unwrap_or_default(),
            cast: row.cast.unwrap_or_default(),
            genres: row.genres.unwrap_or_default(),
            director: row.director.unwrap_or_default(),
        });
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped rows without a title");
    }

    Ok(movies)
}
