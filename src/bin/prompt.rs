//! Interactive text front-end: one movie title per line on stdin.

use std::io::Write;

use anyhow::Context;
use movie_recommender::{
    config::Config,
    services::{dataset::CsvFileSource, RecommendError, Snapshot},
    telemetry,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "Enter a movie title (or 'quit'): ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;
    let source = CsvFileSource::new(&config.dataset_path);
    let snapshot = Snapshot::load(&source, config.title_match())
        .await
        .with_context(|| format!("Failed to build recommendations from {}", config.dataset_path))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        match snapshot.recommender.recommend(query, config.default_top_n) {
            Ok(set) if set.is_empty() => writeln!(stdout, "No recommendations found.")?,
            Ok(set) => {
                if !set.matched_title.eq_ignore_ascii_case(&set.query) {
                    writeln!(stdout, "Showing results for '{}'", set.matched_title)?;
                }
                for recommendation in &set.recommendations {
                    writeln!(stdout, "{}", recommendation.display_line())?;
                }
            }
            Err(RecommendError::Validation(_)) if query.is_empty() => {
                writeln!(stdout, "Please enter a movie title.")?
            }
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    Ok(())
}
