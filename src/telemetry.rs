use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "movie_recommender=info,tower_http=info";

/// Installs the global tracing subscriber
///
/// Honors `RUST_LOG` when set. Output goes to stderr so the prompt binary can
/// keep stdout for results.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
