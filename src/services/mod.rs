pub mod dataset;
pub mod features;
pub mod recommender;
pub mod similarity;
pub mod snapshot;
pub mod vectorizer;

pub use recommender::{RecommendError, Recommender, TitleMatch};
pub use snapshot::{Snapshot, SnapshotStats};
