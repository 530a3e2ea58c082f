mod movie;
mod recommendation;

pub use movie::MovieRecord;
pub use recommendation::{Recommendation, RecommendationSet};
