//! Content-based movie recommendations.
//!
//! Movies are compared by their keywords, cast, genres and director: each
//! movie's metadata is turned into a bag-of-words count vector over a shared
//! vocabulary, and the cosine similarity between vectors ranks candidates.
//!
//! ```
//! use movie_recommender::{models::MovieRecord, services::Recommender};
//!
//! let recommender = Recommender::build(vec![
//!     MovieRecord::new(1, "Avatar").with_keywords("future").with_director("James Cameron"),
//!     MovieRecord::new(2, "Aliens").with_keywords("future").with_director("James Cameron"),
//!     MovieRecord::new(3, "Up").with_genres("Animation"),
//! ])
//! .expect("non-empty corpus");
//!
//! let set = recommender.recommend("avatar", 1).expect("title exists");
//! assert_eq!(set.titles(), vec!["Aliens"]);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
