pub mod fuzzy;
pub mod ranker;
pub mod recommendations;

pub use fuzzy::FuzzyResolver;
pub use ranker::Ranker;
pub use recommendations::{RecommendationService, Recommender};
