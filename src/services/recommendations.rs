use std::sync::Arc;

use crate::{
    models::Recommendation,
    services::{FuzzyResolver, Ranker},
    store::SimilarityStore,
};

/// Produces recommendations from free-text titles
///
/// The HTTP layer depends on this trait rather than on the concrete service,
/// so handlers can be exercised against a mock.
#[cfg_attr(test, mockall::automock)]
pub trait Recommender: Send + Sync {
    /// Resolves `input` to a catalog title and returns its `n` nearest neighbours
    fn recommend(&self, input: &str, n: usize) -> Recommendation;

    /// Number of titles the recommender knows about
    fn catalog_size(&self) -> usize;
}

/// Fuzzy title resolution followed by similarity ranking over a loaded store
#[derive(Debug, Clone)]
pub struct RecommendationService {
    store: Arc<SimilarityStore>,
    resolver: FuzzyResolver,
}

impl RecommendationService {
    pub fn new(store: Arc<SimilarityStore>, resolver: FuzzyResolver) -> Self {
        Self { store, resolver }
    }
}

impl Recommender for RecommendationService {
    fn recommend(&self, input: &str, n: usize) -> Recommendation {
        let Some(matched) = self.resolver.resolve(input, self.store.titles()) else {
            tracing::info!(input = %input, "Movie not found");
            return Recommendation::NotFound {
                input: input.to_string(),
            };
        };

        // Duplicate titles resolve through the index, i.e. to their last row
        let index = self
            .store
            .index_of(&matched.title)
            .unwrap_or(matched.position);

        tracing::info!(
            input = %input,
            resolved = %matched.title,
            score = matched.score,
            "Interpreted input as catalog title"
        );

        let recommendations = Ranker::new(&self.store).top_n(index, n);

        Recommendation::Found {
            resolved_title: matched.title,
            score: matched.score,
            recommendations,
        }
    }

    fn catalog_size(&self) -> usize {
        self.store.len()
    }
}
