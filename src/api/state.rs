use std::sync::Arc;

use crate::services::Recommender;

/// Shared application state
///
/// Everything inside is read-only after startup, so cloning per request is
/// just a reference count bump and no locking is involved.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn Recommender>,
    /// Recommendation count used when a request omits `top_n`
    pub default_top_n: usize,
}

impl AppState {
    pub fn new(recommender: Arc<dyn Recommender>, default_top_n: usize) -> Self {
        Self {
            recommender,
            default_top_n,
        }
    }
}
