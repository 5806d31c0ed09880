use std::cmp::Ordering;

use crate::models::RankedTitle;
use crate::store::SimilarityStore;

/// Selects the nearest neighbours of a catalog item
pub struct Ranker<'a> {
    store: &'a SimilarityStore,
}

impl<'a> Ranker<'a> {
    pub fn new(store: &'a SimilarityStore) -> Self {
        Self { store }
    }

    /// The `n` items most similar to `index`, best first.
    ///
    /// Scores are compared descending and equal scores fall back to ascending
    /// matrix index, so the output is reproducible. The item itself is never
    /// part of the result. Asking for more items than exist returns them all.
    pub fn top_n(&self, index: usize, n: usize) -> Vec<RankedTitle> {
        if n == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<(usize, f32)> = self.store.similarities_of(index).collect();

        if n < candidates.len() {
            candidates.select_nth_unstable_by(n - 1, by_rank);
            candidates.truncate(n);
        }
        candidates.sort_unstable_by(by_rank);

        candidates
            .into_iter()
            .filter_map(|(other, score)| {
                self.store.title_at(other).map(|title| RankedTitle {
                    index: other,
                    title: title.to_string(),
                    score,
                })
            })
            .collect()
    }
}

fn by_rank(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}
