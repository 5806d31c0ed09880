//! Approximate title matching.
//!
//! Scores free-text input against every catalog title on a 0–100 scale and
//! keeps the single best candidate, refusing low-confidence guesses.

use strsim::normalized_levenshtein;

use crate::models::TitleMatch;

/// Minimum score a candidate needs to be accepted
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Weight applied to the order-insensitive token comparison
const TOKEN_SORT_SCALE: f64 = 0.95;
/// Weight applied to substring alignment
const PARTIAL_SCALE: f64 = 0.90;
/// Weight applied to substring alignment once the title dwarfs the query
const PARTIAL_SCALE_DISTANT: f64 = 0.60;
/// Length ratio from which substring alignment is attempted
const PARTIAL_LENGTH_RATIO: f64 = 1.5;
/// Length ratio from which the distant weight applies
const PARTIAL_DISTANT_RATIO: f64 = 8.0;

/// Resolves user-typed titles to catalog titles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyResolver {
    threshold: f64,
}

impl Default for FuzzyResolver {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyResolver {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Finds the catalog title closest to `input`.
    ///
    /// An exact title always wins with a score of 100. Otherwise the highest
    /// scoring title is returned if it reaches the threshold; among equal
    /// scores the earliest title in catalog order is kept.
    pub fn resolve(&self, input: &str, titles: &[String]) -> Option<TitleMatch> {
        // Blank input never matches, not even a blank catalog title
        let query = normalize(input);
        if query.is_empty() {
            return None;
        }

        if let Some(position) = titles.iter().position(|t| t == input) {
            return Some(TitleMatch {
                title: titles[position].clone(),
                position,
                score: 100.0,
            });
        }

        let mut best: Option<(usize, f64)> = None;
        for (position, title) in titles.iter().enumerate() {
            let score = similarity(&query, &normalize(title));
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((position, score));
            }
        }

        let (position, score) = best?;
        if score < self.threshold {
            tracing::debug!(
                input = %input,
                closest = %titles[position],
                score,
                threshold = self.threshold,
                "No title above match threshold"
            );
            return None;
        }

        Some(TitleMatch {
            title: titles[position].clone(),
            position,
            score,
        })
    }
}

/// Lowercases and replaces anything that is not alphanumeric with a single space
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .flat_map(|c| {
            let keep = c.is_alphanumeric();
            c.to_lowercase().map(move |l| if keep { l } else { ' ' })
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Weighted 0–100 similarity of a normalized `query` to a normalized `title`.
///
/// Substring alignment only looks for the query inside a longer title, so a
/// short title never scores well just by occurring inside a long query.
pub fn similarity(query: &str, title: &str) -> f64 {
    if query.is_empty() || title.is_empty() {
        return 0.0;
    }
    if query == title {
        return 100.0;
    }

    let mut best = ratio(query, title).max(token_sort_ratio(query, title) * TOKEN_SORT_SCALE);

    let length_ratio = title.chars().count() as f64 / query.chars().count() as f64;
    if length_ratio >= PARTIAL_LENGTH_RATIO {
        let scale = if length_ratio >= PARTIAL_DISTANT_RATIO {
            PARTIAL_SCALE_DISTANT
        } else {
            PARTIAL_SCALE
        };
        best = best.max(partial_ratio(query, title) * scale);
    }

    best
}

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Best alignment of `query` against any equally long window of `title`
fn partial_ratio(query: &str, title: &str) -> f64 {
    let title: Vec<char> = title.chars().collect();
    let width = query.chars().count();

    title
        .windows(width)
        .map(|window| ratio(query, &window.iter().collect::<String>()))
        .fold(0.0, f64::max)
}
