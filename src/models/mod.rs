use serde::{Deserialize, Deserializer, Serialize};

mod title;

pub use title::{RankedTitle, TitleMatch};

/// Outcome of a recommendation call.
///
/// An unmatched input is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Found {
        resolved_title: String,
        /// Fuzzy-match confidence (0–100) for `resolved_title`
        score: f64,
        recommendations: Vec<RankedTitle>,
    },
    NotFound {
        input: String,
    },
}

impl Recommendation {
    pub fn is_found(&self) -> bool {
        matches!(self, Recommendation::Found { .. })
    }

    /// Recommended titles in rank order; empty when nothing matched
    pub fn titles(&self) -> Vec<&str> {
        match self {
            Recommendation::Found {
                recommendations, ..
            } => recommendations.iter().map(|r| r.title.as_str()).collect(),
            Recommendation::NotFound { .. } => Vec::new(),
        }
    }
}

/// Body of `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default, alias = "title")]
    pub movie: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub top_n: Option<i64>,
}

/// Accepts a count given either as a JSON integer or as a numeric string
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("top_n is not an integer: {:?}", text))),
    }
}

/// Response for `POST /recommend`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub input: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_title: Option<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendResponse {
    pub fn new(input: String, recommendation: Recommendation) -> Self {
        match recommendation {
            Recommendation::Found {
                resolved_title,
                recommendations,
                ..
            } => Self {
                input,
                found: true,
                resolved_title: Some(resolved_title),
                recommendations: recommendations.into_iter().map(|r| r.title).collect(),
                error: None,
            },
            Recommendation::NotFound { input: unmatched } => Self {
                error: Some(format!("Movie not found: '{}'", unmatched)),
                input,
                found: false,
                resolved_title: None,
                recommendations: Vec::new(),
            },
        }
    }
}
