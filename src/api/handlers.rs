use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendRequest, RecommendResponse},
};

use super::AppState;

/// Landing page
pub async fn home() -> &'static str {
    "Movie Recommender API is running!"
}

/// Liveness check
pub async fn ping() -> (StatusCode, &'static str) {
    (StatusCode::OK, "pong")
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "titles": state.recommender.catalog_size(),
        })),
    )
}

/// Recommends titles similar to the (possibly misspelled) movie in the body.
///
/// An unmatched title answers 404 with the usual response shape rather than
/// an error body, so clients can always read `found`.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RecommendResponse>)> {
    let Json(request) = payload?;

    let movie = match request.movie {
        Some(movie) if !movie.trim().is_empty() => movie,
        _ => return Err(AppError::InvalidInput("Movie title required".to_string())),
    };

    let top_n = match request.top_n {
        None => state.default_top_n,
        Some(n) => usize::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                AppError::InvalidInput("top_n must be a positive integer".to_string())
            })?,
    };

    tracing::info!(
        request_id = %request_id,
        movie = %movie,
        top_n,
        "Processing recommendation request"
    );

    // Fuzzy matching scans the whole catalog; keep it off the async workers
    let recommender = state.recommender.clone();
    let input = movie.clone();
    let recommendation = tokio::task::spawn_blocking(move || recommender.recommend(&input, top_n))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let status = if recommendation.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    Ok((status, Json(RecommendResponse::new(movie, recommendation))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum_test::TestServer;
    use mockall::predicate::eq;

    use super::*;
    use crate::api::create_router;
    use crate::models::{RankedTitle, Recommendation};
    use crate::services::recommendations::MockRecommender;

    fn server(mock: MockRecommender) -> TestServer {
        let state = AppState::new(Arc::new(mock), 5);
        TestServer::new(create_router(state)).unwrap()
    }

    fn found(title: &str, neighbours: &[&str]) -> Recommendation {
        Recommendation::Found {
            resolved_title: title.to_string(),
            score: 92.0,
            recommendations: neighbours
                .iter()
                .enumerate()
                .map(|(i, t)| RankedTitle {
                    index: i + 1,
                    title: t.to_string(),
                    score: 0.9 - i as f32 * 0.1,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_uses_default_top_n() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend()
            .with(eq("Toy Stry"), eq(5))
            .times(1)
            .returning(|_, _| found("Toy Story", &["Toy Story 2", "A Bug's Life"]));

        let response = server(mock)
            .post("/recommend")
            .json(&json!({ "movie": "Toy Stry" }))
            .await;

        response.assert_status_ok();
        let body: RecommendResponse = response.json();
        assert_eq!(body.input, "Toy Stry");
        assert!(body.found);
        assert_eq!(body.resolved_title.as_deref(), Some("Toy Story"));
        assert_eq!(body.recommendations, vec!["Toy Story 2", "A Bug's Life"]);
    }

    #[tokio::test]
    async fn test_passes_requested_top_n() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend()
            .with(eq("Heat"), eq(2))
            .times(1)
            .returning(|_, _| found("Heat", &["Ronin", "Collateral"]));

        let response = server(mock)
            .post("/recommend")
            .json(&json!({ "movie": "Heat", "top_n": 2 }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_not_found_is_404_with_body() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend().returning(|input, _| Recommendation::NotFound {
            input: input.to_string(),
        });

        let response = server(mock)
            .post("/recommend")
            .json(&json!({ "movie": "qqqq" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: RecommendResponse = response.json();
        assert!(!body.found);
        assert!(body.recommendations.is_empty());
        assert_eq!(body.error.as_deref(), Some("Movie not found: 'qqqq'"));
    }

    #[tokio::test]
    async fn test_blank_movie_rejected_without_lookup() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend().never();

        let server = server(mock);
        for body in [json!({}), json!({ "movie": "  " })] {
            let response = server.post("/recommend").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let error: Value = response.json();
            assert_eq!(error["error"], "Movie title required");
        }
    }

    #[tokio::test]
    async fn test_non_positive_top_n_rejected() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend().never();

        let server = server(mock);
        for top_n in [0, -3] {
            let response = server
                .post("/recommend")
                .json(&json!({ "movie": "Heat", "top_n": top_n }))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_numeric_string_top_n_accepted() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend()
            .with(eq("Heat"), eq(3))
            .times(1)
            .returning(|_, _| found("Heat", &["Ronin"]));

        let response = server(mock)
            .post("/recommend")
            .json(&json!({ "movie": "Heat", "top_n": "3" }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_bad_request() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend().never();

        let server = server(mock);
        for body in [
            json!({ "movie": 5 }),
            json!({ "movie": "Heat", "top_n": "three" }),
            json!({ "movie": "Heat", "top_n": [3] }),
        ] {
            let response = server.post("/recommend").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let error: Value = response.json();
            assert!(error["error"].is_string());
        }

        let response = server.post("/recommend").text("movie=Heat").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert!(error["error"].is_string());
    }

    #[tokio::test]
    async fn test_health_reports_catalog_size() {
        let mut mock = MockRecommender::new();
        mock.expect_catalog_size().return_const(4usize);

        let response = server(mock).get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["titles"], 4);
    }

    #[tokio::test]
    async fn test_ping_and_home() {
        let server = server(MockRecommender::new());
        server.get("/ping").await.assert_text("pong");
        server
            .get("/")
            .await
            .assert_text("Movie Recommender API is running!");
    }
}
