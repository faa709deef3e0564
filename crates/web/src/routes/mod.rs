use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pgn_annotator_core::{annotate, parse, MoveAnnotation};

#[derive(serde::Deserialize)]
pub struct ParsePgnRequest {
    pub pgn: Option<String>,
}

#[derive(serde::Serialize)]
pub struct ParsePgnResponse {
    pub moves: Vec<MoveAnnotation>,
    pub headers: BTreeMap<String, String>,
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/parse-pgn", post(parse_pgn))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Parses the posted PGN and annotates every move. Any body that does
/// not carry a `pgn` string gets the same 400; parse failures are logged
/// but their details are not leaked to the client.
pub async fn parse_pgn(request: Option<Json<ParsePgnRequest>>) -> Response {
    let pgn = match request.and_then(|Json(request)| request.pgn) {
        Some(pgn) => pgn,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing PGN in request body",
                }),
            )
                .into_response();
        }
    };

    match parse(&pgn) {
        Ok(game) => {
            let moves = annotate(&game);
            tracing::info!(game = %game.summary(), moves = moves.len(), "parsed PGN");
            (
                StatusCode::OK,
                Json(ParsePgnResponse {
                    moves,
                    headers: game.headers,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected PGN");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Could not parse PGN",
                }),
            )
                .into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    async fn post_pgn(body: String) -> (StatusCode, serde_json::Value) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/parse-pgn")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_parse_pgn_endpoint() {
        let body = serde_json::json!({ "pgn": "1. e4 e5 2. Nf3 Nc6" }).to_string();
        let (status, value) = post_pgn(body).await;

        assert_eq!(status, StatusCode::OK);
        let moves = value["moves"].as_array().unwrap();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0]["san"], "e4");
        assert_eq!(moves[0]["material_white"], 39);
        assert_eq!(value["headers"]["White"], "?");
        assert_eq!(value["headers"]["Result"], "*");
    }

    #[tokio::test]
    async fn test_checkmate_reported_over_the_wire() {
        let body =
            serde_json::json!({ "pgn": "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7#" }).to_string();
        let (status, value) = post_pgn(body).await;

        assert_eq!(status, StatusCode::OK);
        let last = value["moves"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(last["san"], "Qxf7#");
        assert_eq!(last["is_checkmate"], true);
        assert_eq!(last["is_capture"], true);
    }

    #[tokio::test]
    async fn test_missing_pgn_field() {
        let (status, value) = post_pgn("{}".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Missing PGN in request body");

        let (status, value) = post_pgn(serde_json::json!({ "pgn": null }).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Missing PGN in request body");
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let (status, value) = post_pgn("this is not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Missing PGN in request body");
    }

    #[tokio::test]
    async fn test_unparseable_pgn() {
        let (status, value) = post_pgn(serde_json::json!({ "pgn": "gibberish" }).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Could not parse PGN");
    }

    #[tokio::test]
    async fn test_illegal_game_rejected() {
        let (status, value) =
            post_pgn(serde_json::json!({ "pgn": "1. e4 e4" }).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Could not parse PGN");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
