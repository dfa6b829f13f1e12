//! API route definitions.

mod health;
mod verse;

use axum::Router;
use axum::routing::get;

use crate::cors::cors_layer;
use crate::state::AppState;

/// Build the complete API router.
///
/// # Route Structure
///
/// - `GET /` - Liveness probe (`{"message":"Ready"}`)
/// - `GET /api` - Liveness probe
/// - `GET /health` - Health check
/// - `GET /chapter/{chapter}/verse/{verse}` - Verse with commentaries
/// - `GET /api/chapter/{chapter}/verse/{verse}` - Same, under the `/api` prefix
///
/// Every route is wrapped in the configured CORS policy.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(health::ready))
        .route("/api", get(health::ready))
        .route("/health", get(health::health_check))
        .route("/chapter/{chapter}/verse/{verse}", get(verse::get_verse))
        .route("/api/chapter/{chapter}/verse/{verse}", get(verse::get_verse))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{HeaderValue, Method, Request, StatusCode, header};
    use axum::response::Response;
    use gita_core::Commentary;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, CorsConfig, DatabaseConfig};
    use crate::repository::VerseRepository;
    use crate::store::memory::{MemoryVerseStore, verse_row};

    const ORIGIN: &str = "https://bhagwad-geeta.vercel.app";

    fn test_config() -> Config {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            database: DatabaseConfig {
                url: "postgresql://localhost/gita".to_string(),
                pool_size: 1,
                timeout: Duration::from_secs(1),
            },
            cors: CorsConfig {
                allowed_origin: HeaderValue::from_static(ORIGIN),
                allowed_methods: vec![
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ],
            },
            metrics_port: None,
        }
    }

    fn seeded_store() -> MemoryVerseStore {
        let mut shankara = Commentary::new("BG2.47", "Shankara");
        shankara.english_commentary = Some("Action without attachment".to_string());

        MemoryVerseStore::new()
            .with_verse(verse_row("BG2.47", 2, 47))
            .with_verse(verse_row("BG18.66", 18, 66))
            .with_commentary(shankara)
            .with_commentary(Commentary::new("BG2.47", "Ramanuja"))
    }

    fn app(store: MemoryVerseStore) -> Router {
        let repo = VerseRepository::new(Arc::new(store));
        router(AppState::new(test_config(), repo))
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_ready() {
        for uri in ["/", "/api"] {
            let response = send_get(app(seeded_store()), uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"message": "Ready"})
            );
        }
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let response = send_get(app(seeded_store()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "gita-serve");
    }

    #[tokio::test]
    async fn verse_found_on_both_prefixes() {
        for uri in ["/chapter/2/verse/47", "/api/chapter/2/verse/47"] {
            let response = send_get(app(seeded_store()), uri).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body["id"], "BG2.47");
            assert_eq!(body["chapter"], 2);
            assert_eq!(body["verse"], 47);
            assert_eq!(body["slok"], "slok BG2.47");

            let commentaries = body["commentaries"].as_array().unwrap();
            assert_eq!(commentaries.len(), 2);
            assert_eq!(commentaries[0]["commentator"], "Shankara");
            assert_eq!(
                commentaries[0]["english_commentary"],
                "Action without attachment"
            );
            assert_eq!(commentaries[1]["commentator"], "Ramanuja");
            assert!(commentaries[1].get("author").is_none());
            assert!(commentaries[1].get("english_commentary").is_none());
        }
    }

    #[tokio::test]
    async fn verse_without_commentaries_returns_empty_list() {
        let response = send_get(app(seeded_store()), "/chapter/18/verse/66").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["commentaries"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn leading_zeros_are_normalized() {
        let response = send_get(app(seeded_store()), "/chapter/02/verse/047").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], "BG2.47");
    }

    #[tokio::test]
    async fn missing_verse_is_not_found() {
        let response = send_get(app(seeded_store()), "/chapter/99/verse/99").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "verse BG99.99");
    }

    #[tokio::test]
    async fn malformed_segments_are_bad_requests() {
        for uri in [
            "/chapter/two/verse/47",
            "/chapter/2/verse/0",
            "/chapter/-1/verse/3",
        ] {
            let response = send_get(app(seeded_store()), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json_body(response).await["error"], "bad_request");
        }
    }

    #[tokio::test]
    async fn undecodable_segment_is_a_json_bad_request() {
        let response = send_get(app(seeded_store()), "/chapter/2/verse/%FF").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert_eq!(json_body(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error_and_app_keeps_serving() {
        let app = app(seeded_store().failing_commentaries());

        let response = send_get(app.clone(), "/chapter/2/verse/47").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "fetch_error");

        // Absent verses never reach the commentary query.
        let response = send_get(app.clone(), "/chapter/99/verse/99").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send_get(app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn verse_lookup_failure_is_a_server_error() {
        let app = app(seeded_store().failing_verse_lookup());
        let response = send_get(app, "/chapter/2/verse/47").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn cors_headers_for_allowed_origin() {
        let request = Request::get("/chapter/2/verse/47")
            .header(header::ORIGIN, ORIGIN)
            .body(Body::empty())
            .unwrap();
        let response = app(seeded_store()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static(ORIGIN))
        );
    }

    #[tokio::test]
    async fn no_cors_headers_for_other_origins() {
        let request = Request::get("/chapter/2/verse/47")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = app(seeded_store()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn preflight_is_answered_with_ok() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chapter/2/verse/47")
            .header(header::ORIGIN, ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let store = Arc::new(seeded_store());
        let repo = VerseRepository::new(store.clone());
        let response = router(AppState::new(test_config(), repo))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static(ORIGIN))
        );
        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("GET"));
        assert!(methods.contains("DELETE"));
        assert_eq!(store.verse_calls(), 0);
    }

    #[tokio::test]
    async fn no_preflight_headers_for_other_origins() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/chapter/2/verse/47")
            .header(header::ORIGIN, "https://evil.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app(seeded_store()).oneshot(request).await.unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
