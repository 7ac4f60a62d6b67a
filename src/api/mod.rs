use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::{me, system};
use crate::store::ProfileStore;

/// State shared by every handler
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
}

impl AppState {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self { store }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Profile
        .route("/api/me", get(me::get).put(me::put))
        .fallback(system::not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        router = router.layer(cors_layer(config));
    }

    router
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn put_me(body: &str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/api/me")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_me() -> Request<Body> {
        Request::builder().uri("/api/me").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_default_record() {
        let router = app(AppState::default(), &AppConfig::development());
        let (status, body) = send(router, get_me()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["country"], json!("Germany"));
        assert_eq!(body["data"]["department"], json!(null));
        assert_eq!(body["data"]["bankDetail"]["paymentMethod"], json!("Cash"));
    }

    #[tokio::test]
    async fn test_put_applies_partial_update() {
        let state = AppState::default();
        let config = AppConfig::development();

        let tax = json!({
            "taxId": "789", "extraJob": "No", "disability": "None", "information": "n/a",
            "employmentStatus": "Employed", "secondSalary": "No"
        });
        let body = json!({ "firstName": "Jane", "tax": tax }).to_string();
        let (status, body) = send(app(state.clone(), &config), put_me(&body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["firstName"], json!("Jane"));
        assert_eq!(body["data"]["tax"]["taxId"], json!("789"));
        assert_eq!(body["data"]["tax"]["noTaxId"], json!(false));
        assert_eq!(body["data"]["bankDetail"]["paymentMethod"], json!("Cash"));

        let (_, body) = send(app(state, &config), get_me()).await;
        assert_eq!(body["data"]["firstName"], json!("Jane"));
    }

    #[tokio::test]
    async fn test_put_rejects_invalid_payload() {
        let router = app(AppState::default(), &AppConfig::development());
        let (status, body) = send(router, put_me(r#"{"email":"invalid-email"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("VALIDATION_ERROR"));
        assert_eq!(body["message"], json!("✖ Invalid email address\n  → at email"));
        assert_eq!(body["errors"][0]["path"], json!("email"));
    }

    #[tokio::test]
    async fn test_put_rejects_incomplete_section() {
        let router = app(AppState::default(), &AppConfig::development());
        let (status, body) = send(router, put_me(r#"{"bankDetail":{"bankName":"X"}}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["path"], json!("bankDetail.bankBic"));
        assert_eq!(
            body["errors"][0]["message"],
            json!("Invalid input: expected string, received undefined")
        );
    }

    #[tokio::test]
    async fn test_put_rejects_malformed_json() {
        let router = app(AppState::default(), &AppConfig::production());
        let (status, body) = send(router, put_me("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_JSON"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = app(AppState::default(), &AppConfig::development());
        let request = Request::builder().uri("/api/you").body(Body::empty()).unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], json!("NOT_FOUND"));
    }
}
