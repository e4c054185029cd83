use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use devroster::developers::{developer_router, DeveloperLifecycleService, DeveloperStore};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_developer_routes<S>(service: Arc<DeveloperLifecycleService<S>>) -> Router
where
    S: DeveloperStore + 'static,
{
    developer_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use devroster::developers::{InMemoryDeveloperStore, LevelPolicy};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(DeveloperLifecycleService::new(
            Arc::new(InMemoryDeveloperStore::new()),
            LevelPolicy::default(),
        ));
        with_developer_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(false)
            .oneshot(get_request("/health"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let pending = app(false)
            .oneshot(get_request("/ready"))
            .await
            .expect("route executes");
        assert_eq!(pending.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(pending).await["status"], "initializing");

        let ready = app(true)
            .oneshot(get_request("/ready"))
            .await
            .expect("route executes");
        assert_eq!(ready.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_are_plain_text() {
        let response = app(true)
            .oneshot(get_request("/metrics"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn developer_routes_are_mounted() {
        let router = app(true);
        let create = Request::builder()
            .method(Method::POST)
            .uri("/developers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "developerLevel": "NEW",
                    "developerSkillType": "FULL_STACK",
                    "experienceYears": 0,
                    "memberId": "rookie",
                    "name": "rookie",
                    "age": 22,
                })
                .to_string(),
            ))
            .expect("request builds");

        let created = router
            .clone()
            .oneshot(create)
            .await
            .expect("route executes");
        assert_eq!(created.status(), StatusCode::OK);

        let listing = router
            .oneshot(get_request("/developers"))
            .await
            .expect("route executes");
        let payload = body_json(listing).await;
        assert_eq!(payload[0]["memberId"], "rookie");
        assert_eq!(payload[0]["developerLevel"], "NEW");
    }
}
