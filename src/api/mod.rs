//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start-pause", post(start_pause_handler))
        .route("/reset", post(reset_handler))
        .route("/navigate/exercise-time", post(select_exercise_time_handler))
        .route("/navigate/rest-time", post(select_rest_time_handler))
        .route("/navigate/start", post(start_page_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{services::LogHaptic, state::SessionConfig};

    fn test_state() -> Arc<AppState> {
        let config = SessionConfig::new(65_000, 30_000, 3, 1000).unwrap();
        Arc::new(AppState::new(20554, "127.0.0.1".to_string(), config, Arc::new(LogHaptic)))
    }

    async fn call(state: &Arc<AppState>, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = create_router(Arc::clone(state))
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_shows_formatted_countdowns() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display"]["exercise"], "01 : 05");
        assert_eq!(body["display"]["rest"], "00 : 30");
        assert_eq!(body["display"]["repetitions"], "3");
        assert_eq!(body["session"]["active_phase"], "exercise");
        assert_eq!(body["screen"], "startPage");
        assert!(body["last_action"].is_null());
    }

    #[tokio::test]
    async fn test_start_pause_toggles() {
        let state = test_state();

        let (status, body) = call(&state, Method::POST, "/start-pause").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["session"]["exercise_running"], true);
        assert_eq!(body["session"]["rest_running"], false);

        let (_, body) = call(&state, Method::POST, "/start-pause").await;
        assert_eq!(body["status"], "idle");
        assert_eq!(body["session"]["exercise_running"], false);

        let (_, body) = call(&state, Method::GET, "/status").await;
        assert_eq!(body["last_action"], "pause");
    }

    #[tokio::test]
    async fn test_reset_restores_session() {
        let state = test_state();
        state.start_pause().unwrap();
        state.tick().unwrap();

        let (status, body) = call(&state, Method::POST, "/reset").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["session"]["exercise_remaining_ms"], 65_000);
        assert_eq!(body["display"]["exercise"], "01 : 05");
    }

    #[tokio::test]
    async fn test_navigation_hooks_are_placeholders() {
        let state = test_state();

        let (status, body) = call(&state, Method::POST, "/navigate/exercise-time").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["screen"], "selectExerciseTime");
        assert_eq!(body["title"], "SELECT EXERCISE TIME SCREEN");
        assert_eq!(body["implemented"], false);

        let (_, body) = call(&state, Method::POST, "/navigate/rest-time").await;
        assert_eq!(body["title"], "SELECT REST TIME SCREEN");

        let (_, body) = call(&state, Method::POST, "/navigate/start").await;
        assert_eq!(body["screen"], "startPage");
        assert_eq!(body["implemented"], true);
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
