//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Screen};
use super::responses::{ApiResponse, DisplayStrings, HealthResponse, NavigationResponse, StatusResponse};

/// Handle POST /start-pause - Toggle the active phase
pub async fn start_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_pause() {
        Ok(session) => {
            let phase = session.active_phase.as_str();
            info!("Start/pause endpoint called - {} phase toggled", phase);
            if session.running_phase().is_some() {
                Ok(Json(ApiResponse::running(format!("{} phase started", phase), session)))
            } else {
                Ok(Json(ApiResponse::idle(format!("{} phase paused", phase), session)))
            }
        }
        Err(e) => {
            error!("Failed to toggle session: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Stop and restore the session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(session) => {
            info!("Reset endpoint called - session restored");
            Ok(Json(ApiResponse::idle("Session reset".to_string(), session)))
        }
        Err(e) => {
            error!("Failed to reset session: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let screen = match state.current_screen() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get current screen: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: DisplayStrings::from_snapshot(&session),
        session,
        screen,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

fn navigate(state: &AppState, target: Screen) -> Result<Json<NavigationResponse>, StatusCode> {
    match state.navigate(target) {
        Ok(screen) => Ok(Json(NavigationResponse::for_screen(screen))),
        Err(e) => {
            error!("Failed to navigate to {:?}: {}", target, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /navigate/exercise-time - Open the exercise duration picker
pub async fn select_exercise_time_handler(State(state): State<Arc<AppState>>) -> Result<Json<NavigationResponse>, StatusCode> {
    navigate(&state, Screen::SelectExerciseTime)
}

/// Handle POST /navigate/rest-time - Open the rest duration picker
pub async fn select_rest_time_handler(State(state): State<Arc<AppState>>) -> Result<Json<NavigationResponse>, StatusCode> {
    navigate(&state, Screen::SelectRestTime)
}

/// Handle POST /navigate/start - Return to the start page
pub async fn start_page_handler(State(state): State<Arc<AppState>>) -> Result<Json<NavigationResponse>, StatusCode> {
    navigate(&state, Screen::StartPage)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
