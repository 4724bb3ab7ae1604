//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Screen, SessionSnapshot},
    utils::format_duration,
};

/// Formatted read-out shown on the start page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayStrings {
    pub exercise: String,
    pub rest: String,
    pub repetitions: String,
}

impl DisplayStrings {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            exercise: format_duration(snapshot.exercise_remaining_ms),
            rest: format_duration(snapshot.rest_remaining_ms),
            repetitions: snapshot.repetitions_remaining.to_string(),
        }
    }
}

/// API response structure for session command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
    pub display: DisplayStrings,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display: DisplayStrings::from_snapshot(&session),
            session,
        }
    }

    /// Create a running response
    pub fn running(message: String, session: SessionSnapshot) -> Self {
        Self::new("running".to_string(), message, session)
    }

    /// Create an idle response
    pub fn idle(message: String, session: SessionSnapshot) -> Self {
        Self::new("idle".to_string(), message, session)
    }
}

/// Session status with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub display: DisplayStrings,
    pub screen: Screen,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Response for navigation hooks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub screen: Screen,
    pub title: String,
    pub implemented: bool,
    pub timestamp: DateTime<Utc>,
}

impl NavigationResponse {
    pub fn for_screen(screen: Screen) -> Self {
        Self {
            screen,
            title: screen.title().to_string(),
            implemented: !screen.is_placeholder(),
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
