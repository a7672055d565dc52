//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::Serialize;

use crate::health::Health;
use crate::kind::SpotKind;
use crate::manager::ReservationPolicy;
use crate::request::ParkingRequest;
use crate::service::{ParkOutcome, ParkingService};
use crate::version::VersionInfo;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: Health,
    pub policy: ReservationPolicy,
    pub version: VersionInfo,
}

fn error_body(message: impl Into<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": message.into() }))
}

async fn health_check(State(service): State<Arc<ParkingService>>) -> Json<HealthCheckResponse> {
    let status = service.status();
    Json(HealthCheckResponse {
        status: Health::from_status(&status),
        policy: service.policy(),
        version: service.version().clone(),
    })
}

async fn park_vehicle(
    State(service): State<Arc<ParkingService>>,
    Json(request): Json<ParkingRequest>,
) -> impl IntoResponse {
    match service.park(request) {
        Ok(ParkOutcome::Parked(spot)) => (StatusCode::CREATED, Json(serde_json::json!(spot))),
        Ok(ParkOutcome::Unavailable) => (
            StatusCode::CONFLICT,
            error_body("No spots available for this vehicle"),
        ),
        Err(e) => (StatusCode::CONFLICT, error_body(e.to_string())),
    }
}

async fn locate_vehicle(
    State(service): State<Arc<ParkingService>>,
    Path(plate): Path<String>,
) -> impl IntoResponse {
    match service.locate(&plate) {
        Some(spot) => (StatusCode::OK, Json(serde_json::json!(spot))),
        None => (StatusCode::NOT_FOUND, error_body("Vehicle not found")),
    }
}

async fn remove_vehicle(
    State(service): State<Arc<ParkingService>>,
    Path(plate): Path<String>,
) -> impl IntoResponse {
    match service.remove(&plate) {
        Some(spot) => (StatusCode::OK, Json(serde_json::json!(spot))),
        None => (StatusCode::NOT_FOUND, error_body("Vehicle not found")),
    }
}

async fn status(State(service): State<Arc<ParkingService>>) -> impl IntoResponse {
    Json(service.status())
}

async fn reserved_spots(
    State(service): State<Arc<ParkingService>>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    match kind.parse::<SpotKind>() {
        Ok(kind) => (StatusCode::OK, Json(serde_json::json!(service.reserved(kind)))),
        Err(e) => (StatusCode::BAD_REQUEST, error_body(e.to_string())),
    }
}

async fn priority_vehicles(State(service): State<Arc<ParkingService>>) -> impl IntoResponse {
    Json(service.priority_occupied())
}

async fn shutdown(State(service): State<Arc<ParkingService>>) -> impl IntoResponse {
    tracing::info!("Shutdown requested via HTTP");
    service.trigger_shutdown();
    (StatusCode::OK, Json(serde_json::json!({})))
}

pub fn routes(service: Arc<ParkingService>) -> Router {
    Router::new()
        .route("/health-check", get(health_check))
        .route("/status", get(status))
        .route("/vehicles", post(park_vehicle))
        .route(
            "/vehicles/{plate}",
            get(locate_vehicle).delete(remove_vehicle),
        )
        .route("/reserved/{kind}", get(reserved_spots))
        .route("/priority", get(priority_vehicles))
        .route("/shutdown", post(shutdown))
        .with_state(service)
}
