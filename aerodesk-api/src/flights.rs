use aerodesk_core::models::{Flight, FlightUpdate, NewFlight};
use aerodesk_core::CoreError;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::message;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchFlightsRequest {
    pub origin: String,
    pub destination: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add-flight", post(add_flight))
        .route("/update-flight", put(update_flight))
        .route("/fetch-flights", get(fetch_flights))
        .route("/fetch-flight/{id}", get(fetch_flight))
        .route("/search-flights", post(search_flights))
}

async fn add_flight(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewFlight>,
) -> Result<Json<Value>, AppError> {
    let flight = req.into_flight();
    state.flights.insert_flight(&flight).await?;
    info!("Flight {} added as {}", flight.flight_id, flight.id);
    Ok(message("Flight added"))
}

async fn update_flight(
    State(state): State<AppState>,
    AppJson(req): AppJson<FlightUpdate>,
) -> Result<Json<Value>, AppError> {
    state.flights.update_flight(&req).await.map_err(|e| match e {
        CoreError::NotFoundError(_) => AppError::NotFoundError("Flight not found".to_string()),
        other => other.into(),
    })?;
    info!("Flight {} updated", req.id);
    Ok(message("Flight updated"))
}

async fn fetch_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.list_flights().await?))
}

async fn fetch_flight(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Flight>, AppError> {
    state
        .flights
        .find_flight(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))
}

async fn search_flights(
    State(state): State<AppState>,
    AppJson(req): AppJson<SearchFlightsRequest>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.search_flights(&req.origin, &req.destination).await?))
}
