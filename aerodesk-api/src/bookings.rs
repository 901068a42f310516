use aerodesk_core::models::{Booking, BookingDraft, BookingStatus, Passenger};
use aerodesk_core::SeatClass;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::message;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicketRequest {
    pub user: Uuid,
    pub flight: Uuid,
    pub flight_name: String,
    pub flight_id: String,
    pub departure: String,
    pub destination: String,
    pub email: String,
    pub mobile: String,
    pub passengers: Vec<Passenger>,
    pub total_price: f64,
    pub journey_date: NaiveDate,
    pub journey_time: String,
    /// Kept as text so unknown classes surface as `InvalidSeatClass`, not a body rejection.
    pub seat_class: String,
}

impl BookTicketRequest {
    fn into_draft(self) -> Result<BookingDraft, AppError> {
        let seat_class: SeatClass = self.seat_class.parse()?;

        Ok(BookingDraft {
            user: self.user,
            flight: self.flight,
            flight_name: self.flight_name,
            flight_id: self.flight_id,
            departure: self.departure,
            destination: self.destination,
            email: self.email,
            mobile: self.mobile,
            passengers: self.passengers,
            total_price: self.total_price,
            journey_date: self.journey_date,
            journey_time: self.journey_time,
            seat_class,
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book-ticket", post(book_ticket))
        .route("/cancel-ticket/{id}", put(cancel_ticket))
        .route("/fetch-bookings", get(fetch_bookings))
}

async fn book_ticket(
    State(state): State<AppState>,
    AppJson(req): AppJson<BookTicketRequest>,
) -> Result<Json<Value>, AppError> {
    let draft = req.into_draft()?;
    let booking = state.bookings.book(draft).await?;

    info!(
        "Booking {} confirmed on flight {} ({}) seats [{}]",
        booking.id, booking.flight_id, booking.journey_date, booking.seats
    );
    Ok(message("Booking successful!"))
}

async fn cancel_ticket(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.bookings.set_booking_status(id, BookingStatus::Cancelled).await?;
    info!("Booking {} cancelled", id);
    Ok(message("Booking cancelled"))
}

async fn fetch_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list_bookings().await?))
}
