use aerodesk_core::models::{Booking, BookingDraft, BookingStatus, Passenger};
use aerodesk_core::repository::BookingRepository;
use aerodesk_core::seat::{assign_seats, SeatClass, SeatScope};
use aerodesk_core::{CoreError, CoreResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{corrupt_row, repo_error};

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    flight: Uuid,
    flight_name: String,
    flight_id: String,
    departure: String,
    destination: String,
    email: String,
    mobile: String,
    seats: String,
    passengers: Json<Vec<Passenger>>,
    total_price: f64,
    booking_date: DateTime<Utc>,
    journey_date: NaiveDate,
    journey_time: String,
    seat_class: String,
    booking_status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = CoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            user: row.user_id,
            flight: row.flight,
            flight_name: row.flight_name,
            flight_id: row.flight_id,
            departure: row.departure,
            destination: row.destination,
            email: row.email,
            mobile: row.mobile,
            seats: row.seats,
            passengers: row.passengers.0,
            total_price: row.total_price,
            booking_date: row.booking_date,
            journey_date: row.journey_date,
            journey_time: row.journey_time,
            seat_class: row.seat_class.parse::<SeatClass>().map_err(corrupt_row)?,
            booking_status: BookingStatus::parse(&row.booking_status).map_err(corrupt_row)?,
        })
    }
}

const SELECT_BOOKINGS: &str = r#"
    SELECT id, user_id, flight, flight_name, flight_id, departure, destination, email, mobile, seats,
           passengers, total_price, booking_date, journey_date, journey_time, seat_class, booking_status
    FROM bookings
    ORDER BY booking_date
"#;

const SELECT_SCOPE: &str = r#"
    SELECT id, user_id, flight, flight_name, flight_id, departure, destination, email, mobile, seats,
           passengers, total_price, booking_date, journey_date, journey_time, seat_class, booking_status
    FROM bookings
    WHERE flight = $1 AND journey_date = $2 AND seat_class = $3
    ORDER BY booking_date
"#;

async fn fetch_scope<'e, E>(executor: E, scope: &SeatScope) -> CoreResult<Vec<Booking>>
where
    E: sqlx::PgExecutor<'e>,
{
    let rows: Vec<BookingRow> = sqlx::query_as(SELECT_SCOPE)
        .bind(scope.flight)
        .bind(scope.journey_date)
        .bind(scope.seat_class.as_str())
        .fetch_all(executor)
        .await
        .map_err(repo_error)?;

    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_by_scope(&self, scope: &SeatScope) -> CoreResult<Vec<Booking>> {
        fetch_scope(&self.pool, scope).await
    }

    async fn book(&self, draft: BookingDraft) -> CoreResult<Booking> {
        let scope = draft.scope();
        let mut tx = self.pool.begin().await.map_err(repo_error)?;

        // Held until commit/rollback; concurrent bookings on the same scope queue here.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(scope.lock_key())
            .execute(&mut *tx)
            .await
            .map_err(repo_error)?;

        let in_scope = fetch_scope(&mut *tx, &scope).await?;
        let seats = assign_seats(scope.seat_class, &in_scope, draft.passenger_count())?;
        let booking = draft.into_booking(&seats);

        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, flight, flight_name, flight_id, departure, destination, email, mobile,
                                  seats, passengers, total_price, booking_date, journey_date, journey_time,
                                  seat_class, booking_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user)
        .bind(booking.flight)
        .bind(&booking.flight_name)
        .bind(&booking.flight_id)
        .bind(&booking.departure)
        .bind(&booking.destination)
        .bind(&booking.email)
        .bind(&booking.mobile)
        .bind(&booking.seats)
        .bind(Json(&booking.passengers))
        .bind(booking.total_price)
        .bind(booking.booking_date)
        .bind(booking.journey_date)
        .bind(&booking.journey_time)
        .bind(booking.seat_class.as_str())
        .bind(booking.booking_status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(repo_error)?;

        tx.commit().await.map_err(repo_error)?;

        info!("Booking {} stored with seats [{}]", booking.id, booking.seats);
        Ok(booking)
    }

    async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(SELECT_BOOKINGS)
            .fetch_all(&self.pool)
            .await
            .map_err(repo_error)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CoreResult<()> {
        let result = sqlx::query("UPDATE bookings SET booking_status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(repo_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFoundError(format!("Booking {}", id)));
        }
        Ok(())
    }
}
