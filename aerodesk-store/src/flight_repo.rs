use aerodesk_core::models::{Flight, FlightUpdate};
use aerodesk_core::repository::FlightRepository;
use aerodesk_core::{CoreError, CoreResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repo_error;

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    flight_name: String,
    flight_id: String,
    origin: String,
    destination: String,
    departure_time: String,
    arrival_time: String,
    base_price: f64,
    total_seats: i32,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_name: row.flight_name,
            flight_id: row.flight_id,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            base_price: row.base_price,
            total_seats: row.total_seats,
        }
    }
}

const SELECT_FLIGHT: &str = r#"
    SELECT id, flight_name, flight_id, origin, destination, departure_time, arrival_time, base_price, total_seats
    FROM flights
"#;

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn insert_flight(&self, flight: &Flight) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO flights (id, flight_name, flight_id, origin, destination, departure_time, arrival_time, base_price, total_seats)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(flight.id)
        .bind(&flight.flight_name)
        .bind(&flight.flight_id)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(&flight.departure_time)
        .bind(&flight.arrival_time)
        .bind(flight.base_price)
        .bind(flight.total_seats)
        .execute(&self.pool)
        .await
        .map_err(repo_error)?;

        Ok(())
    }

    async fn find_flight(&self, id: Uuid) -> CoreResult<Option<Flight>> {
        let row: Option<FlightRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_FLIGHT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repo_error)?;

        Ok(row.map(Flight::from))
    }

    async fn list_flights(&self) -> CoreResult<Vec<Flight>> {
        let rows: Vec<FlightRow> = sqlx::query_as(SELECT_FLIGHT)
            .fetch_all(&self.pool)
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn search_flights(&self, origin: &str, destination: &str) -> CoreResult<Vec<Flight>> {
        let rows: Vec<FlightRow> = sqlx::query_as(&format!(
            "{} WHERE origin = $1 AND destination = $2",
            SELECT_FLIGHT
        ))
        .bind(origin)
        .bind(destination)
        .fetch_all(&self.pool)
        .await
        .map_err(repo_error)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn update_flight(&self, update: &FlightUpdate) -> CoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE flights
            SET flight_name = COALESCE($2, flight_name),
                flight_id = COALESCE($3, flight_id),
                origin = COALESCE($4, origin),
                destination = COALESCE($5, destination),
                departure_time = COALESCE($6, departure_time),
                arrival_time = COALESCE($7, arrival_time),
                base_price = COALESCE($8, base_price),
                total_seats = COALESCE($9, total_seats)
            WHERE id = $1
            "#,
        )
        .bind(update.id)
        .bind(&update.flight_name)
        .bind(&update.flight_id)
        .bind(&update.origin)
        .bind(&update.destination)
        .bind(&update.departure_time)
        .bind(&update.arrival_time)
        .bind(update.base_price)
        .bind(update.total_seats)
        .execute(&self.pool)
        .await
        .map_err(repo_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFoundError(format!("Flight {}", update.id)));
        }
        Ok(())
    }
}
