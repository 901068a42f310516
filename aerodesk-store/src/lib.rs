pub mod app_config;
pub mod database;
pub mod redis_repo;
pub mod user_repo;
pub mod flight_repo;
pub mod booking_repo;

use aerodesk_core::CoreError;

pub use database::DbClient;
pub use redis_repo::RedisClient;
pub use user_repo::PostgresUserRepository;
pub use flight_repo::PostgresFlightRepository;
pub use booking_repo::PostgresBookingRepository;

pub(crate) fn repo_error(err: sqlx::Error) -> CoreError {
    CoreError::RepositoryError(err.to_string())
}

/// Rows that fail to decode into domain types mean the table holds data this build does not understand.
pub(crate) fn corrupt_row(err: CoreError) -> CoreError {
    CoreError::RepositoryError(format!("Corrupt row: {}", err))
}
