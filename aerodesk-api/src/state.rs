use std::sync::Arc;

use aerodesk_core::memory::InMemoryStore;
use aerodesk_core::repository::{BookingRepository, FlightRepository, UserRepository};
use aerodesk_store::app_config::RateLimitConfig;
use aerodesk_store::{PostgresBookingRepository, PostgresFlightRepository, PostgresUserRepository, RedisClient};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    /// `None` disables rate limiting.
    pub redis: Option<Arc<RedisClient>>,
    pub rate_limit: RateLimitConfig,
}

impl AppState {
    pub fn postgres(pool: PgPool, redis: Option<Arc<RedisClient>>, rate_limit: RateLimitConfig) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            flights: Arc::new(PostgresFlightRepository::new(pool.clone())),
            bookings: Arc::new(PostgresBookingRepository::new(pool)),
            redis,
            rate_limit,
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            flights: store.clone(),
            bookings: store,
            redis: None,
            rate_limit: RateLimitConfig::default(),
        }
    }
}
