use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Approval, Booking, BookingDraft, BookingStatus, Flight, FlightUpdate, User};
use crate::seat::SeatScope;
use crate::CoreResult;

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `ValidationError` when the email is already registered.
    async fn insert_user(&self, user: &User) -> CoreResult<()>;

    async fn find_user(&self, id: Uuid) -> CoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> CoreResult<Option<User>>;

    async fn list_users(&self) -> CoreResult<Vec<User>>;

    /// Fails with `NotFoundError` for an unknown id.
    async fn set_approval(&self, id: Uuid, approval: Approval) -> CoreResult<()>;
}

/// Repository trait for flight inventory
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn insert_flight(&self, flight: &Flight) -> CoreResult<()>;

    async fn find_flight(&self, id: Uuid) -> CoreResult<Option<Flight>>;

    async fn list_flights(&self) -> CoreResult<Vec<Flight>>;

    async fn search_flights(&self, origin: &str, destination: &str) -> CoreResult<Vec<Flight>>;

    /// Writes only the fields set in `update`, in one step so concurrent partial
    /// updates to different fields all land. Fails with `NotFoundError` if there is no such flight.
    async fn update_flight(&self, update: &FlightUpdate) -> CoreResult<()>;
}

/// Repository trait for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every booking in the scope, cancelled ones included.
    async fn find_by_scope(&self, scope: &SeatScope) -> CoreResult<Vec<Booking>>;

    /// Assigns seat codes and persists the booking as one step.
    ///
    /// Implementations serialize this per scope: the seat count read and the
    /// insert may not interleave with another `book` on the same scope.
    async fn book(&self, draft: BookingDraft) -> CoreResult<Booking>;

    async fn list_bookings(&self) -> CoreResult<Vec<Booking>>;

    /// Fails with `NotFoundError` for an unknown id.
    async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CoreResult<()>;
}
