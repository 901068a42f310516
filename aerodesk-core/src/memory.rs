use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{Approval, Booking, BookingDraft, BookingStatus, Flight, FlightUpdate, User};
use crate::repository::{BookingRepository, FlightRepository, UserRepository};
use crate::seat::{assign_seats, SeatScope};
use crate::{CoreError, CoreResult};

/// In-memory store backing every repository trait.
///
/// Used by tests and local runs without Postgres. Each collection sits behind
/// its own async mutex, so `book` reads the scope and appends under one lock.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    flights: Mutex<Vec<Flight>>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_user(&self, user: &User) -> CoreResult<()> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(CoreError::ValidationError("User already exists".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> CoreResult<Option<User>> {
        Ok(self.users.lock().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        Ok(self.users.lock().await.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> CoreResult<Vec<User>> {
        Ok(self.users.lock().await.clone())
    }

    async fn set_approval(&self, id: Uuid, approval: Approval) -> CoreResult<()> {
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| CoreError::NotFoundError(format!("User {}", id)))?;
        user.approval = approval;
        Ok(())
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn insert_flight(&self, flight: &Flight) -> CoreResult<()> {
        self.flights.lock().await.push(flight.clone());
        Ok(())
    }

    async fn find_flight(&self, id: Uuid) -> CoreResult<Option<Flight>> {
        Ok(self.flights.lock().await.iter().find(|f| f.id == id).cloned())
    }

    async fn list_flights(&self) -> CoreResult<Vec<Flight>> {
        Ok(self.flights.lock().await.clone())
    }

    async fn search_flights(&self, origin: &str, destination: &str) -> CoreResult<Vec<Flight>> {
        Ok(self
            .flights
            .lock()
            .await
            .iter()
            .filter(|f| f.origin == origin && f.destination == destination)
            .cloned()
            .collect())
    }

    async fn update_flight(&self, update: &FlightUpdate) -> CoreResult<()> {
        let mut flights = self.flights.lock().await;
        let stored = flights
            .iter_mut()
            .find(|f| f.id == update.id)
            .ok_or_else(|| CoreError::NotFoundError(format!("Flight {}", update.id)))?;
        update.apply(stored);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_scope(&self, scope: &SeatScope) -> CoreResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .await
            .iter()
            .filter(|b| b.scope() == *scope)
            .cloned()
            .collect())
    }

    async fn book(&self, draft: BookingDraft) -> CoreResult<Booking> {
        let scope = draft.scope();
        let mut bookings = self.bookings.lock().await;

        let in_scope: Vec<Booking> = bookings.iter().filter(|b| b.scope() == scope).cloned().collect();
        let seats = assign_seats(scope.seat_class, &in_scope, draft.passenger_count())?;

        let booking = draft.into_booking(&seats);
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        Ok(self.bookings.lock().await.clone())
    }

    async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CoreResult<()> {
        let mut bookings = self.bookings.lock().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFoundError(format!("Booking {}", id)))?;
        booking.booking_status = status;
        Ok(())
    }
}
