use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::seat::{SeatClass, SeatCode, SeatScope};
use crate::{CoreError, CoreResult};

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserType {
    Admin,
    Customer,
    FlightOperator,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Customer => "customer",
            UserType::FlightOperator => "flight-operator",
        }
    }

    pub fn parse(value: &str) -> CoreResult<Self> {
        match value {
            "admin" => Ok(UserType::Admin),
            "customer" => Ok(UserType::Customer),
            "flight-operator" => Ok(UserType::FlightOperator),
            other => Err(CoreError::ValidationError(format!("Unknown user type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Approval {
    Approved,
    NotApproved,
    Rejected,
}

impl Approval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Approval::Approved => "approved",
            Approval::NotApproved => "not-approved",
            Approval::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> CoreResult<Self> {
        match value {
            "approved" => Ok(Approval::Approved),
            "not-approved" => Ok(Approval::NotApproved),
            "rejected" => Ok(Approval::Rejected),
            other => Err(CoreError::ValidationError(format!("Unknown approval state: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub usertype: UserType,
    /// bcrypt hash, never sent to clients
    #[serde(skip_serializing)]
    pub password: String,
    pub approval: Approval,
}

impl User {
    /// Flight operators start out unapproved and need an admin to let them in.
    pub fn register(username: String, email: String, usertype: UserType, password_hash: String) -> Self {
        let approval = match usertype {
            UserType::FlightOperator => Approval::NotApproved,
            _ => Approval::Approved,
        };

        Self {
            id: Uuid::new_v4(),
            username,
            email,
            usertype,
            password: password_hash,
            approval,
        }
    }
}

// ============================================================================
// Flights
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight_name: String,
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: f64,
    pub total_seats: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlight {
    pub flight_name: String,
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: f64,
    pub total_seats: i32,
}

impl NewFlight {
    pub fn into_flight(self) -> Flight {
        Flight {
            id: Uuid::new_v4(),
            flight_name: self.flight_name,
            flight_id: self.flight_id,
            origin: self.origin,
            destination: self.destination,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            base_price: self.base_price,
            total_seats: self.total_seats,
        }
    }
}

/// Partial update: only the supplied fields overwrite the stored flight.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightUpdate {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight_name: Option<String>,
    pub flight_id: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub base_price: Option<f64>,
    pub total_seats: Option<i32>,
}

impl FlightUpdate {
    pub fn apply(&self, flight: &mut Flight) {
        if let Some(v) = &self.flight_name { flight.flight_name = v.clone(); }
        if let Some(v) = &self.flight_id { flight.flight_id = v.clone(); }
        if let Some(v) = &self.origin { flight.origin = v.clone(); }
        if let Some(v) = &self.destination { flight.destination = v.clone(); }
        if let Some(v) = &self.departure_time { flight.departure_time = v.clone(); }
        if let Some(v) = &self.arrival_time { flight.arrival_time = v.clone(); }
        if let Some(v) = self.base_price { flight.base_price = v; }
        if let Some(v) = self.total_seats { flight.total_seats = v; }
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Active booking
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> CoreResult<Self> {
        match value {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(CoreError::ValidationError(format!("Unknown booking status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub flight: Uuid,
    pub flight_name: String,
    pub flight_id: String,
    pub departure: String,
    pub destination: String,
    pub email: String,
    pub mobile: String,
    /// Seat codes joined with ", ", one per passenger in passenger order
    pub seats: String,
    pub passengers: Vec<Passenger>,
    pub total_price: f64,
    pub booking_date: DateTime<Utc>,
    pub journey_date: NaiveDate,
    pub journey_time: String,
    pub seat_class: SeatClass,
    pub booking_status: BookingStatus,
}

impl Booking {
    pub fn passenger_count(&self) -> u32 {
        self.passengers.len() as u32
    }

    pub fn scope(&self) -> SeatScope {
        SeatScope {
            flight: self.flight,
            journey_date: self.journey_date,
            seat_class: self.seat_class,
        }
    }

    pub fn seat_codes(&self) -> CoreResult<Vec<SeatCode>> {
        self.seats
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

/// A booking request that has passed input checks but has no seats yet.
#[derive(Debug, Clone)]
pub struct BookingDraft {
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
    pub seat_class: SeatClass,
}

impl BookingDraft {
    pub fn scope(&self) -> SeatScope {
        SeatScope {
            flight: self.flight,
            journey_date: self.journey_date,
            seat_class: self.seat_class,
        }
    }

    pub fn passenger_count(&self) -> u32 {
        self.passengers.len() as u32
    }

    pub fn into_booking(self, seats: &[SeatCode]) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user: self.user,
            flight: self.flight,
            flight_name: self.flight_name,
            flight_id: self.flight_id,
            departure: self.departure,
            destination: self.destination,
            email: self.email,
            mobile: self.mobile,
            seats: crate::seat::join_seat_codes(seats),
            passengers: self.passengers,
            total_price: self.total_price,
            booking_date: Utc::now(),
            journey_date: self.journey_date,
            journey_time: self.journey_time,
            seat_class: self.seat_class,
            booking_status: BookingStatus::Confirmed,
        }
    }
}
