use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Booking;
use crate::repository::BookingRepository;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatClass {
    Economy,
    PremiumEconomy,
    Business,
    FirstClass,
}

impl SeatClass {
    pub const ALL: [SeatClass; 4] = [
        SeatClass::Economy,
        SeatClass::PremiumEconomy,
        SeatClass::Business,
        SeatClass::FirstClass,
    ];

    /// Prefix used in seat codes.
    pub fn letter(&self) -> char {
        match self {
            SeatClass::Economy => 'E',
            SeatClass::PremiumEconomy => 'P',
            SeatClass::Business => 'B',
            SeatClass::FirstClass => 'A',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Economy => "economy",
            SeatClass::PremiumEconomy => "premium-economy",
            SeatClass::Business => "business",
            SeatClass::FirstClass => "first-class",
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.letter() == letter)
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| CoreError::InvalidSeatClass(s.to_string()))
    }
}

/// Human-readable seat identifier such as `E-12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatCode {
    class: SeatClass,
    number: u32,
}

impl SeatCode {
    pub fn new(class: SeatClass, number: u32) -> Self {
        Self { class, number }
    }

    pub fn class(&self) -> SeatClass {
        self.class
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for SeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.class.letter(), self.number)
    }
}

impl FromStr for SeatCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::ValidationError(format!("Malformed seat code: {}", s));

        let (prefix, number) = s.split_once('-').ok_or_else(invalid)?;
        let mut letters = prefix.chars();
        let class = match (letters.next(), letters.next()) {
            (Some(letter), None) => SeatClass::from_letter(letter).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        let number: u32 = number.parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }

        Ok(Self { class, number })
    }
}

/// Seat numbers are independent per (flight, journey date, seat class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatScope {
    pub flight: Uuid,
    pub journey_date: NaiveDate,
    pub seat_class: SeatClass,
}

impl SeatScope {
    pub fn new(flight: Uuid, journey_date: NaiveDate, seat_class: SeatClass) -> Self {
        Self { flight, journey_date, seat_class }
    }

    /// Stable key for per-scope locks.
    pub fn lock_key(&self) -> String {
        format!("seats:{}:{}:{}", self.flight, self.journey_date, self.seat_class)
    }
}

/// Seats already handed out in a scope. Cancelled bookings still hold their numbers.
pub fn booked_seat_count(bookings: &[Booking]) -> u32 {
    bookings.iter().map(Booking::passenger_count).sum()
}

/// Codes `{letter}-{already_booked + i}` for i in 1..=passenger_count.
pub fn seat_codes_after(class: SeatClass, already_booked: u32, passenger_count: u32) -> Vec<SeatCode> {
    (1..=passenger_count)
        .map(|i| SeatCode::new(class, already_booked + i))
        .collect()
}

/// Next codes for `passenger_count` travellers given the bookings already in their scope.
///
/// Every booking path goes through here, so a request without passengers is
/// rejected the same way whether it only reads or also persists.
pub fn assign_seats(class: SeatClass, in_scope: &[Booking], passenger_count: u32) -> CoreResult<Vec<SeatCode>> {
    if passenger_count == 0 {
        return Err(CoreError::ValidationError("At least one passenger is required".to_string()));
    }
    Ok(seat_codes_after(class, booked_seat_count(in_scope), passenger_count))
}

pub fn join_seat_codes(codes: &[SeatCode]) -> String {
    codes
        .iter()
        .map(SeatCode::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// Computes the next seat codes for a scope from what the booking store holds.
///
/// `allocate` only reads. Two callers that allocate against the same scope
/// without writing in between get the same codes; use
/// [`BookingRepository::book`] to allocate and persist as one serialized step.
#[derive(Clone)]
pub struct SeatAllocator {
    bookings: Arc<dyn BookingRepository>,
}

impl SeatAllocator {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn allocate(
        &self,
        flight: Uuid,
        journey_date: NaiveDate,
        seat_class: &str,
        passenger_count: u32,
    ) -> CoreResult<Vec<SeatCode>> {
        let seat_class: SeatClass = seat_class.parse()?;
        self.allocate_in(&SeatScope::new(flight, journey_date, seat_class), passenger_count)
            .await
    }

    pub async fn allocate_in(&self, scope: &SeatScope, passenger_count: u32) -> CoreResult<Vec<SeatCode>> {
        let existing = self.bookings.find_by_scope(scope).await?;
        tracing::debug!(
            "Allocating {} seat(s) in {} after {} booked",
            passenger_count,
            scope.lock_key(),
            booked_seat_count(&existing)
        );

        assign_seats(scope.seat_class, &existing, passenger_count)
    }
}
