//! Reservation Model

use serde::{Deserialize, Serialize};

use crate::MILLIS_PER_HOUR;

/// Reservation record (预订记录)
///
/// Immutable after creation except for `verification_code`, which is
/// set while a cancellation is pending and disappears with the row
/// when the cancellation is confirmed.
///
/// `date` is the start instant in Unix millis; `duration` is whole
/// hours. Repositories only ever see these `i64` forms — the API
/// layer owns all string parsing/formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// Owning table's business number
    pub table_number: i64,
    /// Start instant (Unix millis)
    pub date: i64,
    /// Duration in hours (>= 1)
    pub duration: i64,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub number_of_seats: i64,
    /// 6-digit cancellation code, present only while a cancellation
    /// request is pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<i64>,
}

impl Reservation {
    /// End instant of the occupied window (Unix millis)
    pub fn finish(&self) -> i64 {
        self.date + self.duration * MILLIS_PER_HOUR
    }
}

/// Create reservation payload (repository input)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub table_number: i64,
    pub date: i64,
    pub duration: i64,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub number_of_seats: i64,
}

impl ReservationCreate {
    /// End instant of the requested window (Unix millis)
    pub fn finish(&self) -> i64 {
        self.date + self.duration * MILLIS_PER_HOUR
    }
}
