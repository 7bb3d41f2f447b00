//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// Static reference data: seeded by migration, never mutated by the
/// reservation flow. `number` is the business identifier the API
/// exposes; seat range is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub number: i64,
    pub min_number_of_seats: i64,
    pub max_number_of_seats: i64,
}

impl DiningTable {
    /// 座位数是否落在本桌的容量区间内 (inclusive)
    pub fn fits_seats(&self, seats: i64) -> bool {
        self.min_number_of_seats <= seats && seats <= self.max_number_of_seats
    }
}
