//! Reservation Repository

use shared::models::{Reservation, ReservationCreate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::booking::availability::overlaps;

const COLUMNS: &str = "id, table_number, date, duration, full_name, phone, email, number_of_seats, verification_code";

/// Find all reservations whose start instant falls in `[day_start, day_end)`
pub async fn find_on_day(
    pool: &SqlitePool,
    day_start: i64,
    day_end: i64,
) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE date >= ? AND date < ? ORDER BY date"
    ))
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Find a reservation by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("SELECT {COLUMNS} FROM reservation WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(reservation)
}

/// Atomically re-check the no-overlap invariant and insert
///
/// The availability query a client ran earlier and this insert are two
/// separate operations, so two concurrent creates for the same
/// table/window could both pass the read-side check. The re-check and
/// the INSERT therefore run in one IMMEDIATE transaction: SQLite's
/// single-writer lock serializes the pair, and the loser sees the
/// winner's row and gets Conflict.
///
/// `day_start`/`day_end` bound the day-bucket the overlap rule is
/// scoped to (same calendar day as the requested start).
pub async fn create_checked(
    pool: &SqlitePool,
    data: &ReservationCreate,
    day_start: i64,
    day_end: i64,
) -> RepoResult<Reservation> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let same_day: Vec<Reservation> = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE table_number = ? AND date >= ? AND date < ?"
    ))
    .bind(data.table_number)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(&mut *tx)
    .await?;

    if same_day
        .iter()
        .any(|r| overlaps(data.date, data.finish(), r.date, r.finish()))
    {
        // tx dropped here — rolls back
        return Err(RepoError::Conflict(format!(
            "Table {} is already reserved in this window",
            data.table_number
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reservation (table_number, date, duration, full_name, phone, email, number_of_seats) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.table_number)
    .bind(data.date)
    .bind(data.duration)
    .bind(&data.full_name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.number_of_seats)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Store (or overwrite) the pending cancellation code
pub async fn set_verification_code(pool: &SqlitePool, id: i64, code: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE reservation SET verification_code = ? WHERE id = ?")
        .bind(code)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

/// Delete a reservation (confirmed cancellation)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
