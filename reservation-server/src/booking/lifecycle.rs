//! Reservation Lifecycle Manager
//!
//! 创建 / 按日列表 / 两步取消协议。
//!
//! 取消协议状态机 (per reservation):
//!
//! ```text
//! Active (code = NULL)
//!   --request_cancellation-->  PendingCancellation (code = 6 位数)
//!   --confirm_cancellation(match)-->  Deleted
//! ```
//!
//! 重复 request 覆盖旧 code (单一有效码，不留历史)；confirm 不匹配
//! 不改变任何状态，也没有尝试次数限制。

use rand::Rng;
use shared::models::{Reservation, ReservationCreate};
use sqlx::SqlitePool;

use crate::booking::availability;
use crate::db::repository::reservation as reservation_repo;
use crate::db::repository::table as table_repo;
use crate::notify::{self, Mailer, messages};
use crate::utils::time::{day_bounds_millis, millis_to_naive};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, validate_duration, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::MILLIS_PER_HOUR;

/// Cancellation requests are rejected this close to the start instant
pub const CANCELLATION_CUTOFF_MILLIS: i64 = 2 * MILLIS_PER_HOUR;

/// Verification codes are 6-digit integers in this inclusive range
pub const CODE_MIN: i64 = 100_000;
pub const CODE_MAX: i64 = 999_999;

/// Create a reservation
///
/// Order of checks: table lookup (NotFound) → field constraints
/// (Validation) → availability re-check (Conflict) → atomic
/// check-and-insert (closes the race between a client's earlier
/// availability query and this write) → fire-and-forget confirmation
/// email.
pub async fn create_reservation(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    req: ReservationCreate,
) -> AppResult<Reservation> {
    let table = table_repo::find_by_number(pool, req.table_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", req.table_number)))?;

    validate_required_text(&req.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_PHONE_LEN)?;
    validate_email(&req.email)?;
    validate_duration(req.duration)?;
    if req.number_of_seats < 1 {
        return Err(AppError::validation("number_of_seats must be positive"));
    }
    if !table.fits_seats(req.number_of_seats) {
        return Err(AppError::validation(format!(
            "Table {} seats {} to {} guests, requested {}",
            table.number, table.min_number_of_seats, table.max_number_of_seats, req.number_of_seats
        )));
    }

    // Re-run the availability engine at write time
    if !availability::table_is_available(pool, req.table_number, req.number_of_seats, req.date, req.duration).await? {
        return Err(AppError::conflict(format!(
            "Table {} is not available for the requested window",
            req.table_number
        )));
    }

    // The read above and the insert are still two operations; the
    // repository repeats the overlap check inside one IMMEDIATE
    // transaction with the INSERT.
    let (day_start, day_end) = day_bounds_millis(millis_to_naive(req.date));
    let reservation = reservation_repo::create_checked(pool, &req, day_start, day_end).await?;

    tracing::info!(
        id = reservation.id,
        table = reservation.table_number,
        seats = reservation.number_of_seats,
        "Reservation created"
    );

    // After commit, outside any transaction. Delivery failure is
    // logged and ignored; the reservation stands either way.
    notify::send_fire_and_forget(
        mailer,
        messages::CONFIRMATION_SUBJECT,
        &messages::confirmation_body(&reservation),
        &reservation.email,
    )
    .await;

    Ok(reservation)
}

/// List all reservations on the calendar day containing `start_millis`
pub async fn list_reservations(
    pool: &SqlitePool,
    start_millis: i64,
) -> AppResult<Vec<Reservation>> {
    let (day_start, day_end) = day_bounds_millis(millis_to_naive(start_millis));
    Ok(reservation_repo::find_on_day(pool, day_start, day_end).await?)
}

/// Request cancellation: issue a fresh 6-digit code and email it
///
/// Calling this again overwrites any previously issued code — only
/// the most recent one is accepted by [`confirm_cancellation`].
pub async fn request_cancellation(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    id: i64,
    now_millis: i64,
) -> AppResult<()> {
    let reservation = reservation_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

    if reservation.date - now_millis < CANCELLATION_CUTOFF_MILLIS {
        return Err(AppError::method_not_allowed(
            "Reservations cannot be cancelled less than 2 hours before start",
        ));
    }

    let code = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
    reservation_repo::set_verification_code(pool, id, code).await?;

    tracing::info!(id, "Cancellation requested, verification code issued");

    notify::send_fire_and_forget(
        mailer,
        messages::CANCELLATION_SUBJECT,
        &messages::cancellation_body(code),
        &reservation.email,
    )
    .await;

    Ok(())
}

/// Confirm cancellation: delete the reservation when the code matches
///
/// A mismatch (including the never-requested case, where no code is
/// stored) leaves the reservation untouched. No email on this path.
pub async fn confirm_cancellation(pool: &SqlitePool, id: i64, supplied_code: i64) -> AppResult<()> {
    let reservation = reservation_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;

    if !(CODE_MIN..=CODE_MAX).contains(&supplied_code) {
        return Err(AppError::validation(
            "verification_code must be a 6-digit integer",
        ));
    }

    if reservation.verification_code != Some(supplied_code) {
        return Err(AppError::unauthorized("Verification code mismatch"));
    }

    reservation_repo::delete(pool, id).await?;
    tracing::info!(id, "Reservation cancelled and deleted");
    Ok(())
}
