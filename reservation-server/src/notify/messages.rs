//! Email message bodies
//!
//! Wording follows the original confirmation mail, plus the
//! reservation id so guests can reference their booking.

use shared::models::Reservation;

use crate::utils::time::format_millis_hm;

/// Subject for the creation confirmation email
pub const CONFIRMATION_SUBJECT: &str = "Reservation confirmation";

/// Subject for the cancellation-code email
pub const CANCELLATION_SUBJECT: &str = "Reservation cancellation code";

/// Confirmation body: table, date (YYYY-MM-DD HH:MM), duration,
/// contact info, seat count and the new reservation id
pub fn confirmation_body(reservation: &Reservation) -> String {
    format!(
        "Reservation details:\n Reservation id: {id}\n Table: {table}\n Date: {date}\n Duration: {duration}\n Full name: {full_name}\n Phone: {phone}\n Number of seats: {number_of_seats}",
        id = reservation.id,
        table = reservation.table_number,
        date = format_millis_hm(reservation.date),
        duration = reservation.duration,
        full_name = reservation.full_name,
        phone = reservation.phone,
        number_of_seats = reservation.number_of_seats,
    )
}

/// Cancellation body carrying the 6-digit verification code
pub fn cancellation_body(code: i64) -> String {
    format!(
        "To confirm the cancellation of your reservation, reply with this verification code: {code}"
    )
}
