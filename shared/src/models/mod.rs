//! Domain Models

pub mod reservation;
pub mod table;

pub use reservation::{Reservation, ReservationCreate};
pub use table::DiningTable;
