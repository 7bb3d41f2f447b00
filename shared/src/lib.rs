//! Shared domain models for the reservation backend
//!
//! 预订系统共享模型：桌台 (reference data) 和预订记录。
//! 所有时间字段统一为 `i64` Unix millis，字符串日期只存在于 API 层。

pub mod models;

pub use models::{DiningTable, Reservation, ReservationCreate};

/// Milliseconds in one hour (duration 换算用)
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
