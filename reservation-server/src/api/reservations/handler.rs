//! Reservation API Handlers
//!
//! 写路径的 JSON 字段沿用上游 API 的 camelCase 字符串值格式
//! (`{"duration": "3", "tableNumber": "2", ...}`)；所有字符串→数字
//! 的解析在这里完成，booking 层只见 `i64`。

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::models::{Reservation, ReservationCreate};

use crate::booking::lifecycle;
use crate::core::ServerState;
use crate::utils::time::{format_millis, naive_to_millis, parse_request_date};
use crate::utils::{AppError, AppResult};

/// 预订视图 — 桌台编号和日期都序列化为字符串 (沿用上游 API 的
/// 响应格式)，日期为微秒精度
#[derive(Debug, Serialize)]
pub struct ReservationView {
    pub table: String,
    pub date: String,
    pub duration: i64,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub number_of_seats: i64,
}

impl From<&Reservation> for ReservationView {
    fn from(r: &Reservation) -> Self {
        Self {
            table: r.table_number.to_string(),
            date: format_millis(r.date),
            duration: r.duration,
            full_name: r.full_name.clone(),
            phone: r.phone.clone(),
            email: r.email.clone(),
            number_of_seats: r.number_of_seats,
        }
    }
}

/// GET /reservations 查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    start_date: Option<String>,
}

/// GET /reservations?start_date=... - 当日预订列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let start = parse_request_date(query.start_date.as_deref())?;
    let reservations = lifecycle::list_reservations(&state.pool, naive_to_millis(start)).await?;
    Ok(Json(reservations.iter().map(ReservationView::from).collect()))
}

/// POST /reservations 请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    date: String,
    duration: String,
    table_number: String,
    full_name: String,
    phone: String,
    email: String,
    number_of_seats: String,
}

/// POST /reservations - 创建预订
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationView>)> {
    let date = parse_request_date(Some(&payload.date))?;
    let duration: i64 = payload
        .duration
        .parse()
        .map_err(|_| AppError::invalid("duration must be an integer"))?;
    let number_of_seats: i64 = payload
        .number_of_seats
        .parse()
        .map_err(|_| AppError::invalid("numberOfSeats must be an integer"))?;
    // An unparseable table number can never name a known table
    let table_number: i64 = payload
        .table_number
        .parse()
        .map_err(|_| AppError::not_found(format!("Table {} not found", payload.table_number)))?;

    let reservation = lifecycle::create_reservation(
        &state.pool,
        state.mailer.as_ref(),
        ReservationCreate {
            table_number,
            date: naive_to_millis(date),
            duration,
            full_name: payload.full_name,
            phone: payload.phone,
            email: payload.email,
            number_of_seats,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ReservationView::from(&reservation))))
}

/// 取消动作 — PUT 请求体 `status` 字段的封闭枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservationAction {
    RequestedCancellation,
}

impl ReservationAction {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "requested cancellation" => Some(Self::RequestedCancellation),
            _ => None,
        }
    }
}

/// PUT /reservations/{id} 请求体
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    status: String,
}

/// PUT /reservations/{id} - 请求取消，邮件下发验证码
pub async fn request_cancellation(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<bool>> {
    match ReservationAction::parse(&payload.status) {
        Some(ReservationAction::RequestedCancellation) => {}
        None => {
            return Err(AppError::not_found(format!(
                "Unrecognized status: {}",
                payload.status
            )));
        }
    }

    let now_millis = Utc::now().timestamp_millis();
    lifecycle::request_cancellation(&state.pool, state.mailer.as_ref(), id, now_millis).await?;
    Ok(Json(true))
}

/// DELETE /reservations/{id} 请求体
#[derive(Debug, Deserialize)]
pub struct ConfirmCancelRequest {
    verification_code: String,
}

/// DELETE /reservations/{id} - 凭验证码确认取消
pub async fn confirm_cancellation(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ConfirmCancelRequest>,
) -> AppResult<Json<bool>> {
    let code: i64 = payload
        .verification_code
        .parse()
        .map_err(|_| AppError::validation("verification_code must be a 6-digit integer"))?;

    lifecycle::confirm_cancellation(&state.pool, id, code).await?;
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_serializes_table_and_date_as_strings() {
        let r = Reservation {
            id: 7,
            table_number: 2,
            date: 1634659200000, // 2021-10-19 16:00 UTC
            duration: 3,
            full_name: "Paul Smith".into(),
            phone: "997 123 997".into(),
            email: "paul@email.com".into(),
            number_of_seats: 5,
            verification_code: None,
        };
        let json = serde_json::to_value(ReservationView::from(&r)).unwrap();
        assert_eq!(json["table"], "2");
        assert_eq!(json["date"], "2021-10-19 16:00:00.000000");
        assert_eq!(json["duration"], 3);
        assert_eq!(json["number_of_seats"], 5);
    }
}
