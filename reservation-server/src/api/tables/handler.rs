//! Free Tables API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::DiningTable;

use crate::booking::availability;
use crate::core::ServerState;
use crate::utils::time::{naive_to_millis, parse_request_date};
use crate::utils::validation::validate_duration;
use crate::utils::{AppError, AppResult};

/// 查询模式 — `status` 参数的封闭枚举
///
/// 曾经的裸字符串门控参数，收敛成显式的请求模式；不认识的值在
/// 分发前拒绝 (404，与上游行为兼容)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableStatusFilter {
    Free,
}

impl TableStatusFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "free" => Some(Self::Free),
            _ => None,
        }
    }
}

/// GET /tables 查询参数
#[derive(Debug, Deserialize)]
pub struct FreeTablesQuery {
    min_seats: Option<String>,
    start_date: Option<String>,
    duration: Option<String>,
    status: Option<String>,
}

/// GET /tables?min_seats&start_date&duration&status=free - 查询空桌
pub async fn list_free(
    State(state): State<ServerState>,
    Query(query): Query<FreeTablesQuery>,
) -> AppResult<Json<Vec<DiningTable>>> {
    match query.status.as_deref().and_then(TableStatusFilter::parse) {
        Some(TableStatusFilter::Free) => {}
        None => {
            return Err(AppError::not_found(
                "Unrecognized status filter (expected status=free)",
            ));
        }
    }

    let min_seats: i64 = query
        .min_seats
        .as_deref()
        .ok_or_else(|| AppError::invalid("Missing min_seats parameter"))?
        .parse()
        .map_err(|_| AppError::invalid("min_seats must be an integer"))?;
    if min_seats < 1 {
        return Err(AppError::validation("min_seats must be positive"));
    }

    let duration: i64 = query
        .duration
        .as_deref()
        .ok_or_else(|| AppError::invalid("Missing duration parameter"))?
        .parse()
        .map_err(|_| AppError::invalid("duration must be an integer"))?;
    validate_duration(duration)?;

    let start = parse_request_date(query.start_date.as_deref())?;

    let tables =
        availability::available_tables(&state.pool, min_seats, naive_to_millis(start), duration)
            .await?;
    Ok(Json(tables))
}
