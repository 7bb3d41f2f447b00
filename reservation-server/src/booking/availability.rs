//! Availability Engine
//!
//! 回答 "N 个人在时刻 T 预订 D 小时，哪些桌子空闲"。
//!
//! 重叠判定是 closed-interval：窗口端点相触也算冲突 (一桌的结束
//! 时刻不能被另一单当作开始时刻复用)。判定逻辑只有 [`overlaps`]
//! 这一处定义，repository 的原子复查也复用它。
//!
//! Day-bucket: 只和请求开始时刻同一日历日的预订比较 —— 这是源
//! 系统的既定范围限制，不是跨日冲突检查。

use shared::models::DiningTable;
use sqlx::SqlitePool;

use crate::db::repository::{reservation, table};
use crate::utils::AppResult;
use crate::utils::time::{day_bounds_millis, millis_to_naive};
use shared::MILLIS_PER_HOUR;

/// Closed-interval overlap between `[start, finish]` and
/// `[other_start, other_finish]` (all Unix millis)
///
/// True when the windows share any instant, including exact boundary
/// touches. The endpoints deliberately compare with `<=`/`>=`.
pub fn overlaps(start: i64, finish: i64, other_start: i64, other_finish: i64) -> bool {
    if start <= other_start && other_start <= finish {
        return true;
    }
    if start <= other_finish && other_finish <= finish {
        return true;
    }
    // Existing window fully swallows the candidate window
    other_start < start && other_finish > finish
}

/// Compute the set of tables free for `min_seats` guests in the
/// window starting at `start_millis` for `duration_hours`
///
/// Pure read. Callers must have rejected `min_seats <= 0` and
/// out-of-range `duration_hours` already (API layer, 400) — the
/// window arithmetic here assumes a bounded duration.
pub async fn available_tables(
    pool: &SqlitePool,
    min_seats: i64,
    start_millis: i64,
    duration_hours: i64,
) -> AppResult<Vec<DiningTable>> {
    let finish = start_millis + duration_hours * MILLIS_PER_HOUR;
    let (day_start, day_end) = day_bounds_millis(millis_to_naive(start_millis));

    let same_day = reservation::find_on_day(pool, day_start, day_end).await?;
    let reserved: Vec<i64> = same_day
        .iter()
        .filter(|r| overlaps(start_millis, finish, r.date, r.finish()))
        .map(|r| r.table_number)
        .collect();

    let tables = table::find_all(pool).await?;
    Ok(tables
        .into_iter()
        .filter(|t| t.fits_seats(min_seats) && !reserved.contains(&t.number))
        .collect())
}

/// Convenience: is this specific table in the free set?
pub async fn table_is_available(
    pool: &SqlitePool,
    table_number: i64,
    min_seats: i64,
    start_millis: i64,
    duration_hours: i64,
) -> AppResult<bool> {
    let free = available_tables(pool, min_seats, start_millis, duration_hours).await?;
    Ok(free.iter().any(|t| t.number == table_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::{naive_to_millis, parse_request_date};

    fn ms(s: &str) -> i64 {
        naive_to_millis(parse_request_date(Some(s)).unwrap())
    }

    const HOUR: i64 = MILLIS_PER_HOUR;

    #[test]
    fn disjoint_windows_do_not_overlap() {
        let a = ms("2021-10-19 12:00:00");
        // [12:00, 13:00] vs [14:00, 15:00]
        assert!(!overlaps(a, a + HOUR, a + 2 * HOUR, a + 3 * HOUR));
        // and symmetrically
        assert!(!overlaps(a + 2 * HOUR, a + 3 * HOUR, a, a + HOUR));
    }

    #[test]
    fn contained_and_containing_windows_overlap() {
        let a = ms("2021-10-19 16:00:00");
        // existing [16:00, 19:00] vs candidate [17:00, 18:00]
        assert!(overlaps(a + HOUR, a + 2 * HOUR, a, a + 3 * HOUR));
        // candidate swallows existing
        assert!(overlaps(a, a + 3 * HOUR, a + HOUR, a + 2 * HOUR));
    }

    #[test]
    fn partial_overlap_both_sides() {
        let a = ms("2021-10-19 16:00:00");
        // candidate [15:00, 17:00] vs existing [16:00, 19:00]
        assert!(overlaps(a - HOUR, a + HOUR, a, a + 3 * HOUR));
        // candidate [18:00, 20:00] vs existing [16:00, 19:00]
        assert!(overlaps(a + 2 * HOUR, a + 4 * HOUR, a, a + 3 * HOUR));
    }

    #[test]
    fn touching_boundaries_count_as_overlap() {
        let a = ms("2021-10-19 16:00:00");
        // candidate starts exactly at the existing finish (19:00)
        assert!(overlaps(a + 3 * HOUR, a + 4 * HOUR, a, a + 3 * HOUR));
        // candidate finishes exactly at the existing start
        assert!(overlaps(a - HOUR, a, a, a + 3 * HOUR));
    }

    #[test]
    fn identical_windows_overlap() {
        let a = ms("2021-10-19 16:00:00");
        assert!(overlaps(a, a + HOUR, a, a + HOUR));
    }

    // Existing reservation 16:00 + 3h on a table. A 17:00 + 1h query
    // conflicts (existing window swallows it); a 19:00 + 1h query
    // conflicts too, purely via the boundary rule.
    #[test]
    fn evening_booking_blocks_inner_and_boundary_queries() {
        let existing_start = ms("2021-10-19 16:00:00");
        let existing_finish = existing_start + 3 * HOUR;

        let q1 = ms("2021-10-19 17:00:00");
        assert!(overlaps(q1, q1 + HOUR, existing_start, existing_finish));

        let q2 = ms("2021-10-19 19:00:00");
        assert!(overlaps(q2, q2 + HOUR, existing_start, existing_finish));

        let q3 = ms("2021-10-19 20:00:01");
        assert!(!overlaps(q3, q3 + HOUR, existing_start, existing_finish));
    }
}
