//! Dining Table Repository
//!
//! Read-only: the table catalog is seeded by migration and never
//! mutated by the reservation flow.

use shared::models::DiningTable;
use sqlx::SqlitePool;

use super::RepoResult;

/// Find all tables in the venue
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT number, min_number_of_seats, max_number_of_seats FROM dining_table ORDER BY number",
    )
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

/// Find a table by its business number
pub async fn find_by_number(pool: &SqlitePool, number: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT number, min_number_of_seats, max_number_of_seats FROM dining_table WHERE number = ?",
    )
    .bind(number)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}
