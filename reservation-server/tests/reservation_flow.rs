//! End-to-end booking flow tests against a real (temporary) SQLite
//! store: availability, creation, and the two-step cancellation
//! protocol.

use reservation_server::booking::{availability, lifecycle};
use reservation_server::db::DbService;
use reservation_server::db::repository::reservation as reservation_repo;
use reservation_server::notify::RecordingMailer;
use reservation_server::utils::AppError;
use reservation_server::utils::time::{naive_to_millis, parse_request_date};
use shared::MILLIS_PER_HOUR;
use shared::models::ReservationCreate;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup() -> (SqlitePool, RecordingMailer, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().unwrap())
        .await
        .expect("db init");
    (db.pool, RecordingMailer::new(), dir)
}

fn ms(s: &str) -> i64 {
    naive_to_millis(parse_request_date(Some(s)).unwrap())
}

fn booking_for(table_number: i64, date: &str, duration: i64, seats: i64) -> ReservationCreate {
    ReservationCreate {
        table_number,
        date: ms(date),
        duration,
        full_name: "Paul Smith".into(),
        phone: "997 123 997".into(),
        email: "paul@email.com".into(),
        number_of_seats: seats,
    }
}

#[tokio::test]
async fn availability_excludes_reserved_and_undersized_tables() {
    let (pool, mailer, _guard) = setup().await;

    // Table 2 (seats 2..=6) holds 16:00 + 3h → window 16:00-19:00
    lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(2, "2021-10-19 16:00:00", 3, 5),
    )
    .await
    .expect("create");

    // 17:00 + 1h sits inside the window → table 2 excluded
    let free = availability::available_tables(&pool, 4, ms("2021-10-19 17:00:00"), 1)
        .await
        .expect("query");
    assert!(!free.iter().any(|t| t.number == 2));
    // Capacity filter still applies to the rest
    assert!(free.iter().all(|t| t.fits_seats(4)));

    // 19:00 + 1h touches the finish boundary → still excluded
    let free = availability::available_tables(&pool, 4, ms("2021-10-19 19:00:00"), 1)
        .await
        .expect("query");
    assert!(!free.iter().any(|t| t.number == 2));

    // 20:00 + 1h is clear of the window → table 2 is back
    let free = availability::available_tables(&pool, 4, ms("2021-10-19 20:00:00"), 1)
        .await
        .expect("query");
    assert!(free.iter().any(|t| t.number == 2));

    // Nobody seats a party of 12
    let free = availability::available_tables(&pool, 12, ms("2021-10-19 12:00:00"), 1)
        .await
        .expect("query");
    assert!(free.is_empty());
}

#[tokio::test]
async fn overlapping_create_conflicts_including_boundary() {
    let (pool, mailer, _guard) = setup().await;

    lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(2, "2021-10-19 16:00:00", 3, 4),
    )
    .await
    .expect("first create");

    // Same window, same table
    let err = lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(2, "2021-10-19 17:00:00", 1, 4),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Starting exactly at the previous finish also conflicts
    let err = lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(2, "2021-10-19 19:00:00", 1, 4),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // A different table is unaffected
    lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(4, "2021-10-19 17:00:00", 1, 4),
    )
    .await
    .expect("other table");
}

#[tokio::test]
async fn create_validates_fields_and_persists_nothing_on_failure() {
    let (pool, mailer, _guard) = setup().await;

    // Table 1 seats 1..=2; a party of 5 is out of range
    let err = lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(1, "2021-10-19 18:00:00", 2, 5),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Unknown table
    let err = lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(99, "2021-10-19 18:00:00", 2, 2),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Absurdly large duration is rejected before any window arithmetic
    let err = lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(2, "2021-10-19 18:00:00", 9_999_999_999_999, 4),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Bad contact fields
    let mut bad_email = booking_for(2, "2021-10-19 18:00:00", 2, 4);
    bad_email.email = "not-an-email".into();
    let err = lifecycle::create_reservation(&pool, &mailer, bad_email)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let listed = lifecycle::list_reservations(&pool, ms("2021-10-19 12:00:00"))
        .await
        .expect("list");
    assert!(listed.is_empty());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn create_sends_confirmation_and_lists_on_the_day() {
    let (pool, mailer, _guard) = setup().await;

    let created = lifecycle::create_reservation(
        &pool,
        &mailer,
        booking_for(2, "2021-10-19 16:00:00", 3, 5),
    )
    .await
    .expect("create");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "paul@email.com");
    assert_eq!(sent[0].subject, "Reservation confirmation");
    assert!(sent[0].body.contains("Table: 2"));
    assert!(sent[0].body.contains("2021-10-19 16:00"));
    assert!(sent[0].body.contains(&format!("Reservation id: {}", created.id)));

    let listed = lifecycle::list_reservations(&pool, ms("2021-10-19 08:00:00"))
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    // A different day is a different bucket
    let listed = lifecycle::list_reservations(&pool, ms("2021-10-20 08:00:00"))
        .await
        .expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn cancellation_protocol_full_round_trip() {
    let (pool, mailer, _guard) = setup().await;

    // Far enough in the future to clear the 2-hour cutoff
    let start = chrono::Utc::now().timestamp_millis() + 24 * MILLIS_PER_HOUR;
    let req = ReservationCreate {
        date: start,
        ..booking_for(2, "2021-10-19 16:00:00", 2, 4)
    };
    let created = lifecycle::create_reservation(&pool, &mailer, req)
        .await
        .expect("create");

    // Confirming before any request was made is Unauthorized, not NotFound
    let err = lifecycle::confirm_cancellation(&pool, created.id, 123_456)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    lifecycle::request_cancellation(&pool, &mailer, created.id, chrono::Utc::now().timestamp_millis())
        .await
        .expect("first request");
    let first_code = reservation_repo::find_by_id(&pool, created.id)
        .await
        .expect("fetch")
        .expect("row")
        .verification_code
        .expect("code stored");
    assert!((100_000..=999_999).contains(&first_code));

    // Re-requesting overwrites the code; only the latest is accepted
    lifecycle::request_cancellation(&pool, &mailer, created.id, chrono::Utc::now().timestamp_millis())
        .await
        .expect("second request");
    let second_code = reservation_repo::find_by_id(&pool, created.id)
        .await
        .expect("fetch")
        .expect("row")
        .verification_code
        .expect("code stored");

    if first_code != second_code {
        let err = lifecycle::confirm_cancellation(&pool, created.id, first_code)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    // Malformed code (not 6 digits) is a validation failure
    let err = lifecycle::confirm_cancellation(&pool, created.id, 12_345)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Both code emails went to the guest
    let cancellation_mails: Vec<_> = mailer
        .sent()
        .into_iter()
        .filter(|m| m.subject == "Reservation cancellation code")
        .collect();
    assert_eq!(cancellation_mails.len(), 2);
    assert!(cancellation_mails[1].body.contains(&second_code.to_string()));

    // Matching code deletes the reservation; no further email
    let mails_before = mailer.sent().len();
    lifecycle::confirm_cancellation(&pool, created.id, second_code)
        .await
        .expect("confirm");
    assert_eq!(mailer.sent().len(), mails_before);
    assert!(
        reservation_repo::find_by_id(&pool, created.id)
            .await
            .expect("fetch")
            .is_none()
    );

    // Gone means NotFound from here on
    let err = lifecycle::confirm_cancellation(&pool, created.id, second_code)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn cancellation_window_closes_two_hours_before_start() {
    let (pool, mailer, _guard) = setup().await;

    let now = chrono::Utc::now().timestamp_millis();
    let req = ReservationCreate {
        date: now + MILLIS_PER_HOUR, // starts in 1h — inside the cutoff
        ..booking_for(3, "2021-10-19 16:00:00", 1, 3)
    };
    let created = lifecycle::create_reservation(&pool, &mailer, req)
        .await
        .expect("create");

    let err = lifecycle::request_cancellation(&pool, &mailer, created.id, now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MethodNotAllowed(_)));

    // Unknown reservation is NotFound, not MethodNotAllowed
    let err = lifecycle::request_cancellation(&pool, &mailer, 9999, now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
