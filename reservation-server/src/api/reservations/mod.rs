//! Reservations API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/reservations", get(handler::list).post(handler::create))
        .route(
            "/reservations/{id}",
            axum::routing::put(handler::request_cancellation)
                .delete(handler::confirm_cancellation),
        )
}
