//! Member API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/cancel-membership", post(handler::cancel_membership))
        .route("/{id}/reactivate", post(handler::reactivate))
        .route("/{id}/rating", patch(handler::update_rating))
}
