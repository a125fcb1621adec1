use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::chat::handlers;
use crate::features::chat::services::ChatService;

pub fn routes(service: Arc<ChatService>) -> Router {
    Router::new()
        .route(
            "/api/v1/rooms",
            get(handlers::list_rooms).post(handlers::open_room),
        )
        .route("/api/v1/rooms/{id}", get(handlers::get_room))
        .route(
            "/api/v1/rooms/{id}/messages",
            get(handlers::list_messages).post(handlers::send_message),
        )
        .with_state(service)
}
