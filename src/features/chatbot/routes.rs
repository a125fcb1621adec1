use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::chatbot::handlers;
use crate::features::chatbot::services::ChatbotService;

pub fn routes(service: Arc<ChatbotService>) -> Router {
    Router::new()
        .route("/api/v1/chatbot", post(handlers::send_message))
        .route(
            "/api/v1/chatbot/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .with_state(service)
}
