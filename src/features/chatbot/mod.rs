//! FAQ-grounded chatbot for citizens, with per-user history.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ChatbotService;
