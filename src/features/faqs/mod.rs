//! Frequently asked questions. Also the knowledge base the chatbot answers from.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FaqService;
