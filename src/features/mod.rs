//! Features layer - one module per API resource

pub mod admins;
pub mod auth;
pub mod categories;
pub mod chat;
pub mod chatbot;
pub mod complaint_processes;
pub mod complaints;
pub mod dashboard;
pub mod discussions;
pub mod faqs;
pub mod news;
pub mod proofs;
pub mod regions;
pub mod schedules;
pub mod users;
