//! Administrator accounts, managed by super admins.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdminService;
