//! Follow-up schedules attached to complaints. Admins manage them; anyone who
//! can see the complaint can read them.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ScheduleService;
