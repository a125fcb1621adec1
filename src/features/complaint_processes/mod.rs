//! Admin-authored status changes for complaints.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/complaints/{id}/processes` | Any | Status history |
//! | POST | `/api/v1/complaints/{id}/processes` | Admin | Advance status (see [`transition`]) |
//! | PUT | `/api/v1/complaints/{id}/processes/{process_id}` | Admin | Edit message |
//! | DELETE | `/api/v1/complaints/{id}/processes/{process_id}` | Admin | Delete latest, rolling status back |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod transition;

pub use services::ProcessService;
