//! Comment threads on complaints.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/complaints/{id}/discussions` | Any | Thread |
//! | POST | `/api/v1/complaints/{id}/discussions` | Any | Post (records an activity) |
//! | PUT | `/api/v1/complaints/{id}/discussions/{discussion_id}` | Author | Edit |
//! | DELETE | `/api/v1/complaints/{id}/discussions/{discussion_id}` | Author | Delete |
//! | POST | `/api/v1/complaints/{id}/discussions/recommendation` | Admin | AI-suggested reply |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DiscussionService;
