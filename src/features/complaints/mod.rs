//! Citizen complaints: filing, visibility-scoped listing, owner edits, likes
//! and the owner's activity feed.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/complaints` | User | File a complaint (multipart, up to 5 `files`) |
//! | GET | `/api/v1/complaints` | Any | List with `ComplaintFilter` and pagination |
//! | GET | `/api/v1/complaints/{id}` | Any | Get a complaint |
//! | PUT | `/api/v1/complaints/{id}` | Owner | Edit while `Pending` |
//! | DELETE | `/api/v1/complaints/{id}` | Owner / Admin | Delete (owner only while `Pending`) |
//! | POST | `/api/v1/complaints/{id}/like` | User | Toggle like |
//! | GET | `/api/v1/users/me/complaints` | User | Own complaints |
//! | GET | `/api/v1/users/me/complaint-activities` | User | Likes and discussions on own complaints |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ComplaintService;
