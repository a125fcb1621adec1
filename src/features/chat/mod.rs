//! One support room per citizen, shared with every admin.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/rooms` | User | Open or fetch own room |
//! | GET | `/api/v1/rooms` | Admin | List rooms |
//! | GET | `/api/v1/rooms/{id}` | Participant | Room |
//! | GET | `/api/v1/rooms/{id}/messages` | Participant | Messages |
//! | POST | `/api/v1/rooms/{id}/messages` | Participant | Send message |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ChatService;
