//! Citizen accounts: self-service profile and admin management.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET/PUT | `/api/v1/users/me` | User | View / update own profile |
//! | PUT | `/api/v1/users/me/password` | User | Change password |
//! | POST | `/api/v1/users/me/photo` | User | Upload profile photo |
//! | GET | `/api/v1/users` | Admin | List users |
//! | GET/DELETE | `/api/v1/users/{id}` | Admin | Get / delete user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
