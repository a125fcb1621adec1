//! News articles published by admins, with attachments, likes and comments.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/news` | No | List (`search`, `category_id`, pagination) |
//! | GET | `/api/v1/news/{id}` | No | Article |
//! | POST | `/api/v1/news` | Admin | Publish (multipart) |
//! | PUT | `/api/v1/news/{id}` | Admin | Update (multipart) |
//! | DELETE | `/api/v1/news/{id}` | Admin | Delete |
//! | POST | `/api/v1/news/{id}/like` | User | Toggle like |
//! | GET | `/api/v1/news/{id}/comments` | No | Comments |
//! | POST | `/api/v1/news/{id}/comments` | Any | Comment |
//! | PUT/DELETE | `/api/v1/news/{id}/comments/{comment_id}` | Author | Edit or delete comment |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{NewsCommentService, NewsService};
