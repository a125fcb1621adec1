//! Modules layer - Infrastructure components for external integrations
//!
//! Clients and adapters for object storage, email delivery, chat completion
//! and the regional-geography API.

pub mod chat_completion;
pub mod email;
pub mod region_api;
pub mod storage;
