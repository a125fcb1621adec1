//! Local account authentication.
//!
//! Citizens register with email + OTP verification and log in with email and
//! password; admins log in with username and password. Both receive an HS256
//! bearer token validated by [`crate::core::middleware::auth_middleware`].

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod password;
pub mod routes;
pub mod services;

pub use services::{AuthService, OtpService, TokenService};
