mod auth_service;
mod otp_service;
mod token_service;

pub use auth_service::AuthService;
pub use otp_service::{generate_code, OtpService};
pub use token_service::{AccessToken, TokenService};
