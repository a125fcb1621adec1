use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::config::JwtConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims, Role};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Issues and validates HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_secs: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway.as_secs();
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry_secs: config.access_token_expiry.as_secs() as i64,
        }
    }

    pub fn issue(&self, id: i64, role: Role, username: &str) -> Result<AccessToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: id.to_string(),
            role,
            username: username.to_string(),
            iat: now,
            exp: now + self.expiry_secs,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiry_secs,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;

        AuthenticatedUser::try_from(claims)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(expiry_secs: u64) -> JwtConfig {
        JwtConfig {
            secret: "a-very-long-test-secret-of-32-characters!".to_string(),
            access_token_expiry: Duration::from_secs(expiry_secs),
            leeway: Duration::from_secs(0),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new(&config(3600));
        let token = service.issue(42, Role::Admin, "petugas").unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let user = service.verify(&token.access_token).unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.username, "petugas");
    }

    #[test]
    fn test_rejects_token_signed_with_other_secret() {
        let issuer = TokenService::new(&JwtConfig {
            secret: "another-secret-that-is-long-enough-0000".to_string(),
            ..config(3600)
        });
        let token = issuer.issue(1, Role::User, "warga").unwrap();

        let result = TokenService::new(&config(3600)).verify(&token.access_token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_rejects_expired_token() {
        let service = TokenService::new(&config(3600));
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            role: Role::User,
            username: "warga".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &service.encoding_key,
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let service = TokenService::new(&config(3600));
        assert!(service.verify("not-a-jwt").is_err());
    }
}
