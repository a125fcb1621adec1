use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::modules::email::{EmailSender, OtpPurpose};

/// Six random digits, zero padded
pub fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Issues and consumes one-time passwords
pub struct OtpService {
    pool: PgPool,
    email: Arc<dyn EmailSender>,
    expiry: Duration,
}

impl OtpService {
    pub fn new(pool: PgPool, email: Arc<dyn EmailSender>, expiry: Duration) -> Self {
        Self {
            pool,
            email,
            expiry,
        }
    }

    /// Replace any outstanding code for `email`/`purpose` and email a new one
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> Result<()> {
        let code = generate_code();
        let expires_at = Utc::now() + chrono::Duration::seconds(self.expiry.as_secs() as i64);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin otp transaction"))?;

        sqlx::query("DELETE FROM otps WHERE email = $1 AND purpose = $2")
            .bind(email)
            .bind(purpose)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "clear previous otps"))?;

        sqlx::query("INSERT INTO otps (email, code, purpose, expires_at) VALUES ($1, $2, $3, $4)")
            .bind(email)
            .bind(&code)
            .bind(purpose)
            .bind(expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "store otp"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit otp"))?;

        self.email.send_otp(email, &code, purpose).await?;
        Ok(())
    }

    /// Check and delete a code. Runs on the caller's connection so the
    /// follow-up write commits together with consumption.
    pub async fn consume(
        &self,
        conn: &mut PgConnection,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<()> {
        let consumed: Option<i64> = sqlx::query_scalar(
            r#"
            DELETE FROM otps
            WHERE email = $1 AND purpose = $2 AND code = $3 AND expires_at > NOW()
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(purpose)
        .bind(code)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::from_db(e, "consume otp"))?;

        if consumed.is_none() {
            return Err(AppError::BadRequest("Invalid or expired OTP code".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
