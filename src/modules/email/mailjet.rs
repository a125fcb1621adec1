//! Mailjet Send API v3.1 client

use std::time::Duration;

use async_trait::async_trait;
use minijinja::context;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use super::{EmailError, EmailSender, OtpPurpose};
use crate::core::config::EmailConfig;
use crate::shared::templates::{self, OTP_HTML, OTP_SUBJECT, OTP_TEXT};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    from: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: String,
    text_part: String,
    #[serde(rename = "HTMLPart")]
    html_part: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

pub struct MailjetClient {
    http_client: Client,
    api_url: String,
    api_key: String,
    api_secret: String,
    from_address: String,
    from_name: String,
    otp_expiry: Duration,
}

impl MailjetClient {
    pub fn new(config: &EmailConfig, otp_expiry: Duration) -> Result<Self, EmailError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            from_address: config.from_address.clone(),
            from_name: config.from_name.clone(),
            otp_expiry,
        })
    }

    fn build_otp_message<'a>(
        &'a self,
        address: &'a str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Message<'a>, EmailError> {
        let ctx = context! {
            app_name => self.from_name,
            code => code,
            purpose => purpose.as_str(),
            expiry_minutes => self.otp_expiry.as_secs() / 60,
        };

        Ok(Message {
            from: Contact {
                email: &self.from_address,
                name: Some(&self.from_name),
            },
            to: vec![Contact {
                email: address,
                name: None,
            }],
            subject: templates::render(OTP_SUBJECT, ctx.clone())?,
            text_part: templates::render(OTP_TEXT, ctx.clone())?,
            html_part: templates::render(OTP_HTML, ctx)?,
        })
    }
}

#[async_trait]
impl EmailSender for MailjetClient {
    async fn send_otp(
        &self,
        address: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), EmailError> {
        let body = SendRequest {
            messages: vec![self.build_otp_message(address, code, purpose)?],
        };

        debug!("Sending {} OTP email to {}", purpose.as_str(), address);

        let response = self
            .http_client
            .post(&self.api_url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Api { status, body });
        }

        info!("Sent {} OTP email to {}", purpose.as_str(), address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MailjetClient {
        MailjetClient::new(
            &EmailConfig {
                api_url: "http://localhost/send".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                from_address: "no-reply@aduan.local".to_string(),
                from_name: "Aduan".to_string(),
                timeout: Duration::from_secs(1),
            },
            Duration::from_secs(300),
        )
        .unwrap()
    }

    #[test]
    fn test_otp_message_payload() {
        let client = client();
        let message = client
            .build_otp_message("warga@example.com", "123456", OtpPurpose::Register)
            .unwrap();
        let json = serde_json::to_value(SendRequest {
            messages: vec![message],
        })
        .unwrap();

        let message = &json["Messages"][0];
        assert_eq!(message["From"]["Email"], "no-reply@aduan.local");
        assert_eq!(message["To"][0]["Email"], "warga@example.com");
        assert!(message["To"][0].get("Name").is_none());
        assert_eq!(message["Subject"], "Kode verifikasi akun - Aduan");
        assert!(message["HTMLPart"].as_str().unwrap().contains("123456"));
        assert!(message["TextPart"].as_str().unwrap().contains("5 menit"));
    }

    #[test]
    fn test_error_maps_to_external_service() {
        let err: crate::core::error::AppError = EmailError::Api {
            status: 401,
            body: "unauthorized".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            crate::core::error::AppError::ExternalServiceError(_)
        ));
    }
}
