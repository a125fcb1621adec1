//! Jinja templates for outgoing emails and chat-completion prompts.
//!
//! Templates live under `templates/` and are compiled into the binary so a
//! deployment never runs without them.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

pub const OTP_SUBJECT: &str = "email/otp_subject.jinja";
pub const OTP_HTML: &str = "email/otp.html.jinja";
pub const OTP_TEXT: &str = "email/otp.txt.jinja";
pub const CHATBOT_SYSTEM: &str = "chatbot/system.jinja";
pub const DISCUSSION_RECOMMENDATION: &str = "chatbot/recommendation.jinja";

const TEMPLATES: &[(&str, &str)] = &[
    (
        OTP_SUBJECT,
        include_str!("../../templates/email/otp_subject.jinja"),
    ),
    (OTP_HTML, include_str!("../../templates/email/otp.html.jinja")),
    (OTP_TEXT, include_str!("../../templates/email/otp.txt.jinja")),
    (
        CHATBOT_SYSTEM,
        include_str!("../../templates/chatbot/system.jinja"),
    ),
    (
        DISCUSSION_RECOMMENDATION,
        include_str!("../../templates/chatbot/recommendation.jinja"),
    ),
];

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for crate::core::error::AppError {
    fn from(err: TemplateError) -> Self {
        crate::core::error::AppError::Internal(err.to_string())
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        }
    }
    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a named template with any serializable context, e.g.
/// `context! { code => "123456" }`.
pub fn render(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map(|s| s.trim().to_string())
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_load() {
        for (name, _) in TEMPLATES {
            assert!(get_environment().get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_missing_template() {
        let result = render("nonexistent.jinja", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_otp_subject_depends_on_purpose() {
        let register = render(
            OTP_SUBJECT,
            context! { purpose => "register", app_name => "Aduan" },
        )
        .unwrap();
        let reset = render(
            OTP_SUBJECT,
            context! { purpose => "forgot_password", app_name => "Aduan" },
        )
        .unwrap();

        assert_eq!(register, "Kode verifikasi akun - Aduan");
        assert_eq!(reset, "Kode reset kata sandi - Aduan");
    }

    #[test]
    fn test_otp_body_contains_code() {
        let html = render(
            OTP_HTML,
            context! { purpose => "register", app_name => "Aduan", code => "482913", expiry_minutes => 5 },
        )
        .unwrap();
        assert!(html.contains("482913"));
        assert!(html.contains("5 menit"));
    }
}
