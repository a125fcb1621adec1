use std::sync::Arc;

use minijinja::context;
use serde::Serialize;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::chatbot::dtos::ChatbotResponseDto;
use crate::features::chatbot::models::{ChatbotExchange, CHATBOT_COLUMNS};
use crate::modules::chat_completion::{ChatCompletion, ChatMessage};
use crate::shared::templates::{self, CHATBOT_SYSTEM};
use crate::shared::types::PaginationQuery;

/// Previous exchanges replayed to the model on each message
pub const HISTORY_LIMIT: i64 = 10;

#[derive(Debug, Serialize, sqlx::FromRow)]
struct FaqEntry {
    question: String,
    answer: String,
}

/// Build the prompt list: system prompt, then past exchanges oldest first
pub fn build_prompts(system_prompt: String, history: &[ChatbotExchange]) -> Vec<ChatMessage> {
    let mut prompts = Vec::with_capacity(1 + history.len() * 2);
    prompts.push(ChatMessage::system(system_prompt));
    for exchange in history {
        prompts.push(ChatMessage::user(exchange.user_message.clone()));
        prompts.push(ChatMessage::assistant(exchange.bot_response.clone()));
    }
    prompts
}

/// FAQ-grounded chatbot for citizens
pub struct ChatbotService {
    pool: PgPool,
    completion: Arc<dyn ChatCompletion>,
    app_name: String,
}

impl ChatbotService {
    pub fn new(pool: PgPool, completion: Arc<dyn ChatCompletion>, app_name: String) -> Self {
        Self {
            pool,
            completion,
            app_name,
        }
    }

    async fn system_prompt(&self) -> Result<String> {
        let faqs = sqlx::query_as::<_, FaqEntry>(
            "SELECT question, answer FROM faqs WHERE deleted_at IS NULL ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "load faqs for chatbot"))?;

        Ok(templates::render(
            CHATBOT_SYSTEM,
            context! {
                app_name => &self.app_name,
                faqs => faqs,
            },
        )?)
    }

    async fn recent_history(&self, user_id: i64) -> Result<Vec<ChatbotExchange>> {
        let mut history = sqlx::query_as::<_, ChatbotExchange>(&format!(
            r#"
            SELECT {} FROM chatbots
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
            CHATBOT_COLUMNS
        ))
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "load chatbot history"))?;

        history.reverse();
        Ok(history)
    }

    /// Answer `message` and store the exchange
    pub async fn send(&self, user_id: i64, message: &str) -> Result<ChatbotResponseDto> {
        let message = message.trim();
        let system_prompt = self.system_prompt().await?;
        let history = self.recent_history(user_id).await?;

        let reply = self
            .completion
            .complete(build_prompts(system_prompt, &history), message)
            .await?;

        let exchange = sqlx::query_as::<_, ChatbotExchange>(&format!(
            "INSERT INTO chatbots (user_id, user_message, bot_response) VALUES ($1, $2, $3) RETURNING {}",
            CHATBOT_COLUMNS
        ))
        .bind(user_id)
        .bind(message)
        .bind(reply.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "store chatbot exchange"))?;

        Ok(exchange.into())
    }

    pub async fn history(
        &self,
        user_id: i64,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ChatbotResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chatbots WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count chatbot history"))?;

        let exchanges = sqlx::query_as::<_, ChatbotExchange>(&format!(
            r#"
            SELECT {} FROM chatbots
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            CHATBOT_COLUMNS
        ))
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list chatbot history"))?;

        Ok((exchanges.into_iter().map(Into::into).collect(), total))
    }

    pub async fn clear_history(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM chatbots WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "clear chatbot history"))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat_completion::ChatRole;
    use chrono::Utc;

    fn exchange(id: i64, question: &str, answer: &str) -> ChatbotExchange {
        ChatbotExchange {
            id,
            user_id: 1,
            user_message: question.to_string(),
            bot_response: answer.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompts_replay_history_in_order() {
        let history = vec![
            exchange(1, "Bagaimana cara melapor?", "Buka menu Pengaduan."),
            exchange(2, "Berapa lama diproses?", "Biasanya 3 hari kerja."),
        ];
        let prompts = build_prompts("system".to_string(), &history);

        let roles: Vec<ChatRole> = prompts.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant
            ]
        );
        assert_eq!(prompts[1].content, "Bagaimana cara melapor?");
        assert_eq!(prompts[4].content, "Biasanya 3 hari kerja.");
    }

    #[test]
    fn test_system_template_lists_faqs() {
        let prompt = templates::render(
            CHATBOT_SYSTEM,
            context! {
                app_name => "Aduan",
                faqs => vec![FaqEntry {
                    question: "Apakah layanan gratis?".to_string(),
                    answer: "Ya, gratis.".to_string(),
                }],
            },
        )
        .unwrap();

        assert!(prompt.contains("Apakah layanan gratis?"));
        assert!(prompt.contains("Ya, gratis."));
    }
}
