//! Service wiring and the `/api/v1` router.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn_with_state, Router};
use sqlx::PgPool;

use crate::core::config::JwtConfig;
use crate::core::middleware::auth_middleware;
use crate::features::admins::{routes as admins_routes, AdminService};
use crate::features::auth::{routes as auth_routes, AuthService, OtpService, TokenService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::chat::{routes as chat_routes, ChatService};
use crate::features::chatbot::{routes as chatbot_routes, ChatbotService};
use crate::features::complaint_processes::{routes as processes_routes, ProcessService};
use crate::features::complaints::{routes as complaints_routes, ComplaintService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::discussions::{routes as discussions_routes, DiscussionService};
use crate::features::faqs::{routes as faqs_routes, FaqService};
use crate::features::news::{routes as news_routes, NewsCommentService, NewsService};
use crate::features::proofs::{routes as proofs_routes, ProofService};
use crate::features::regions::{routes as regions_routes, RegionService};
use crate::features::schedules::{routes as schedules_routes, ScheduleService};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::chat_completion::ChatCompletion;
use crate::modules::email::EmailSender;
use crate::modules::region_api::RegionApiClient;
use crate::modules::storage::FileStorage;

/// External clients shared by the services
pub struct Clients {
    pub storage: Arc<dyn FileStorage>,
    pub email: Arc<dyn EmailSender>,
    pub completion: Arc<dyn ChatCompletion>,
    pub region_api: Arc<RegionApiClient>,
}

pub struct ServiceSettings<'a> {
    pub jwt: &'a JwtConfig,
    pub otp_expiry: Duration,
    /// Name the chatbot and reply assistant introduce themselves with
    pub app_name: String,
}

pub struct Services {
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub admins: Arc<AdminService>,
    pub categories: Arc<CategoryService>,
    pub regions: Arc<RegionService>,
    pub complaints: Arc<ComplaintService>,
    pub processes: Arc<ProcessService>,
    pub discussions: Arc<DiscussionService>,
    pub schedules: Arc<ScheduleService>,
    pub proofs: Arc<ProofService>,
    pub news: Arc<NewsService>,
    pub news_comments: Arc<NewsCommentService>,
    pub faqs: Arc<FaqService>,
    pub chatbot: Arc<ChatbotService>,
    pub chat: Arc<ChatService>,
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    pub fn new(pool: PgPool, clients: Clients, settings: ServiceSettings<'_>) -> Self {
        let tokens = Arc::new(TokenService::new(settings.jwt));
        let otp = Arc::new(OtpService::new(
            pool.clone(),
            Arc::clone(&clients.email),
            settings.otp_expiry,
        ));

        Self {
            auth: Arc::new(AuthService::new(pool.clone(), Arc::clone(&tokens), otp)),
            tokens,
            users: Arc::new(UserService::new(pool.clone(), Arc::clone(&clients.storage))),
            admins: Arc::new(AdminService::new(pool.clone())),
            categories: Arc::new(CategoryService::new(pool.clone())),
            regions: Arc::new(RegionService::new(pool.clone(), clients.region_api)),
            complaints: Arc::new(ComplaintService::new(
                pool.clone(),
                Arc::clone(&clients.storage),
            )),
            processes: Arc::new(ProcessService::new(pool.clone())),
            discussions: Arc::new(DiscussionService::new(
                pool.clone(),
                Arc::clone(&clients.completion),
                settings.app_name.clone(),
            )),
            schedules: Arc::new(ScheduleService::new(pool.clone())),
            proofs: Arc::new(ProofService::new(pool.clone(), Arc::clone(&clients.storage))),
            news: Arc::new(NewsService::new(pool.clone(), clients.storage)),
            news_comments: Arc::new(NewsCommentService::new(pool.clone())),
            faqs: Arc::new(FaqService::new(pool.clone())),
            chatbot: Arc::new(ChatbotService::new(
                pool.clone(),
                clients.completion,
                settings.app_name,
            )),
            chat: Arc::new(ChatService::new(pool.clone())),
            dashboard: Arc::new(DashboardService::new(pool)),
        }
    }
}

/// Public and bearer-protected API routes, without the outer HTTP layers
pub fn api_router(services: &Services) -> Router {
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(Arc::clone(&services.auth)))
        .merge(categories_routes::public_routes(Arc::clone(&services.categories)))
        .merge(regions_routes::public_routes(Arc::clone(&services.regions)))
        .merge(news_routes::public_routes(
            Arc::clone(&services.news),
            Arc::clone(&services.news_comments),
        ))
        .merge(faqs_routes::public_routes(Arc::clone(&services.faqs)));

    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(users_routes::routes(Arc::clone(&services.users)))
        .merge(admins_routes::routes(Arc::clone(&services.admins)))
        .merge(categories_routes::protected_routes(Arc::clone(
            &services.categories,
        )))
        .merge(regions_routes::protected_routes(Arc::clone(&services.regions)))
        .merge(complaints_routes::routes(Arc::clone(&services.complaints)))
        .merge(processes_routes::routes(Arc::clone(&services.processes)))
        .merge(discussions_routes::routes(Arc::clone(&services.discussions)))
        .merge(schedules_routes::routes(Arc::clone(&services.schedules)))
        .merge(proofs_routes::routes(Arc::clone(&services.proofs)))
        .merge(news_routes::protected_routes(
            Arc::clone(&services.news),
            Arc::clone(&services.news_comments),
        ))
        .merge(faqs_routes::protected_routes(Arc::clone(&services.faqs)))
        .merge(chatbot_routes::routes(Arc::clone(&services.chatbot)))
        .merge(chat_routes::routes(Arc::clone(&services.chat)))
        .merge(dashboard_routes::routes(Arc::clone(&services.dashboard)))
        .route_layer(from_fn_with_state(
            Arc::clone(&services.tokens),
            auth_middleware,
        ));

    Router::new().merge(public_routes).merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RegionApiConfig;
    use crate::core::database::lazy_test_pool;
    use crate::features::auth::model::Role;
    use crate::modules::chat_completion::{ChatCompletionError, ChatMessage};
    use crate::modules::email::{EmailError, OtpPurpose};
    use crate::shared::test_helpers::{insert_test_admin, seeded_category_id, NoopStorage};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use serde_json::json;

    struct NoopEmail;

    #[async_trait]
    impl EmailSender for NoopEmail {
        async fn send_otp(
            &self,
            _address: &str,
            _code: &str,
            _purpose: OtpPurpose,
        ) -> std::result::Result<(), EmailError> {
            Ok(())
        }
    }

    struct EchoCompletion;

    #[async_trait]
    impl ChatCompletion for EchoCompletion {
        async fn complete(
            &self,
            _prompts: Vec<ChatMessage>,
            user_message: &str,
        ) -> std::result::Result<String, ChatCompletionError> {
            Ok(user_message.to_string())
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "router-test-secret".to_string(),
            access_token_expiry: Duration::from_secs(3600),
            leeway: Duration::from_secs(0),
        }
    }

    fn services() -> Services {
        services_with(lazy_test_pool())
    }

    fn services_with(pool: PgPool) -> Services {
        let region_api = RegionApiClient::new(&RegionApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        Services::new(
            pool,
            Clients {
                storage: Arc::new(NoopStorage),
                email: Arc::new(NoopEmail),
                completion: Arc::new(EchoCompletion),
                region_api: Arc::new(region_api),
            },
            ServiceSettings {
                jwt: &jwt_config(),
                otp_expiry: Duration::from_secs(300),
                app_name: "Aduan".to_string(),
            },
        )
    }

    fn token(services: &Services, role: Role) -> String {
        services.tokens.issue(7, role, "tester").unwrap().access_token
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_admin_deletes_category_with_english_message(pool: PgPool) {
        let admin_id = insert_test_admin(&pool, "petugas_kategori").await;
        let category_id = seeded_category_id(&pool).await;
        let services = services_with(pool);
        let token = services
            .tokens
            .issue(admin_id, Role::Admin, "petugas_kategori")
            .unwrap()
            .access_token;
        let server = TestServer::new(api_router(&services)).unwrap();

        let response = server
            .delete(&format!("/api/v1/categories/{}", category_id))
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Category deleted successfully");

        server
            .get(&format!("/api/v1/categories/{}", category_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let server = TestServer::new(api_router(&services())).unwrap();

        let response = server.get("/api/v1/complaints").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let server = TestServer::new(api_router(&services())).unwrap();

        server
            .get("/api/v1/users/me")
            .authorization_bearer("not-a-jwt")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let server = TestServer::new(api_router(&services())).unwrap();
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();

        server
            .post("/api/v1/auth/register")
            .json(&json!({
                "name": name,
                "username": "warga_01",
                "email": email,
                "password": "short",
                "telephone_number": "081234567890"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_citizen_cannot_reach_admin_routes() {
        let services = services();
        let token = token(&services, Role::User);
        let server = TestServer::new(api_router(&services)).unwrap();

        server
            .get("/api/v1/dashboard")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post("/api/v1/complaints/C-ABCD1234/processes")
            .authorization_bearer(&token)
            .json(&json!({ "status": "Verifikasi", "message": "Sedang diverifikasi" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_cannot_create_admins() {
        let services = services();
        let token = token(&services, Role::Admin);
        let server = TestServer::new(api_router(&services)).unwrap();

        server
            .get("/api/v1/admins")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_cannot_use_chatbot() {
        let services = services();
        let token = token(&services, Role::SuperAdmin);
        let server = TestServer::new(api_router(&services)).unwrap();

        server
            .post("/api/v1/chatbot")
            .authorization_bearer(&token)
            .json(&json!({ "message": "Bagaimana cara melapor?" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
