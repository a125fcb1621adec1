use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admins::{dtos as admins_dtos, handlers as admins_handlers};
use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::chat::{
    dtos as chat_dtos, handlers as chat_handlers, models as chat_models,
};
use crate::features::chatbot::{dtos as chatbot_dtos, handlers as chatbot_handlers};
use crate::features::complaint_processes::{dtos as processes_dtos, handlers as processes_handlers};
use crate::features::complaints::{
    dtos as complaints_dtos, handlers as complaints_handlers, models as complaints_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::discussions::{dtos as discussions_dtos, handlers as discussions_handlers};
use crate::features::faqs::{dtos as faqs_dtos, handlers as faqs_handlers};
use crate::features::news::{dtos as news_dtos, handlers as news_handlers};
use crate::features::proofs::{dtos as proofs_dtos, handlers as proofs_handlers};
use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::features::schedules::{dtos as schedules_dtos, handlers as schedules_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, LikeStatus, LikeToggleResponseDto, Meta, SortDirection};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::verify_otp,
        auth::handlers::resend_otp,
        auth::handlers::login,
        auth::handlers::admin_login,
        auth::handlers::forgot_password,
        auth::handlers::reset_password,
        auth::handlers::get_me,
        // Users
        users_handlers::get_profile,
        users_handlers::update_profile,
        users_handlers::change_password,
        users_handlers::upload_photo,
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::delete_user,
        // Admins
        admins_handlers::list_admins,
        admins_handlers::create_admin,
        admins_handlers::get_admin,
        admins_handlers::update_admin,
        admins_handlers::delete_admin,
        admins_handlers::change_own_password,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Regencies
        regions_handlers::list_regencies,
        regions_handlers::get_regency,
        regions_handlers::sync_regencies,
        // Complaints
        complaints_handlers::create_complaint,
        complaints_handlers::list_complaints,
        complaints_handlers::get_complaint,
        complaints_handlers::update_complaint,
        complaints_handlers::delete_complaint,
        complaints_handlers::toggle_complaint_like,
        complaints_handlers::list_my_complaints,
        complaints_handlers::list_my_complaint_activities,
        // Complaint processes
        processes_handlers::list_processes,
        processes_handlers::create_process,
        processes_handlers::update_process,
        processes_handlers::delete_process,
        // Discussions
        discussions_handlers::list_discussions,
        discussions_handlers::create_discussion,
        discussions_handlers::update_discussion,
        discussions_handlers::delete_discussion,
        discussions_handlers::recommend_reply,
        // Schedules
        schedules_handlers::list_schedules,
        schedules_handlers::create_schedule,
        schedules_handlers::update_schedule,
        schedules_handlers::delete_schedule,
        // Proofs
        proofs_handlers::list_proofs,
        proofs_handlers::upload_proofs,
        proofs_handlers::delete_proof,
        // News
        news_handlers::list_news,
        news_handlers::get_news,
        news_handlers::create_news,
        news_handlers::update_news,
        news_handlers::delete_news,
        news_handlers::toggle_news_like,
        news_handlers::list_news_comments,
        news_handlers::create_news_comment,
        news_handlers::update_news_comment,
        news_handlers::delete_news_comment,
        // FAQ
        faqs_handlers::list_faqs,
        faqs_handlers::get_faq,
        faqs_handlers::create_faq,
        faqs_handlers::update_faq,
        faqs_handlers::delete_faq,
        // Chatbot
        chatbot_handlers::send_message,
        chatbot_handlers::get_history,
        chatbot_handlers::clear_history,
        // Chat rooms
        chat_handlers::open_room,
        chat_handlers::list_rooms,
        chat_handlers::get_room,
        chat_handlers::list_messages,
        chat_handlers::send_message,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            SortDirection,
            LikeStatus,
            LikeToggleResponseDto,
            ApiResponse<LikeToggleResponseDto>,
            // Auth
            auth::model::Role,
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::VerifyOtpRequestDto,
            auth::dtos::ResendOtpRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AdminLoginRequestDto,
            auth::dtos::ForgotPasswordRequestDto,
            auth::dtos::ResetPasswordRequestDto,
            auth::dtos::ChangePasswordRequestDto,
            auth::services::AccessToken,
            auth::dtos::AccountDto,
            auth::dtos::AuthResponseDto,
            ApiResponse<auth::dtos::AccountDto>,
            ApiResponse<auth::dtos::AuthResponseDto>,
            // Users
            users_dtos::UserResponseDto,
            users_dtos::UpdateProfileDto,
            users_handlers::ProfilePhotoForm,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Admins
            admins_dtos::AdminResponseDto,
            admins_dtos::CreateAdminDto,
            admins_dtos::UpdateAdminDto,
            ApiResponse<admins_dtos::AdminResponseDto>,
            ApiResponse<Vec<admins_dtos::AdminResponseDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Regencies
            regions_dtos::RegencyResponseDto,
            regions_dtos::SyncRegenciesDto,
            regions_dtos::SyncRegenciesResponseDto,
            ApiResponse<regions_dtos::RegencyResponseDto>,
            ApiResponse<Vec<regions_dtos::RegencyResponseDto>>,
            ApiResponse<regions_dtos::SyncRegenciesResponseDto>,
            // Complaints
            complaints_models::ComplaintStatus,
            complaints_models::ComplaintType,
            complaints_models::ActivityType,
            complaints_dtos::ComplaintResponseDto,
            complaints_dtos::UpdateComplaintDto,
            complaints_dtos::ComplaintSortBy,
            complaints_dtos::ComplaintActivityDto,
            complaints_handlers::CreateComplaintForm,
            ApiResponse<complaints_dtos::ComplaintResponseDto>,
            ApiResponse<Vec<complaints_dtos::ComplaintResponseDto>>,
            ApiResponse<Vec<complaints_dtos::ComplaintActivityDto>>,
            // Complaint processes
            processes_dtos::ProcessResponseDto,
            processes_dtos::CreateProcessDto,
            processes_dtos::UpdateProcessDto,
            ApiResponse<processes_dtos::ProcessResponseDto>,
            ApiResponse<Vec<processes_dtos::ProcessResponseDto>>,
            // Discussions
            discussions_dtos::DiscussionResponseDto,
            discussions_dtos::DiscussionRequestDto,
            discussions_dtos::RecommendationResponseDto,
            ApiResponse<discussions_dtos::DiscussionResponseDto>,
            ApiResponse<Vec<discussions_dtos::DiscussionResponseDto>>,
            ApiResponse<discussions_dtos::RecommendationResponseDto>,
            // Schedules
            schedules_dtos::ScheduleResponseDto,
            schedules_dtos::CreateScheduleDto,
            schedules_dtos::UpdateScheduleDto,
            ApiResponse<schedules_dtos::ScheduleResponseDto>,
            ApiResponse<Vec<schedules_dtos::ScheduleResponseDto>>,
            // Proofs
            proofs_dtos::ProofResponseDto,
            proofs_handlers::ProofUploadForm,
            ApiResponse<Vec<proofs_dtos::ProofResponseDto>>,
            // News
            news_dtos::NewsResponseDto,
            news_dtos::NewsCommentResponseDto,
            news_dtos::NewsCommentRequestDto,
            news_handlers::NewsForm,
            ApiResponse<news_dtos::NewsResponseDto>,
            ApiResponse<Vec<news_dtos::NewsResponseDto>>,
            ApiResponse<news_dtos::NewsCommentResponseDto>,
            ApiResponse<Vec<news_dtos::NewsCommentResponseDto>>,
            // FAQ
            faqs_dtos::FaqResponseDto,
            faqs_dtos::CreateFaqDto,
            faqs_dtos::UpdateFaqDto,
            ApiResponse<faqs_dtos::FaqResponseDto>,
            ApiResponse<Vec<faqs_dtos::FaqResponseDto>>,
            // Chatbot
            chatbot_dtos::ChatbotRequestDto,
            chatbot_dtos::ChatbotResponseDto,
            ApiResponse<chatbot_dtos::ChatbotResponseDto>,
            ApiResponse<Vec<chatbot_dtos::ChatbotResponseDto>>,
            // Chat rooms
            chat_models::SenderType,
            chat_dtos::RoomResponseDto,
            chat_dtos::MessageResponseDto,
            chat_dtos::SendMessageDto,
            ApiResponse<chat_dtos::RoomResponseDto>,
            ApiResponse<Vec<chat_dtos::RoomResponseDto>>,
            ApiResponse<chat_dtos::MessageResponseDto>,
            ApiResponse<Vec<chat_dtos::MessageResponseDto>>,
            // Dashboard
            dashboard_dtos::StatusCountDto,
            dashboard_dtos::CategoryCountDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, OTP verification and login"),
        (name = "users", description = "Citizen profiles and user management"),
        (name = "admins", description = "Admin accounts (super admin only)"),
        (name = "categories", description = "Complaint and news categories"),
        (name = "regions", description = "Regencies used as complaint locations"),
        (name = "complaints", description = "Citizen complaints"),
        (name = "complaint-processes", description = "Complaint status history"),
        (name = "discussions", description = "Complaint discussion threads"),
        (name = "schedules", description = "Follow-up schedules for complaints"),
        (name = "proofs", description = "Completion proofs for complaints"),
        (name = "news", description = "News articles, likes and comments"),
        (name = "faqs", description = "Frequently asked questions"),
        (name = "chatbot", description = "FAQ chatbot"),
        (name = "chat", description = "Support rooms between citizens and admins"),
        (name = "dashboard", description = "Admin statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Aduan API",
        version = "0.1.0",
        description = "API documentation for the citizen complaint service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_complaint_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/v1/complaints"));
        assert!(doc.paths.paths.contains_key("/api/v1/complaints/{id}/processes"));
        assert!(doc.paths.paths.contains_key("/api/v1/rooms/{id}/messages"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components should be generated");

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
