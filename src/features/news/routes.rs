use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::news::handlers;
use crate::features::news::services::{NewsCommentService, NewsService};
use crate::shared::multipart::{upload_body_limit, MAX_FILES_PER_REQUEST};

pub fn public_routes(news: Arc<NewsService>, comments: Arc<NewsCommentService>) -> Router {
    let articles = Router::new()
        .route("/api/v1/news", get(handlers::list_news))
        .route("/api/v1/news/{id}", get(handlers::get_news))
        .with_state(news);

    let thread = Router::new()
        .route("/api/v1/news/{id}/comments", get(handlers::list_news_comments))
        .with_state(comments);

    articles.merge(thread)
}

pub fn protected_routes(news: Arc<NewsService>, comments: Arc<NewsCommentService>) -> Router {
    let articles = Router::new()
        .route(
            "/api/v1/news",
            post(handlers::create_news).layer(upload_body_limit(MAX_FILES_PER_REQUEST)),
        )
        .route(
            "/api/v1/news/{id}",
            put(handlers::update_news)
                .layer(upload_body_limit(MAX_FILES_PER_REQUEST))
                .merge(delete(handlers::delete_news)),
        )
        .route("/api/v1/news/{id}/like", post(handlers::toggle_news_like))
        .with_state(news);

    let thread = Router::new()
        .route(
            "/api/v1/news/{id}/comments",
            post(handlers::create_news_comment),
        )
        .route(
            "/api/v1/news/{id}/comments/{comment_id}",
            put(handlers::update_news_comment).delete(handlers::delete_news_comment),
        )
        .with_state(comments);

    articles.merge(thread)
}
