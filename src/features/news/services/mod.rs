mod news_comment_service;
mod news_service;

pub use news_comment_service::NewsCommentService;
pub use news_service::NewsService;
