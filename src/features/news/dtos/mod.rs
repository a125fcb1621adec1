mod news_comment_dto;
mod news_dto;

pub use news_comment_dto::*;
pub use news_dto::*;
