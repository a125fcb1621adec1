mod news;
mod news_comment;

pub use news::{News, NEWS_COLUMNS};
pub use news_comment::{NewsComment, NEWS_COMMENT_SELECT};
