mod news_comment_handler;
mod news_handler;

pub use news_comment_handler::*;
pub use news_handler::*;
