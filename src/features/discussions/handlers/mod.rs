mod discussion_handler;

pub use discussion_handler::*;
