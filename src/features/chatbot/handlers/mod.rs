mod chatbot_handler;

pub use chatbot_handler::*;
