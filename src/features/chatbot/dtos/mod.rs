mod chatbot_dto;

pub use chatbot_dto::*;
