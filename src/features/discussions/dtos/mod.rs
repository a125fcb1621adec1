mod discussion_dto;

pub use discussion_dto::*;
